use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::value_objects::VacationStatus;
use crate::domain::errors::{DomainError, DomainResult};

/// Partial update of a vacation request
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacationChanges {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<VacationStatus>,
}

/// Vacation request of a user
///
/// # Invariants
/// - `start_date <= end_date`, re-checked after every update
/// - New requests always start as [`VacationStatus::Pending`]
#[derive(Debug, Clone, PartialEq)]
pub struct Vacation {
    id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: VacationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Vacation {
    /// Creates a pending vacation request
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use staffbook_api::domain::vacation::{Vacation, VacationStatus};
    /// use uuid::Uuid;
    ///
    /// let vacation = Vacation::new(
    ///     Uuid::new_v4(),
    ///     NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
    /// )
    /// .expect("valid range");
    ///
    /// assert_eq!(vacation.status(), VacationStatus::Pending);
    /// ```
    pub fn new(user_id: Uuid, start_date: NaiveDate, end_date: NaiveDate) -> DomainResult<Self> {
        Self::check_range(start_date, end_date)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            start_date,
            end_date,
            status: VacationStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges `changes` into the request and validates the merged dates
    ///
    /// The date range is checked on the resulting record, so moving only the
    /// start past the stored end fails. On error nothing is changed.
    pub fn apply(&mut self, changes: VacationChanges) -> DomainResult<()> {
        let start_date = changes.start_date.unwrap_or(self.start_date);
        let end_date = changes.end_date.unwrap_or(self.end_date);
        Self::check_range(start_date, end_date)?;

        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn check_range(start_date: NaiveDate, end_date: NaiveDate) -> DomainResult<()> {
        if start_date > end_date {
            return Err(DomainError::invalid("start date cannot be after end date"));
        }
        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn status(&self) -> VacationStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rebuilds a vacation from a stored row without re-validating it
    ///
    /// Only repository implementations should call this.
    pub fn from_persistence(
        id: Uuid,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: VacationStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            start_date,
            end_date,
            status,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn august() -> Vacation {
        Vacation::new(Uuid::new_v4(), date(2024, 8, 1), date(2024, 8, 15)).unwrap()
    }

    #[test]
    fn new_vacation_is_pending() {
        assert_eq!(august().status(), VacationStatus::Pending);
    }

    #[test]
    fn single_day_vacation_is_valid() {
        assert!(Vacation::new(Uuid::new_v4(), date(2024, 8, 1), date(2024, 8, 1)).is_ok());
    }

    #[test]
    fn start_after_end_is_rejected() {
        let result = Vacation::new(Uuid::new_v4(), date(2024, 8, 15), date(2024, 8, 1));
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn moving_only_start_is_checked_against_stored_end() {
        let mut vacation = august();

        let result = vacation.apply(VacationChanges {
            start_date: Some(date(2024, 8, 20)),
            ..Default::default()
        });

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert_eq!(vacation.start_date(), date(2024, 8, 1));
    }

    #[test]
    fn moving_only_end_is_checked_against_stored_start() {
        let mut vacation = august();

        let result = vacation.apply(VacationChanges {
            end_date: Some(date(2024, 7, 31)),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(vacation.end_date(), date(2024, 8, 15));
    }

    #[test]
    fn moving_both_dates_together() {
        let mut vacation = august();

        vacation
            .apply(VacationChanges {
                start_date: Some(date(2024, 9, 1)),
                end_date: Some(date(2024, 9, 10)),
                status: None,
            })
            .unwrap();

        assert_eq!(vacation.start_date(), date(2024, 9, 1));
        assert_eq!(vacation.end_date(), date(2024, 9, 10));
        assert_eq!(vacation.status(), VacationStatus::Pending);
    }

    #[test]
    fn any_status_may_follow_any_other() {
        let mut vacation = august();

        for status in [
            VacationStatus::Approved,
            VacationStatus::Rejected,
            VacationStatus::Pending,
            VacationStatus::Rejected,
            VacationStatus::Approved,
        ] {
            vacation
                .apply(VacationChanges {
                    status: Some(status),
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(vacation.status(), status);
        }
    }

    #[test]
    fn invalid_dates_do_not_apply_status() {
        let mut vacation = august();

        let result = vacation.apply(VacationChanges {
            start_date: Some(date(2024, 12, 1)),
            end_date: None,
            status: Some(VacationStatus::Approved),
        });

        assert!(result.is_err());
        assert_eq!(vacation.status(), VacationStatus::Pending);
    }
}
