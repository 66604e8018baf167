use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::access::{admin_only_change, require_self_or_admin, Caller};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::{UserRepository, VacationRepository};
use crate::domain::vacation::{Vacation, VacationChanges, VacationStatus};

pub struct VacationService {
    vacations: Arc<dyn VacationRepository>,
    users: Arc<dyn UserRepository>,
}

impl VacationService {
    pub fn new(vacations: Arc<dyn VacationRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { vacations, users }
    }

    /// Requests a vacation; the request always starts out pending
    pub async fn create(
        &self,
        caller: &Caller,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> DomainResult<Vacation> {
        require_self_or_admin(caller, user_id)?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let vacation = Vacation::new(user_id, start_date, end_date)?;
        self.vacations.create(&vacation).await?;

        tracing::info!(vacation_id = %vacation.id(), user_id = %user_id, "vacation requested");
        Ok(vacation)
    }

    pub async fn get(&self, caller: &Caller, id: Uuid) -> DomainResult<Vacation> {
        let vacation = self.find(id).await?;
        require_self_or_admin(caller, vacation.user_id())?;
        Ok(vacation)
    }

    pub async fn list_by_user(&self, caller: &Caller, user_id: Uuid) -> DomainResult<Vec<Vacation>> {
        require_self_or_admin(caller, user_id)?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::NotFound);
        }
        Ok(self.vacations.find_by_user(user_id).await?)
    }

    /// Applies a partial update
    ///
    /// Status changes from non-admins are discarded, and a non-admin who
    /// moves the dates sends the request back to pending. The merged date
    /// range is validated as a whole.
    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        changes: VacationChanges,
    ) -> DomainResult<Vacation> {
        let mut vacation = self.find(id).await?;
        require_self_or_admin(caller, vacation.user_id())?;

        let moved = changes.start_date.is_some_and(|d| d != vacation.start_date())
            || changes.end_date.is_some_and(|d| d != vacation.end_date());
        let status = if moved && !caller.is_admin() {
            VacationStatus::Pending
        } else {
            admin_only_change(caller, changes.status, vacation.status())
        };
        vacation.apply(VacationChanges {
            status: Some(status),
            ..changes
        })?;
        self.vacations.update(&vacation).await?;

        tracing::info!(vacation_id = %id, status = %vacation.status(), "vacation updated");
        Ok(vacation)
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> DomainResult<()> {
        let vacation = self.find(id).await?;
        require_self_or_admin(caller, vacation.user_id())?;
        self.vacations.delete(id).await?;

        tracing::info!(vacation_id = %id, "vacation deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<Vacation> {
        self.vacations
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)
    }
}
