use serde::{Deserialize, Serialize};

/// Review status of a vacation request
///
/// Statuses are free-standing: any status may follow any other. No
/// transition table is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "vacation_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationStatus {
    /// Awaiting review
    Pending,
    /// Accepted by an admin
    Approved,
    /// Declined by an admin
    Rejected,
}

impl std::fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VacationStatus::Pending => write!(f, "PENDING"),
            VacationStatus::Approved => write!(f, "APPROVED"),
            VacationStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(VacationStatus::Pending.to_string(), "PENDING");
        assert_eq!(VacationStatus::Approved.to_string(), "APPROVED");
        assert_eq!(VacationStatus::Rejected.to_string(), "REJECTED");
    }

    #[test]
    fn status_wire_format() {
        assert_eq!(
            serde_json::from_str::<VacationStatus>("\"APPROVED\"").unwrap(),
            VacationStatus::Approved
        );
        assert!(serde_json::from_str::<VacationStatus>("\"CANCELLED\"").is_err());
    }
}
