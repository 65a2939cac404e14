pub mod catalog_repo;
pub mod customer_repo;
pub mod models;
pub mod order_repo;
pub mod patch;
pub mod promo_code_repo;
pub mod staff_repo;
pub mod stock_repo;
pub mod store_repo;

#[cfg(test)]
pub(crate) mod test_support;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

/// Postgres errors diesel reports as `Unknown` that still describe a clash
/// with concurrent work or with the column bounds, not a broken store.
fn is_conflict_message(message: &str) -> bool {
    message.contains("deadlock detected") || message.contains("out of range")
}

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DomainError::NotFound("Record"),
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::SerializationFailure => {
                    DomainError::Conflict(info.message().to_string())
                }
                _ if is_conflict_message(info.message()) => {
                    DomainError::Conflict(info.message().to_string())
                }
                _ => DomainError::Storage(info.message().to_string()),
            },
            other => DomainError::Storage(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[test]
    fn integer_overflow_is_a_conflict() {
        let err = DomainError::from(database_error(
            DatabaseErrorKind::Unknown,
            "integer out of range",
        ));
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn deadlock_is_a_conflict() {
        let err = DomainError::from(database_error(
            DatabaseErrorKind::Unknown,
            "deadlock detected",
        ));
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn other_database_errors_are_storage() {
        let err = DomainError::from(database_error(
            DatabaseErrorKind::ClosedConnection,
            "server closed the connection unexpectedly",
        ));
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(matches!(
            DomainError::from(DieselError::NotFound),
            DomainError::NotFound(_)
        ));
    }
}
