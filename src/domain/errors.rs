use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }
}

/// Turns an affected-row count into `NotFound` when nothing was touched.
pub fn require_affected(rows: usize, entity: &'static str) -> Result<(), DomainError> {
    if rows == 0 {
        Err(DomainError::NotFound(entity))
    } else {
        Ok(())
    }
}

pub fn ensure_positive(field: &str, value: i32) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::invalid(format!("{field} must be greater than zero")));
    }
    Ok(())
}

pub fn ensure_non_negative(field: &str, value: i32) -> Result<(), DomainError> {
    if value < 0 {
        return Err(DomainError::invalid(format!("{field} must not be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rows_is_not_found() {
        let err = require_affected(0, "Store").unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Store")));
        assert_eq!(err.to_string(), "Store not found");
    }

    #[test]
    fn touched_rows_are_ok() {
        assert!(require_affected(1, "Store").is_ok());
    }

    #[test]
    fn quantity_guards() {
        assert!(ensure_positive("quantity", 0).is_err());
        assert!(ensure_positive("quantity", 3).is_ok());
        assert!(ensure_non_negative("quantity", 0).is_ok());
        assert!(matches!(
            ensure_non_negative("quantity", -1),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn insufficient_stock_display() {
        let err = DomainError::InsufficientStock {
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: requested 5, available 2"
        );
    }
}
