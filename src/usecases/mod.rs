pub mod feed;
pub mod follows;
pub mod plans;
pub mod subscriptions;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// True when the error chain bottoms out in a unique-constraint violation.
/// Duplicate follows and duplicate subscriptions are caught this way: the
/// store's constraint is the authority, not a check-then-insert.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _
        ))
    )
}

#[cfg(test)]
pub(crate) fn unique_violation_error() -> anyhow::Error {
    anyhow::Error::new(DieselError::DatabaseError(
        DatabaseErrorKind::UniqueViolation,
        Box::new("duplicate key value violates unique constraint".to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_unique_violation_through_anyhow_chain() {
        assert!(is_unique_violation(&unique_violation_error()));
    }

    #[test]
    fn ignores_other_errors() {
        assert!(!is_unique_violation(&anyhow::anyhow!("connection reset")));
        assert!(!is_unique_violation(&anyhow::Error::new(
            DieselError::NotFound
        )));
    }
}
