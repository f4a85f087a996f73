//! Translation of storage failures into domain errors

use crate::contract::ShopError;
use sea_orm::{DbErr, SqlErr};

/// Map a repository error to a `ShopError`
///
/// Constraint violations become client errors; everything else is logged and
/// reported as `Internal` without its detail.
pub fn map_storage_error(err: anyhow::Error) -> ShopError {
    if let Some(db_err) = err.downcast_ref::<DbErr>() {
        match db_err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                return ShopError::conflict("a record with the same unique value already exists");
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                return ShopError::invalid("reference", "referenced record does not exist");
            }
            _ => {}
        }

        let message = db_err.to_string();
        if message.contains("CHECK constraint") || message.contains("violates check constraint") {
            return ShopError::invalid("constraint", "value is out of the allowed range");
        }
    }

    tracing::error!(error = ?err, "Storage operation failed");
    ShopError::Internal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_errors_are_internal() {
        let err = map_storage_error(anyhow::anyhow!("connection reset"));
        assert_eq!(err, ShopError::Internal);
    }

    #[test]
    fn plain_db_errors_do_not_leak() {
        let err = map_storage_error(DbErr::Custom("secret table layout".into()).into());
        assert_eq!(err, ShopError::Internal);
        assert!(!err.to_string().contains("secret"));
    }
}
