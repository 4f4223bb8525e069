pub mod catalog_repo;
pub mod invoice_repo;
pub mod models;
pub mod order_repo;
pub mod seed;
pub mod settings_repo;
pub mod table_repo;
pub mod workbook;

#[cfg(test)]
pub(crate) mod test_db;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DomainError::NotFound("Record"),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                DomainError::Conflict(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                DomainError::InvalidInput(info.message().to_string())
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

/// Like the `From` conversion, but a value the database refuses to store
/// (too long, out of range, null) is reported as invalid input.
pub(crate) fn row_data_error(e: DieselError) -> DomainError {
    match e {
        DieselError::DatabaseError(
            DatabaseErrorKind::Unknown | DatabaseErrorKind::NotNullViolation,
            info,
        ) => DomainError::InvalidInput(info.message().to_string()),
        other => DomainError::from(other),
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
