//! Size limits of the persisted columns, checked before any write so that
//! oversized input is reported as invalid instead of failing in the store.

use bigdecimal::BigDecimal;

use super::errors::DomainError;

/// `VARCHAR(64)`: ids, product codes, bill numbers, phone numbers.
pub const MAX_CODE_LEN: usize = 64;
/// `VARCHAR(255)`: names, printers, email.
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_ADDRESS_LEN: usize = 512;
/// `VARCHAR(32)`: paper size and format type.
pub const MAX_OPTION_LEN: usize = 32;
pub const MAX_CURRENCY_LEN: usize = 8;

/// `NUMERIC(12, 2)` holds at most ten integer digits.
const AMOUNT_LIMIT: i64 = 10_000_000_000;

pub fn check_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn check_opt_len(field: &str, value: Option<&str>, max: usize) -> Result<(), DomainError> {
    value.map_or(Ok(()), |v| check_len(field, v, max))
}

pub fn check_amount(field: &str, value: &BigDecimal) -> Result<(), DomainError> {
    if value.round(2).abs() >= BigDecimal::from(AMOUNT_LIMIT) {
        return Err(DomainError::InvalidInput(format!(
            "{} must be less than {}",
            field, AMOUNT_LIMIT
        )));
    }
    Ok(())
}
