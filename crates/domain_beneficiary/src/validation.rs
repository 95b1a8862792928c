//! Beneficiary field rules
//!
//! ## Name
//! - Must contain at least one non-whitespace character
//!
//! ## Phone
//! - Must contain at least one non-whitespace character
//! - Only digits, spaces, `-`, `(`, `)` and `+` are allowed
//! - Between 9 and 15 digits once separators are ignored
//!
//! ## Birth date
//! - Cannot be after the current UTC day

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use core_kernel::record::ensure_date_not_future;

use crate::error::BeneficiaryError;

/// Field label used in birth date messages
pub const BIRTH_DATE: &str = "Birth date";

/// Minimum number of digits in a phone number
pub const PHONE_MIN_DIGITS: usize = 9;
/// Maximum number of digits in a phone number
pub const PHONE_MAX_DIGITS: usize = 15;

static PHONE_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9()+\- ]+$").unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
});

pub fn validate_name(name: &str) -> Result<(), BeneficiaryError> {
    if name.trim().is_empty() {
        return Err(BeneficiaryError::NameRequired);
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), BeneficiaryError> {
    if phone.trim().is_empty() {
        return Err(BeneficiaryError::PhoneRequired);
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) || !PHONE_CHARSET.is_match(phone) {
        return Err(BeneficiaryError::InvalidPhone);
    }
    Ok(())
}

pub fn validate_birth_date(birth_date: NaiveDate, now: DateTime<Utc>) -> Result<(), BeneficiaryError> {
    ensure_date_not_future(BIRTH_DATE, birth_date, now)?;
    Ok(())
}
