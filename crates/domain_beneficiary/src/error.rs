//! Beneficiary domain errors
//!
//! The `Display` output of every variant is the exact message surfaced to
//! callers of the services, so tests compare against `to_string()`.

use thiserror::Error;

use core_kernel::{PortError, RecordError};

/// Errors that can occur in the beneficiary domain
#[derive(Debug, Error)]
pub enum BeneficiaryError {
    #[error("Name is required.")]
    NameRequired,

    #[error("Phone is required.")]
    PhoneRequired,

    #[error("Phone number is invalid. It must contain 9 to 15 digits and only valid characters.")]
    InvalidPhone,

    /// Id, timestamp or date rule violated
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Beneficiary not found.")]
    NotFound,

    #[error("Beneficiary already exists.")]
    AlreadyExists,

    /// Failure reported by the repository adapter
    #[error(transparent)]
    Repository(#[from] PortError),
}

impl BeneficiaryError {
    /// Returns true for failures raised while validating entity fields
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BeneficiaryError::NameRequired
                | BeneficiaryError::PhoneRequired
                | BeneficiaryError::InvalidPhone
                | BeneficiaryError::Record(_)
        )
    }
}
