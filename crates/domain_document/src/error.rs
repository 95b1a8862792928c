//! Document domain errors

use thiserror::Error;

use core_kernel::{PortError, RecordError};

/// Errors that can occur in the document domain
///
/// Messages are surfaced verbatim to callers.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Description cannot be empty.")]
    DescriptionEmpty,

    #[error("Description must be at least 2 characters long.")]
    DescriptionTooShort,

    #[error("Document type is required.")]
    DocumentTypeRequired,

    #[error("Invalid document type.")]
    InvalidDocumentType,

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Document not found.")]
    NotFound,

    #[error("Document already exists.")]
    AlreadyExists,

    #[error(transparent)]
    Repository(#[from] PortError),
}

impl DocumentError {
    /// Returns true for failures raised while validating entity fields
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DocumentError::DescriptionEmpty
                | DocumentError::DescriptionTooShort
                | DocumentError::DocumentTypeRequired
                | DocumentError::InvalidDocumentType
                | DocumentError::Record(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(DocumentError::NotFound.to_string(), "Document not found.");
        assert_eq!(DocumentError::InvalidDocumentType.to_string(), "Invalid document type.");
        assert_eq!(
            DocumentError::from(RecordError::UpdatedBeforeCreated).to_string(),
            "Update date cannot be before creation date."
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(DocumentError::DescriptionTooShort.is_validation());
        assert!(!DocumentError::AlreadyExists.is_validation());
    }
}
