//! Document field rules

use crate::category::DocumentCategory;
use crate::error::DocumentError;

/// Minimum description length, counted in characters after trimming
pub const DESCRIPTION_MIN_CHARS: usize = 2;

pub fn validate_description(description: &str) -> Result<(), DocumentError> {
    if description.trim().is_empty() {
        return Err(DocumentError::DescriptionEmpty);
    }
    if description.trim().chars().count() < DESCRIPTION_MIN_CHARS {
        return Err(DocumentError::DescriptionTooShort);
    }
    Ok(())
}

pub fn validate_document_type(document_type: &str) -> Result<DocumentCategory, DocumentError> {
    document_type.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_rules() {
        for description in ["", " ", "   ", "\t\n"] {
            assert!(
                matches!(validate_description(description), Err(DocumentError::DescriptionEmpty)),
                "expected {description:?} to be empty"
            );
        }
        for description in ["a", " a "] {
            assert!(
                matches!(validate_description(description), Err(DocumentError::DescriptionTooShort)),
                "expected {description:?} to be too short"
            );
        }
        assert!(validate_description("ID").is_ok());
        assert!(validate_description("é ü").is_ok());
    }

    #[test]
    fn test_document_type() {
        assert_eq!(
            validate_document_type("RECEITAS_E_PRESCRICOES").unwrap(),
            DocumentCategory::Prescriptions
        );
        assert!(matches!(validate_document_type(""), Err(DocumentError::DocumentTypeRequired)));
    }
}
