//! Document entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::criteria::FilterValue;
use core_kernel::record::{self, RecordProps};
use core_kernel::{Clock, DocumentId};

use crate::category::DocumentCategory;
use crate::error::DocumentError;
use crate::validation::{validate_description, validate_document_type};

/// Logical field names used by criteria and storage column tables
pub mod fields {
    pub const ID: &str = "id";
    pub const DOCUMENT_TYPE: &str = "documentType";
    pub const DESCRIPTION: &str = "description";
}

/// Domain fields supplied when creating a document
///
/// `document_type` is kept raw and only parsed during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    pub document_type: String,
    pub description: String,
}

impl DocumentData {
    pub fn new(category: DocumentCategory, description: impl Into<String>) -> Self {
        Self::raw(category.as_str(), description)
    }

    pub fn raw(document_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            description: description.into(),
        }
    }
}

/// A categorized document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    id: DocumentId,
    document_type: DocumentCategory,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Creates a new document with a fresh v4 id and current timestamps
    ///
    /// # Errors
    ///
    /// Description rules are checked before the document type.
    pub fn create(data: DocumentData, clock: &dyn Clock) -> Result<Self, DocumentError> {
        let document_type = Self::validate_data(&data)?;
        let now = clock.utc();

        Ok(Self {
            id: DocumentId::new(),
            document_type,
            description: data.description,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a document from stored data, re-validating everything
    pub fn restore(data: DocumentData, props: &RecordProps, clock: &dyn Clock) -> Result<Self, DocumentError> {
        let document_type = Self::validate_data(&data)?;
        let meta = record::validate_props(props, clock.utc())?;

        Ok(Self {
            id: DocumentId::from_uuid(meta.id),
            document_type,
            description: data.description,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        })
    }

    /// Replaces the description and refreshes `updated_at`
    ///
    /// The document is left unchanged when the new description is invalid.
    pub fn update_description(
        &mut self,
        description: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<(), DocumentError> {
        let description = description.into();
        validate_description(&description)?;

        self.description = description;
        self.updated_at = clock.utc().max(self.created_at);
        Ok(())
    }

    fn validate_data(data: &DocumentData) -> Result<DocumentCategory, DocumentError> {
        validate_description(&data.description)?;
        validate_document_type(&data.document_type)
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn document_type(&self) -> DocumentCategory {
        self.document_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn data(&self) -> DocumentData {
        DocumentData::new(self.document_type, self.description.clone())
    }

    pub fn props(&self) -> RecordProps {
        RecordProps::new(self.id.to_string(), self.created_at, self.updated_at)
    }

    /// Value of a logical field, for in-memory criteria evaluation
    ///
    /// The document type is exposed as its storage code.
    pub fn field_value(&self, field: &str) -> Option<FilterValue> {
        match field {
            fields::ID => Some(FilterValue::Uuid(*self.id.as_uuid())),
            fields::DOCUMENT_TYPE => Some(FilterValue::Text(self.document_type.as_str().to_string())),
            fields::DESCRIPTION => Some(FilterValue::Text(self.description.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use core_kernel::RecordError;
    use test_utils::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::default()
    }

    fn props() -> RecordProps {
        RecordProps::new(
            "a1b2c3d4-e5f6-7890-1234-567890abcdef",
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_create() {
        let clock = clock();
        let document = Document::create(
            DocumentData::new(DocumentCategory::Identification, "National identity card"),
            &clock,
        )
        .unwrap();

        assert_eq!(document.id().as_uuid().get_version_num(), 4);
        assert_eq!(document.document_type(), DocumentCategory::Identification);
        assert_eq!(document.created_at(), clock.utc());
        assert_eq!(document.updated_at(), document.created_at());
    }

    #[test]
    fn test_create_rejects_single_char_description() {
        let err = Document::create(DocumentData::new(DocumentCategory::Identification, "a"), &clock()).unwrap_err();
        assert_eq!(err.to_string(), "Description must be at least 2 characters long.");
    }

    #[test]
    fn test_create_rejects_whitespace_description() {
        let err = Document::create(DocumentData::new(DocumentCategory::Identification, "   "), &clock()).unwrap_err();
        assert_eq!(err.to_string(), "Description cannot be empty.");
    }

    #[test]
    fn test_description_checked_before_type() {
        let err = Document::create(DocumentData::raw("UNKNOWN", ""), &clock()).unwrap_err();
        assert!(matches!(err, DocumentError::DescriptionEmpty));

        let err = Document::create(DocumentData::raw("UNKNOWN", "Lab report"), &clock()).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidDocumentType));

        let err = Document::create(DocumentData::raw("", "Lab report"), &clock()).unwrap_err();
        assert!(matches!(err, DocumentError::DocumentTypeRequired));
    }

    #[test]
    fn test_restore() {
        let data = DocumentData::new(DocumentCategory::ExamsAndReports, "Blood test report");
        let document = Document::restore(data.clone(), &props(), &clock()).unwrap();

        assert_eq!(document.props(), props());
        assert_eq!(document.data(), data);
    }

    #[test]
    fn test_restore_rejects_bad_props() {
        let data = DocumentData::new(DocumentCategory::ExamsAndReports, "Blood test report");

        let mut bad_id = props();
        bad_id.id = "invalid-uuid".to_string();
        let err = Document::restore(data.clone(), &bad_id, &clock()).unwrap_err();
        assert_eq!(err.to_string(), "ID must be a valid UUID.");

        let mut future = props();
        future.created_at = clock().utc() + Duration::days(1);
        future.updated_at = future.created_at;
        let err = Document::restore(data.clone(), &future, &clock()).unwrap_err();
        assert!(matches!(err, DocumentError::Record(RecordError::FutureDate(_))));
        assert_eq!(err.to_string(), "Creation date cannot be in the future.");
    }

    #[test]
    fn test_update_description() {
        let data = DocumentData::new(DocumentCategory::Prescriptions, "Monthly prescription");
        let mut document = Document::restore(data, &props(), &clock()).unwrap();

        document.update_description("Weekly prescription", &clock()).unwrap();
        assert_eq!(document.description(), "Weekly prescription");
        assert_eq!(document.updated_at(), clock().utc());

        let before = document.clone();
        assert!(matches!(
            document.update_description(" ", &clock()),
            Err(DocumentError::DescriptionEmpty)
        ));
        assert!(matches!(
            document.update_description("x", &clock()),
            Err(DocumentError::DescriptionTooShort)
        ));
        assert_eq!(document, before);
    }

    #[test]
    fn test_serializes_storage_code() {
        let data = DocumentData::new(DocumentCategory::GuidesAndAuthorizations, "Surgery authorization");
        let document = Document::restore(data, &props(), &clock()).unwrap();
        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json["documentType"], "GUIAS_E_AUTORIZACOES");
        assert_eq!(json["description"], "Surgery authorization");
    }
}
