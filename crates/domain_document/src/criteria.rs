//! Partial criteria for finding documents

use serde::{Deserialize, Serialize};

use core_kernel::criteria::{matches_all, FieldRule, Filter, FilterValue};
use core_kernel::DocumentId;

use crate::category::DocumentCategory;
use crate::document::{fields, Document};

/// `description` is a case-insensitive substring match; everything else is exact.
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule::exact(fields::ID),
    FieldRule::exact(fields::DOCUMENT_TYPE),
    FieldRule::contains(fields::DESCRIPTION),
];

/// Query parameters for finding documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentCriteria {
    pub id: Option<DocumentId>,
    pub document_type: Option<DocumentCategory>,
    pub description: Option<String>,
}

impl DocumentCriteria {
    pub fn by_type(category: DocumentCategory) -> Self {
        Self {
            document_type: Some(category),
            ..Default::default()
        }
    }

    pub fn by_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }

    /// Populated criteria as filters; the type is compared by storage code
    pub fn filters(&self) -> Vec<Filter> {
        let candidates = [
            (fields::ID, self.id.map(|id| FilterValue::Uuid(*id.as_uuid()))),
            (
                fields::DOCUMENT_TYPE,
                self.document_type.map(|category| FilterValue::Text(category.as_str().to_string())),
            ),
            (fields::DESCRIPTION, self.description.clone().map(FilterValue::Text)),
        ];

        candidates
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| Filter::from_rules(FIELD_RULES, field, value)))
            .collect()
    }

    pub fn matches(&self, document: &Document) -> bool {
        matches_all(&self.filters(), |field| document.field_value(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::MatchStrategy;

    #[test]
    fn test_filters() {
        let criteria = DocumentCriteria {
            document_type: Some(DocumentCategory::Prescriptions),
            description: Some("monthly".to_string()),
            ..Default::default()
        };
        let filters = criteria.filters();

        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].value, FilterValue::Text("RECEITAS_E_PRESCRICOES".to_string()));
        assert_eq!(filters[0].strategy, MatchStrategy::Exact);
        assert_eq!(filters[1].strategy, MatchStrategy::ContainsIgnoreCase);
    }

    #[test]
    fn test_deserialize() {
        let criteria: DocumentCriteria = serde_json::from_str(r#"{"documentType":"IDENTIFICATION"}"#).unwrap();
        assert_eq!(criteria, DocumentCriteria::by_type(DocumentCategory::Identification));
        assert!(DocumentCriteria::default().is_empty());
    }
}
