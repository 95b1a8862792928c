//! Document categories
//!
//! Every category has a stable storage code, which is what gets persisted
//! and serialized. Parsing also accepts the upper snake case variant name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;

/// Kind of document held in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentCategory {
    Identification,
    GuidesAndAuthorizations,
    ExamsAndReports,
    Prescriptions,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 4] = [
        DocumentCategory::Identification,
        DocumentCategory::GuidesAndAuthorizations,
        DocumentCategory::ExamsAndReports,
        DocumentCategory::Prescriptions,
    ];

    /// Storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Identification => "DOCUMENTO_IDENTIFICACAO",
            DocumentCategory::GuidesAndAuthorizations => "GUIAS_E_AUTORIZACOES",
            DocumentCategory::ExamsAndReports => "EXAMES_E_LAUDOS",
            DocumentCategory::Prescriptions => "RECEITAS_E_PRESCRICOES",
        }
    }

    /// Upper snake case variant name
    pub fn name(&self) -> &'static str {
        match self {
            DocumentCategory::Identification => "IDENTIFICATION",
            DocumentCategory::GuidesAndAuthorizations => "GUIDES_AND_AUTHORIZATIONS",
            DocumentCategory::ExamsAndReports => "EXAMS_AND_REPORTS",
            DocumentCategory::Prescriptions => "PRESCRIPTIONS",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentCategory {
    type Err = DocumentError;

    /// Blank input is `DocumentTypeRequired`, anything unknown is
    /// `InvalidDocumentType`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DocumentError::DocumentTypeRequired);
        }

        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s || category.name() == s)
            .ok_or(DocumentError::InvalidDocumentType)
    }
}

impl Serialize for DocumentCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocumentCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
