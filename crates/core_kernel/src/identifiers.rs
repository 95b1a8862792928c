//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidentally looking up a document with a beneficiary id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::record::{parse_uuid, RecordError};

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random (v4) identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Human readable name of the entity this identifier belongs to
            pub fn entity_name() -> &'static str {
                $entity
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = RecordError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_uuid(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(BeneficiaryId, "Beneficiary");
define_id!(DocumentId, "Document");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_plain_hyphenated_uuid() {
        let id = BeneficiaryId::new();
        let display = id.to_string();
        assert_eq!(display.len(), 36);
        assert_eq!(display, id.as_uuid().hyphenated().to_string());
    }

    #[test]
    fn test_new_ids_are_v4() {
        let id = DocumentId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_id_parsing() {
        let original = DocumentId::new();
        let parsed: DocumentId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parsing_rejects_non_hyphenated_forms() {
        let simple = Uuid::new_v4().simple().to_string();
        assert_eq!(simple.parse::<BeneficiaryId>(), Err(RecordError::InvalidId));
        assert_eq!("non-existing-id".parse::<BeneficiaryId>(), Err(RecordError::InvalidId));
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let id = BeneficiaryId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
        assert_eq!(BeneficiaryId::entity_name(), "Beneficiary");
    }
}
