//! Tests for the typed identifiers

use core_kernel::{BeneficiaryId, DocumentId, RecordError};
use uuid::Uuid;

mod beneficiary_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_v4_ids() {
        let id1 = BeneficiaryId::new();
        let id2 = BeneficiaryId::new();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_display_is_hyphenated_uuid() {
        let uuid = Uuid::new_v4();
        let id = BeneficiaryId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn test_parse_round_trip() {
        let original = BeneficiaryId::new();
        let parsed: BeneficiaryId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        let uuid = Uuid::new_v4();
        for raw in [
            "invalid-uuid".to_string(),
            uuid.simple().to_string(),
            uuid.braced().to_string(),
            uuid.urn().to_string(),
        ] {
            assert_eq!(raw.parse::<BeneficiaryId>().unwrap_err(), RecordError::InvalidId);
        }
    }

    #[test]
    fn test_serde_transparent() {
        let id = BeneficiaryId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}

mod document_id_tests {
    use super::*;

    #[test]
    fn test_entity_name() {
        assert_eq!(DocumentId::entity_name(), "Document");
        assert_eq!(BeneficiaryId::entity_name(), "Beneficiary");
    }

    #[test]
    fn test_uuid_conversions() {
        let uuid = Uuid::new_v4();
        let id = DocumentId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(back, uuid);
    }
}
