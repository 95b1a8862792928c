//! Pre-built Test Fixtures
//!
//! Ready-to-use request bundles and record metadata. Values line up with
//! [`FixedClock::default`](crate::FixedClock), so every date here is in
//! the past relative to it.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::RecordProps;
use domain_beneficiary::BeneficiaryData;
use domain_document::{DocumentCategory, DocumentData};

/// Fixture for beneficiary test data
pub struct BeneficiaryFixtures;

impl BeneficiaryFixtures {
    /// John Doe, (11) 99999-9999, born 2000-01-01
    pub fn john_doe() -> BeneficiaryData {
        BeneficiaryData::new("John Doe", "(11) 99999-9999", date(2000, 1, 1))
    }

    /// Jane Doe, 11987654321, born 1995-05-25
    pub fn jane_doe() -> BeneficiaryData {
        BeneficiaryData::new("Jane Doe", "11987654321", date(1995, 5, 25))
    }

    /// A beneficiary with a generated name and phone
    pub fn random() -> BeneficiaryData {
        let name: String = Name().fake();
        let subscriber: u32 = (10_000_000..99_999_999).fake();
        BeneficiaryData::new(name, format!("(11) 9{subscriber}"), date(1980, 6, 15))
    }
}

/// Fixture for document test data
pub struct DocumentFixtures;

impl DocumentFixtures {
    pub fn identification() -> DocumentData {
        DocumentData::new(DocumentCategory::Identification, "National identity card")
    }

    pub fn prescription() -> DocumentData {
        DocumentData::new(DocumentCategory::Prescriptions, "Monthly prescription")
    }

    pub fn exam() -> DocumentData {
        DocumentData::new(DocumentCategory::ExamsAndReports, "Blood test report")
    }
}

/// Fixture for record metadata
pub struct RecordFixtures;

impl RecordFixtures {
    pub const ID: &'static str = "a1b2c3d4-e5f6-7890-1234-567890abcdef";

    /// Valid metadata: created 09:00, updated 09:30 on 2025-01-01 UTC
    pub fn props() -> RecordProps {
        RecordProps::new(Self::ID, timestamp(2025, 1, 1, 9, 0), timestamp(2025, 1, 1, 9, 30))
    }
}

/// Builds a calendar date, panicking on invalid input
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// Builds a UTC timestamp, panicking on invalid input
pub fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture timestamp {year}-{month}-{day} {hour}:{minute}"))
}
