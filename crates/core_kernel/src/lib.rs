//! Core Kernel - Foundational types shared by the registry domains
//!
//! This crate provides the building blocks used across all domain modules:
//! - Typed identifiers for entities
//! - Record metadata validation (ids, timestamps, date rules)
//! - The partial-criteria filter model used by repository `find`
//! - Port error and health-check types for repository adapters
//!
//! Time is read through [`Clock`] so entity validation can be pinned to a
//! fixed instant in tests.

pub mod identifiers;
pub mod record;
pub mod criteria;
pub mod ports;

pub use identifiers::{BeneficiaryId, DocumentId};
pub use record::{RecordError, RecordMeta, RecordProps};
pub use criteria::{FieldRule, Filter, FilterValue, MatchStrategy};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
pub use mockable::{Clock, DefaultClock};
