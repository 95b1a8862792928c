//! Test Utilities Crate
//!
//! Shared test infrastructure for the registry test suite.
//!
//! # Modules
//!
//! - `clock`: a controllable clock implementing `mockable::Clock`
//! - `fixtures`: pre-built request bundles and record metadata
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: error-message and ordering assertions
//! - `generators`: property-based test data generators

pub mod clock;
pub mod fixtures;
pub mod database;
pub mod assertions;
pub mod generators;

pub use clock::FixedClock;
pub use fixtures::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
