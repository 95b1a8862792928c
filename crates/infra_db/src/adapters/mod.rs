//! Domain Adapters
//!
//! PostgreSQL implementations of the domain repository ports. Each adapter:
//! - Implements the domain's repository trait
//! - Maps rows back to entities through the entity's restore factory
//! - Translates `DatabaseError` into `PortError`
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::adapters::PostgresBeneficiaryRepository;
//! use domain_beneficiary::{BeneficiaryRepository, ListBeneficiaries};
//!
//! let repository: Arc<dyn BeneficiaryRepository> = Arc::new(PostgresBeneficiaryRepository::new(pool));
//! let beneficiaries = ListBeneficiaries::new(repository).handle().await?;
//! ```

pub mod beneficiary;
pub mod document;

pub use beneficiary::PostgresBeneficiaryRepository;
pub use document::PostgresDocumentRepository;
