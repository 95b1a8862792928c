//! Beneficiary Domain
//!
//! Beneficiaries are people registered with a name, a phone number and a
//! birth date. This crate holds the self-validating [`Beneficiary`] entity,
//! the [`BeneficiaryRepository`] port with an in-memory adapter, and the
//! five use-case services.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use core_kernel::DefaultClock;
//! use domain_beneficiary::{BeneficiaryData, CreateBeneficiary, InMemoryBeneficiaryRepository};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let create = CreateBeneficiary::new(
//!     Arc::new(InMemoryBeneficiaryRepository::new()),
//!     Arc::new(DefaultClock),
//! );
//! let data = BeneficiaryData::new(
//!     "John Doe",
//!     "(11) 99999-9999",
//!     NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
//! );
//! let beneficiary = create.handle(data).await.unwrap();
//! assert_eq!(beneficiary.created_at(), beneficiary.updated_at());
//! # }
//! ```

pub mod beneficiary;
pub mod criteria;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use beneficiary::{Beneficiary, BeneficiaryChanges, BeneficiaryData};
pub use criteria::BeneficiaryCriteria;
pub use error::BeneficiaryError;
pub use ports::memory::InMemoryBeneficiaryRepository;
pub use ports::BeneficiaryRepository;
pub use services::{
    CreateBeneficiary, FindBeneficiaries, ListBeneficiaries, RemoveBeneficiary,
    UpdateBeneficiary, UpdateBeneficiaryRequest,
};
