//! Beneficiary Repository Port
//!
//! The `BeneficiaryRepository` trait is everything the beneficiary services
//! need from storage. Two adapters implement it:
//!
//! - **PostgreSQL**: `infra_db::adapters::PostgresBeneficiaryRepository`
//! - **In-memory**: [`memory::InMemoryBeneficiaryRepository`], used by tests
//!   and by anything that wants the domain without a database
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_beneficiary::{BeneficiaryRepository, ListBeneficiaries};
//! use std::sync::Arc;
//!
//! let repository: Arc<dyn BeneficiaryRepository> = Arc::new(adapter);
//! let beneficiaries = ListBeneficiaries::new(repository).handle().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{BeneficiaryId, DomainPort, HealthCheckable, PortError};

use crate::beneficiary::Beneficiary;
use crate::criteria::BeneficiaryCriteria;

/// Storage contract for beneficiaries
///
/// Listing operations return beneficiaries ordered by lowercased name, then
/// by name and id compared byte-wise, so every adapter yields the same order
/// regardless of database collation.
#[async_trait]
pub trait BeneficiaryRepository: DomainPort + HealthCheckable {
    /// Returns true if a beneficiary with the same name, phone and birth
    /// date is already stored
    async fn exists(&self, candidate: &Beneficiary) -> Result<bool, PortError>;

    /// Inserts the beneficiary, or updates the stored row with the same id
    ///
    /// Returns the beneficiary as persisted.
    async fn save(&self, beneficiary: &Beneficiary) -> Result<Beneficiary, PortError>;

    /// Retrieves a beneficiary by id
    async fn find_by_id(&self, id: BeneficiaryId) -> Result<Option<Beneficiary>, PortError>;

    /// Deletes the beneficiary's row; deleting a missing row is not an error
    async fn remove(&self, beneficiary: &Beneficiary) -> Result<(), PortError>;

    /// Lists every beneficiary
    async fn find_all(&self) -> Result<Vec<Beneficiary>, PortError>;

    /// Lists beneficiaries matching the criteria
    ///
    /// Empty criteria behave exactly like [`find_all`](Self::find_all).
    async fn find(&self, criteria: &BeneficiaryCriteria) -> Result<Vec<Beneficiary>, PortError>;
}

/// In-memory adapter
///
/// Beneficiaries are kept in a `BTreeMap` keyed by id and sorted on read,
/// so iteration order is deterministic.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// In-memory implementation of BeneficiaryRepository
    #[derive(Debug, Default)]
    pub struct InMemoryBeneficiaryRepository {
        beneficiaries: Arc<RwLock<BTreeMap<BeneficiaryId, Beneficiary>>>,
        writes: AtomicUsize,
    }

    impl InMemoryBeneficiaryRepository {
        /// Creates an empty repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with beneficiaries
        pub async fn with_beneficiaries(beneficiaries: Vec<Beneficiary>) -> Self {
            let repository = Self::new();
            {
                let mut stored = repository.beneficiaries.write().await;
                for beneficiary in beneficiaries {
                    stored.insert(beneficiary.id(), beneficiary);
                }
            }
            repository
        }

        /// Number of save/remove calls made so far
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Number of stored beneficiaries
        pub async fn len(&self) -> usize {
            self.beneficiaries.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    fn sorted(mut beneficiaries: Vec<Beneficiary>) -> Vec<Beneficiary> {
        beneficiaries.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.name().cmp(b.name()))
                .then_with(|| a.id().cmp(&b.id()))
        });
        beneficiaries
    }

    impl DomainPort for InMemoryBeneficiaryRepository {}

    #[async_trait]
    impl HealthCheckable for InMemoryBeneficiaryRepository {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("in-memory-beneficiary-repository", 0)
        }
    }

    #[async_trait]
    impl BeneficiaryRepository for InMemoryBeneficiaryRepository {
        async fn exists(&self, candidate: &Beneficiary) -> Result<bool, PortError> {
            let beneficiaries = self.beneficiaries.read().await;
            Ok(beneficiaries.values().any(|stored| stored.same_person_as(candidate)))
        }

        async fn save(&self, beneficiary: &Beneficiary) -> Result<Beneficiary, PortError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.beneficiaries
                .write()
                .await
                .insert(beneficiary.id(), beneficiary.clone());
            Ok(beneficiary.clone())
        }

        async fn find_by_id(&self, id: BeneficiaryId) -> Result<Option<Beneficiary>, PortError> {
            Ok(self.beneficiaries.read().await.get(&id).cloned())
        }

        async fn remove(&self, beneficiary: &Beneficiary) -> Result<(), PortError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.beneficiaries.write().await.remove(&beneficiary.id());
            Ok(())
        }

        async fn find_all(&self) -> Result<Vec<Beneficiary>, PortError> {
            let beneficiaries = self.beneficiaries.read().await;
            Ok(sorted(beneficiaries.values().cloned().collect()))
        }

        async fn find(&self, criteria: &BeneficiaryCriteria) -> Result<Vec<Beneficiary>, PortError> {
            let beneficiaries = self.beneficiaries.read().await;
            Ok(sorted(
                beneficiaries
                    .values()
                    .filter(|beneficiary| criteria.matches(beneficiary))
                    .cloned()
                    .collect(),
            ))
        }
    }
}
