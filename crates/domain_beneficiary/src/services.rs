//! Beneficiary use-case services
//!
//! Each service wraps exactly one operation behind a `handle` method. They
//! hold no state besides the repository (and a clock where timestamps are
//! produced) and never retry or catch errors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use core_kernel::{BeneficiaryId, Clock};

use crate::beneficiary::{Beneficiary, BeneficiaryChanges, BeneficiaryData};
use crate::criteria::BeneficiaryCriteria;
use crate::error::BeneficiaryError;
use crate::ports::BeneficiaryRepository;

/// Registers a new beneficiary
pub struct CreateBeneficiary {
    repository: Arc<dyn BeneficiaryRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateBeneficiary {
    pub fn new(repository: Arc<dyn BeneficiaryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Validates the data, rejects duplicates and persists the beneficiary
    ///
    /// # Errors
    ///
    /// - a validation error if any field is invalid (nothing is persisted)
    /// - `AlreadyExists` if name, phone and birth date are already registered
    #[instrument(skip_all)]
    pub async fn handle(&self, data: BeneficiaryData) -> Result<Beneficiary, BeneficiaryError> {
        let beneficiary = Beneficiary::create(data, self.clock.as_ref())?;

        if self.repository.exists(&beneficiary).await? {
            warn!("Rejected duplicate beneficiary");
            return Err(BeneficiaryError::AlreadyExists);
        }

        let saved = self.repository.save(&beneficiary).await?;
        info!(beneficiary_id = %saved.id(), "Beneficiary created");
        Ok(saved)
    }
}

/// Finds beneficiaries by partial criteria
pub struct FindBeneficiaries {
    repository: Arc<dyn BeneficiaryRepository>,
}

impl FindBeneficiaries {
    pub fn new(repository: Arc<dyn BeneficiaryRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn handle(&self, criteria: BeneficiaryCriteria) -> Result<Vec<Beneficiary>, BeneficiaryError> {
        Ok(self.repository.find(&criteria).await?)
    }
}

/// Lists every beneficiary, ordered by name
pub struct ListBeneficiaries {
    repository: Arc<dyn BeneficiaryRepository>,
}

impl ListBeneficiaries {
    pub fn new(repository: Arc<dyn BeneficiaryRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn handle(&self) -> Result<Vec<Beneficiary>, BeneficiaryError> {
        Ok(self.repository.find_all().await?)
    }
}

/// Request for updating a beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBeneficiaryRequest {
    pub id: BeneficiaryId,
    pub data: BeneficiaryChanges,
}

/// Changes the name and/or phone of a beneficiary
pub struct UpdateBeneficiary {
    repository: Arc<dyn BeneficiaryRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateBeneficiary {
    pub fn new(repository: Arc<dyn BeneficiaryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Loads, updates and saves the beneficiary
    ///
    /// # Errors
    ///
    /// - `NotFound` if no beneficiary has the id
    /// - a validation error from the entity (nothing is persisted)
    #[instrument(skip_all, fields(beneficiary_id = %request.id))]
    pub async fn handle(&self, request: UpdateBeneficiaryRequest) -> Result<Beneficiary, BeneficiaryError> {
        let mut beneficiary = self
            .repository
            .find_by_id(request.id)
            .await?
            .ok_or(BeneficiaryError::NotFound)?;

        beneficiary.update(request.data, self.clock.as_ref())?;

        let saved = self.repository.save(&beneficiary).await?;
        info!("Beneficiary updated");
        Ok(saved)
    }
}

/// Deletes a beneficiary
pub struct RemoveBeneficiary {
    repository: Arc<dyn BeneficiaryRepository>,
}

impl RemoveBeneficiary {
    pub fn new(repository: Arc<dyn BeneficiaryRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// `NotFound` if no beneficiary has the id, including when it was
    /// already removed.
    #[instrument(skip(self))]
    pub async fn handle(&self, id: BeneficiaryId) -> Result<(), BeneficiaryError> {
        let beneficiary = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BeneficiaryError::NotFound)?;

        self.repository.remove(&beneficiary).await?;
        info!("Beneficiary removed");
        Ok(())
    }
}
