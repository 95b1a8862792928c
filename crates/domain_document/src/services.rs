//! Document use-case services

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use core_kernel::{Clock, DocumentId, PortError};

use crate::criteria::DocumentCriteria;
use crate::document::{Document, DocumentData};
use crate::error::DocumentError;
use crate::ports::DocumentRepository;

/// Registers a new document
pub struct CreateDocument {
    repository: Arc<dyn DocumentRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateDocument {
    pub fn new(repository: Arc<dyn DocumentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// # Errors
    ///
    /// - a validation error if the description or type is invalid
    /// - `AlreadyExists` if a document with the same description is stored
    #[instrument(skip_all)]
    pub async fn handle(&self, data: DocumentData) -> Result<Document, DocumentError> {
        let document = Document::create(data, self.clock.as_ref())?;

        if self.repository.exists(&document).await? {
            warn!("Rejected duplicate document");
            return Err(DocumentError::AlreadyExists);
        }

        let saved = self.repository.save(&document).await?;
        info!(document_id = %saved.id(), document_type = %saved.document_type(), "Document created");
        Ok(saved)
    }
}

/// Finds documents by partial criteria
pub struct FindDocuments {
    repository: Arc<dyn DocumentRepository>,
}

impl FindDocuments {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn handle(&self, criteria: DocumentCriteria) -> Result<Vec<Document>, DocumentError> {
        Ok(self.repository.find(&criteria).await?)
    }
}

/// Lists every document, newest first
pub struct ListDocuments {
    repository: Arc<dyn DocumentRepository>,
}

impl ListDocuments {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn handle(&self) -> Result<Vec<Document>, DocumentError> {
        Ok(self.repository.find_all().await?)
    }
}

/// Fields accepted when updating a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDocumentData {
    pub description: String,
}

/// Request for updating a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    pub id: DocumentId,
    pub data: UpdateDocumentData,
}

impl UpdateDocumentRequest {
    pub fn new(id: DocumentId, description: impl Into<String>) -> Self {
        Self {
            id,
            data: UpdateDocumentData {
                description: description.into(),
            },
        }
    }
}

/// Changes the description of a document
pub struct UpdateDocument {
    repository: Arc<dyn DocumentRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateDocument {
    pub fn new(repository: Arc<dyn DocumentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// # Errors
    ///
    /// `NotFound` if the document does not exist, including when it is
    /// deleted between the lookup and the write.
    #[instrument(skip_all, fields(document_id = %request.id))]
    pub async fn handle(&self, request: UpdateDocumentRequest) -> Result<Document, DocumentError> {
        let mut document = self
            .repository
            .find_by_id(request.id)
            .await?
            .ok_or(DocumentError::NotFound)?;

        document.update_description(request.data.description, self.clock.as_ref())?;

        let updated = self.repository.update(&document).await.map_err(|error| match error {
            PortError::NotFound { .. } => DocumentError::NotFound,
            other => DocumentError::Repository(other),
        })?;
        info!("Document updated");
        Ok(updated)
    }
}

/// Deletes a document
pub struct RemoveDocument {
    repository: Arc<dyn DocumentRepository>,
}

impl RemoveDocument {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn handle(&self, id: DocumentId) -> Result<(), DocumentError> {
        let document = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(DocumentError::NotFound)?;

        self.repository.remove(&document).await?;
        info!("Document removed");
        Ok(())
    }
}
