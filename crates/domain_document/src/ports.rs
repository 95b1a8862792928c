//! Document Repository Port
//!
//! Implemented by `infra_db::adapters::PostgresDocumentRepository` and by
//! [`memory::InMemoryDocumentRepository`].

use async_trait::async_trait;

use core_kernel::{DocumentId, DomainPort, HealthCheckable, PortError};

use crate::criteria::DocumentCriteria;
use crate::document::Document;

/// Storage contract for documents
///
/// Listing operations return the newest documents first.
#[async_trait]
pub trait DocumentRepository: DomainPort + HealthCheckable {
    /// Returns true if a document with exactly the same description is stored
    async fn exists(&self, candidate: &Document) -> Result<bool, PortError>;

    /// Inserts the document, or updates the stored row with the same id
    async fn save(&self, document: &Document) -> Result<Document, PortError>;

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, PortError>;

    /// Writes the description and `updated_at` of an existing document
    ///
    /// Fails with [`PortError::NotFound`] when the row no longer exists.
    async fn update(&self, document: &Document) -> Result<Document, PortError>;

    /// Deletes the document's row; deleting a missing row is not an error
    async fn remove(&self, document: &Document) -> Result<(), PortError>;

    async fn find_all(&self) -> Result<Vec<Document>, PortError>;

    /// Lists documents matching the criteria, in `find_all` order
    async fn find(&self, criteria: &DocumentCriteria) -> Result<Vec<Document>, PortError>;
}

pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// In-memory implementation of DocumentRepository
    #[derive(Debug, Default)]
    pub struct InMemoryDocumentRepository {
        documents: Arc<RwLock<BTreeMap<DocumentId, Document>>>,
        writes: AtomicUsize,
    }

    impl InMemoryDocumentRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_documents(documents: Vec<Document>) -> Self {
            let repository = Self::new();
            {
                let mut stored = repository.documents.write().await;
                for document in documents {
                    stored.insert(document.id(), document);
                }
            }
            repository
        }

        /// Number of save/update/remove calls made so far
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        pub async fn len(&self) -> usize {
            self.documents.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    fn newest_first(mut documents: Vec<Document>) -> Vec<Document> {
        documents.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        documents
    }

    impl DomainPort for InMemoryDocumentRepository {}

    #[async_trait]
    impl HealthCheckable for InMemoryDocumentRepository {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("in-memory-document-repository", 0)
        }
    }

    #[async_trait]
    impl DocumentRepository for InMemoryDocumentRepository {
        async fn exists(&self, candidate: &Document) -> Result<bool, PortError> {
            let documents = self.documents.read().await;
            Ok(documents
                .values()
                .any(|stored| stored.description() == candidate.description()))
        }

        async fn save(&self, document: &Document) -> Result<Document, PortError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.documents.write().await.insert(document.id(), document.clone());
            Ok(document.clone())
        }

        async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, PortError> {
            Ok(self.documents.read().await.get(&id).cloned())
        }

        async fn update(&self, document: &Document) -> Result<Document, PortError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut documents = self.documents.write().await;
            let stored = documents
                .get_mut(&document.id())
                .ok_or_else(|| PortError::not_found("Document", document.id()))?;
            *stored = document.clone();
            Ok(document.clone())
        }

        async fn remove(&self, document: &Document) -> Result<(), PortError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.documents.write().await.remove(&document.id());
            Ok(())
        }

        async fn find_all(&self) -> Result<Vec<Document>, PortError> {
            let documents = self.documents.read().await;
            Ok(newest_first(documents.values().cloned().collect()))
        }

        async fn find(&self, criteria: &DocumentCriteria) -> Result<Vec<Document>, PortError> {
            let documents = self.documents.read().await;
            Ok(newest_first(
                documents
                    .values()
                    .filter(|document| criteria.matches(document))
                    .cloned()
                    .collect(),
            ))
        }
    }
}
