//! PostgreSQL Document Adapter
//!
//! Implements `DocumentRepository` over the `documents` table. The document
//! type is stored as its category code.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use core_kernel::record::RecordProps;
use core_kernel::{Clock, DefaultClock, DocumentId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_document::document::fields;
use domain_document::{Document, DocumentCriteria, DocumentData, DocumentRepository};

use crate::error::DatabaseError;
use crate::filter::{push_filters, ColumnTable};

const ADAPTER_ID: &str = "postgres-document-repository";

const SELECT_COLUMNS: &str = "SELECT id, document_type, description, created_at, updated_at FROM documents";

const ORDER_BY: &str = " ORDER BY created_at DESC, id ASC";

/// Logical field to column
pub const COLUMNS: ColumnTable = &[
    (fields::ID, "id"),
    (fields::DOCUMENT_TYPE, "document_type"),
    (fields::DESCRIPTION, "description"),
];

#[derive(Debug, Clone, FromRow)]
struct DocumentRow {
    id: Uuid,
    document_type: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// PostgreSQL-backed implementation of `DocumentRepository`
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PostgresDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    pub fn with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    fn to_entity(&self, row: DocumentRow) -> Result<Document, PortError> {
        let data = DocumentData::raw(row.document_type, row.description);
        let props = RecordProps::new(row.id.to_string(), row.created_at, row.updated_at);

        Document::restore(data, &props, self.clock.as_ref())
            .map_err(|e| PortError::transformation(format!("Stored document {} is invalid: {}", row.id, e)))
    }

    fn to_entities(&self, rows: Vec<DocumentRow>) -> Result<Vec<Document>, PortError> {
        rows.into_iter().map(|row| self.to_entity(row)).collect()
    }
}

impl std::fmt::Debug for PostgresDocumentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDocumentRepository")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl DomainPort for PostgresDocumentRepository {}

#[async_trait]
impl HealthCheckable for PostgresDocumentRepository {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    #[instrument(skip_all)]
    async fn exists(&self, candidate: &Document) -> Result<bool, PortError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM documents WHERE description = $1)")
            .bind(candidate.description())
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(exists)
    }

    #[instrument(skip_all, fields(document_id = %document.id()))]
    async fn save(&self, document: &Document) -> Result<Document, PortError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (id, document_type, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                document_type = EXCLUDED.document_type,
                description = EXCLUDED.description,
                updated_at = EXCLUDED.updated_at
            RETURNING id, document_type, description, created_at, updated_at
            "#,
        )
        .bind(Uuid::from(document.id()))
        .bind(document.document_type().as_str())
        .bind(document.description())
        .bind(document.created_at())
        .bind(document.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        info!("Document row written");
        self.to_entity(row)
    }

    #[instrument(skip(self), fields(document_id = %id))]
    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, PortError> {
        debug!("Fetching document by ID");

        let row = sqlx::query_as::<_, DocumentRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        row.map(|row| self.to_entity(row)).transpose()
    }

    #[instrument(skip_all, fields(document_id = %document.id()))]
    async fn update(&self, document: &Document) -> Result<Document, PortError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET description = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, document_type, description, created_at, updated_at
            "#,
        )
        .bind(Uuid::from(document.id()))
        .bind(document.description())
        .bind(document.updated_at())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        match row {
            Some(row) => {
                info!("Document row updated");
                self.to_entity(row)
            }
            None => {
                warn!("Document row missing on update");
                Err(PortError::not_found("Document", document.id()))
            }
        }
    }

    #[instrument(skip_all, fields(document_id = %document.id()))]
    async fn remove(&self, document: &Document) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(Uuid::from(document.id()))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        info!(rows = result.rows_affected(), "Document row deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Document>, PortError> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!("{SELECT_COLUMNS}{ORDER_BY}"))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(count = rows.len(), "Listed documents");
        self.to_entities(rows)
    }

    #[instrument(skip(self))]
    async fn find(&self, criteria: &DocumentCriteria) -> Result<Vec<Document>, PortError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut builder, &criteria.filters(), COLUMNS)?;
        builder.push(ORDER_BY);

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(count = rows.len(), "Found documents");
        self.to_entities(rows)
    }
}
