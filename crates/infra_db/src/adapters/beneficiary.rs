//! PostgreSQL Beneficiary Adapter
//!
//! Implements `BeneficiaryRepository` over the `beneficiaries` table. Every
//! row read back is rebuilt through `Beneficiary::restore`, so a row that
//! breaks a field rule surfaces as `PortError::Transformation` instead of
//! an invalid entity.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use core_kernel::record::RecordProps;
use core_kernel::{
    BeneficiaryId, Clock, DefaultClock, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_beneficiary::beneficiary::fields;
use domain_beneficiary::{Beneficiary, BeneficiaryCriteria, BeneficiaryData, BeneficiaryRepository};

use crate::error::DatabaseError;
use crate::filter::{push_filters, ColumnTable};

const ADAPTER_ID: &str = "postgres-beneficiary-repository";

const SELECT_COLUMNS: &str = "SELECT id, name, phone, birth_date, created_at, updated_at FROM beneficiaries";

/// Matches the in-memory adapter: lowercased name, then byte-wise name and id
const ORDER_BY: &str = r#" ORDER BY lower(name) COLLATE "C" ASC, name COLLATE "C" ASC, id ASC"#;

/// Logical field to column
pub const COLUMNS: ColumnTable = &[
    (fields::ID, "id"),
    (fields::NAME, "name"),
    (fields::PHONE, "phone"),
    (fields::BIRTH_DATE, "birth_date"),
];

/// Database row representation of a beneficiary
#[derive(Debug, Clone, FromRow)]
struct BeneficiaryRow {
    id: Uuid,
    name: String,
    phone: String,
    birth_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// PostgreSQL-backed implementation of `BeneficiaryRepository`
#[derive(Clone)]
pub struct PostgresBeneficiaryRepository {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PostgresBeneficiaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Uses `clock` as "now" when re-validating rows
    pub fn with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    fn to_entity(&self, row: BeneficiaryRow) -> Result<Beneficiary, PortError> {
        let data = BeneficiaryData::new(row.name, row.phone, row.birth_date);
        let props = RecordProps::new(row.id.to_string(), row.created_at, row.updated_at);

        Beneficiary::restore(data, &props, self.clock.as_ref()).map_err(|e| {
            PortError::transformation(format!("Stored beneficiary {} is invalid: {}", row.id, e))
        })
    }

    fn to_entities(&self, rows: Vec<BeneficiaryRow>) -> Result<Vec<Beneficiary>, PortError> {
        rows.into_iter().map(|row| self.to_entity(row)).collect()
    }
}

impl std::fmt::Debug for PostgresBeneficiaryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresBeneficiaryRepository")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl DomainPort for PostgresBeneficiaryRepository {}

#[async_trait]
impl HealthCheckable for PostgresBeneficiaryRepository {
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
impl BeneficiaryRepository for PostgresBeneficiaryRepository {
    #[instrument(skip_all)]
    async fn exists(&self, candidate: &Beneficiary) -> Result<bool, PortError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM beneficiaries WHERE name = $1 AND phone = $2 AND birth_date = $3)",
        )
        .bind(candidate.name())
        .bind(candidate.phone())
        .bind(candidate.birth_date())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(exists)
    }

    #[instrument(skip_all, fields(beneficiary_id = %beneficiary.id()))]
    async fn save(&self, beneficiary: &Beneficiary) -> Result<Beneficiary, PortError> {
        let row = sqlx::query_as::<_, BeneficiaryRow>(
            r#"
            INSERT INTO beneficiaries (id, name, phone, birth_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                birth_date = EXCLUDED.birth_date,
                updated_at = EXCLUDED.updated_at
            RETURNING id, name, phone, birth_date, created_at, updated_at
            "#,
        )
        .bind(Uuid::from(beneficiary.id()))
        .bind(beneficiary.name())
        .bind(beneficiary.phone())
        .bind(beneficiary.birth_date())
        .bind(beneficiary.created_at())
        .bind(beneficiary.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        info!("Beneficiary row written");
        self.to_entity(row)
    }

    #[instrument(skip(self), fields(beneficiary_id = %id))]
    async fn find_by_id(&self, id: BeneficiaryId) -> Result<Option<Beneficiary>, PortError> {
        debug!("Fetching beneficiary by ID");

        let row = sqlx::query_as::<_, BeneficiaryRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        row.map(|row| self.to_entity(row)).transpose()
    }

    #[instrument(skip_all, fields(beneficiary_id = %beneficiary.id()))]
    async fn remove(&self, beneficiary: &Beneficiary) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM beneficiaries WHERE id = $1")
            .bind(Uuid::from(beneficiary.id()))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        info!(rows = result.rows_affected(), "Beneficiary row deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Beneficiary>, PortError> {
        let rows = sqlx::query_as::<_, BeneficiaryRow>(&format!("{SELECT_COLUMNS}{ORDER_BY}"))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(count = rows.len(), "Listed beneficiaries");
        self.to_entities(rows)
    }

    #[instrument(skip(self))]
    async fn find(&self, criteria: &BeneficiaryCriteria) -> Result<Vec<Beneficiary>, PortError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut builder, &criteria.filters(), COLUMNS)?;
        builder.push(ORDER_BY);

        let rows = builder
            .build_query_as::<BeneficiaryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(count = rows.len(), "Found beneficiaries");
        self.to_entities(rows)
    }
}
