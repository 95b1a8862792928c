//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the registry using SQLx: connection pool
//! configuration, embedded migrations, and the repository adapters for
//! beneficiaries and documents.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresDocumentRepository};
//!
//! let pool = create_pool(DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let documents = PostgresDocumentRepository::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod filter;
pub mod migrate;
pub mod pool;

pub use adapters::{PostgresBeneficiaryRepository, PostgresDocumentRepository};
pub use error::DatabaseError;
pub use migrate::{run_migrations, MIGRATOR};
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
