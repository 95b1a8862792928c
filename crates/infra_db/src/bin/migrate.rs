//! Registry migration runner
//!
//! Applies the workspace migrations to the database named by `DATABASE_URL`.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/registry cargo run --bin registry-migrate
//! ```
//!
//! # Environment Variables
//!
//! * `DATABASE_URL` - PostgreSQL connection string (required)
//! * `DATABASE_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `RUST_LOG` - Log filter (default: info)

use anyhow::Context;
use infra_db::{create_pool, run_migrations, DatabaseConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    init_tracing();

    let config = DatabaseConfig::from_env().context("loading database configuration")?;
    let pool = create_pool(config).await.context("connecting to database")?;

    run_migrations(&pool).await.context("applying migrations")?;

    pool.close().await;
    tracing::info!("Migrations complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
