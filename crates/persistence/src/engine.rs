//! Storage engine selection.
//!
//! The application asks for an engine by key (usually from `DB_ENGINE`).
//! Unknown or unusable engines fall back to `memory`.

use std::sync::Arc;

use domain::{CustomerRepository, ProductRepository};
use sqlx::postgres::PgPoolOptions;

use crate::error::Result;
use crate::memory::{InMemoryCustomerRepository, InMemoryProductRepository};
use crate::postgres::{PostgresCustomerRepository, PostgresProductRepository, run_migrations};

/// Supported storage engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEngine {
    Memory,
    Postgres,
}

impl StorageEngine {
    /// Parses an engine key. Matching ignores case and surrounding whitespace.
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "memory" => Some(StorageEngine::Memory),
            "postgres" | "postgresql" | "pg" => Some(StorageEngine::Postgres),
            _ => None,
        }
    }

    /// Returns the canonical engine key.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageEngine::Memory => "memory",
            StorageEngine::Postgres => "postgres",
        }
    }

    /// Resolves the engine to use for a requested key.
    ///
    /// Postgres is only usable with a database URL. Anything unknown or
    /// unusable resolves to `Memory`.
    pub fn select(requested: &str, has_database_url: bool) -> Self {
        match Self::parse(requested) {
            Some(StorageEngine::Postgres) if has_database_url => StorageEngine::Postgres,
            Some(StorageEngine::Postgres) => {
                tracing::warn!(
                    requested,
                    "postgres engine requested without DATABASE_URL, falling back to memory"
                );
                StorageEngine::Memory
            }
            Some(StorageEngine::Memory) => StorageEngine::Memory,
            None => {
                tracing::warn!(requested, "unknown storage engine, falling back to memory");
                StorageEngine::Memory
            }
        }
    }
}

impl std::fmt::Display for StorageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The repository singletons for one storage engine.
#[derive(Clone)]
pub struct Repositories {
    pub engine: StorageEngine,
    pub products: Arc<dyn ProductRepository>,
    pub customers: Arc<dyn CustomerRepository>,
}

impl Repositories {
    /// In-memory repositories, empty.
    pub fn in_memory() -> Self {
        Self {
            engine: StorageEngine::Memory,
            products: Arc::new(InMemoryProductRepository::new()),
            customers: Arc::new(InMemoryCustomerRepository::new()),
        }
    }

    /// Connects to PostgreSQL and applies migrations.
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        run_migrations(&pool).await?;

        Ok(Self {
            engine: StorageEngine::Postgres,
            products: Arc::new(PostgresProductRepository::new(pool.clone())),
            customers: Arc::new(PostgresCustomerRepository::new(pool)),
        })
    }

    /// Builds the repositories for the requested engine key.
    ///
    /// A Postgres connection failure is returned as an error rather than
    /// silently falling back.
    pub async fn connect(requested: &str, database_url: Option<&str>) -> Result<Self> {
        let engine = StorageEngine::select(requested, database_url.is_some());
        let repositories = match (engine, database_url) {
            (StorageEngine::Postgres, Some(url)) => Self::postgres(url).await?,
            _ => Self::in_memory(),
        };

        tracing::info!(engine = %repositories.engine, "storage engine selected");
        Ok(repositories)
    }
}
