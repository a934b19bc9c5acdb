//! Article storage.
//!
//! Layout:
//! - `schema.rs`: DDL for the `articles` table (Postgres and SQLite dialects)
//! - `postgres.rs` / `sqlite.rs`: `sqlx`-backed repositories
//! - `memory.rs`: process-local repository, no persistence

pub mod memory;
pub mod postgres;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryArticleRepository;
pub use postgres::PgArticleRepository;
pub use sqlite::SqliteArticleRepository;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StorageBackend};
use crate::error::StorageError;
use crate::model::{Article, NewArticle};

/// Translates article operations into storage statements.
///
/// Each call is its own unit of work; nothing spans calls. Implementations must only ever pass
/// user input as bound parameters.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Creates the `articles` table if absent. A failure here is fatal at startup.
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// All rows ordered by id. Empty table => empty vec.
    async fn list_all(&self) -> Result<Vec<Article>, StorageError>;

    /// `StorageError::NotFound` when no row has this id.
    async fn get_by_id(&self, id: i64) -> Result<Article, StorageError>;

    /// Writes a row and returns it with the storage-assigned id.
    async fn insert(&self, article: &NewArticle) -> Result<Article, StorageError>;

    /// Returns the number of rows written (0 or 1).
    async fn update_by_id(&self, id: i64, article: &NewArticle) -> Result<u64, StorageError>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete_by_id(&self, id: i64) -> Result<u64, StorageError>;

    /// Releases pooled connections. Default: nothing to release.
    async fn close(&self) {}
}

/// Opens the repository selected by `basic.storage`. Does not create the schema.
pub async fn connect(cfg: &Config) -> Result<Arc<dyn ArticleRepository>, StorageError> {
    let repo: Arc<dyn ArticleRepository> = match cfg.basic.storage {
        StorageBackend::Postgres => {
            Arc::new(PgArticleRepository::connect(cfg.database.connect_options()).await?)
        }
        StorageBackend::Sqlite => {
            Arc::new(SqliteArticleRepository::connect(&cfg.basic.sqlite_url).await?)
        }
        StorageBackend::Memory => Arc::new(MemoryArticleRepository::new()),
    };
    info!(storage = %cfg.basic.storage, "Connected to the database");
    Ok(repo)
}
