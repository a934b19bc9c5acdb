use thiserror::Error as ThisError;

/// Failures surfaced by an `ArticleRepository`.
#[derive(Debug, ThisError)]
pub enum StorageError {
    /// No row matched the requested id.
    #[error("Article not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
