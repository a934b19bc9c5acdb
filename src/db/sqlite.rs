use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

use super::ArticleRepository;
use super::schema::SQLITE_INIT;
use crate::error::StorageError;
use crate::model::{Article, NewArticle};

pub struct SqliteArticleRepository {
    pool: SqlitePool,
}

impl SqliteArticleRepository {
    /// Opens (creating if missing) the database file named by `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(SQLITE_INIT).execute(&self.pool).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Article>, StorageError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, COALESCE(title, '') AS title, COALESCE(content, '') AS content
            FROM articles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Article, StorageError> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, COALESCE(title, '') AS title, COALESCE(content, '') AS content
            FROM articles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    async fn insert(&self, article: &NewArticle) -> Result<Article, StorageError> {
        let row = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, content)
            VALUES (?, ?)
            RETURNING id, COALESCE(title, '') AS title, COALESCE(content, '') AS content
            "#,
        )
        .bind(&article.title)
        .bind(&article.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_by_id(&self, id: i64, article: &NewArticle) -> Result<u64, StorageError> {
        let res = sqlx::query("UPDATE articles SET title = ?, content = ? WHERE id = ?")
            .bind(&article.title)
            .bind(&article.content)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StorageError> {
        let res = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Disconnected from the database");
    }
}
