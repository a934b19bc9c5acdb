use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use super::ArticleRepository;
use super::schema::POSTGRES_INIT;
use crate::error::StorageError;
use crate::model::{Article, NewArticle};

pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub async fn connect(options: PgConnectOptions) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(POSTGRES_INIT).execute(&self.pool).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Article>, StorageError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id::BIGINT AS id, COALESCE(title, '') AS title, COALESCE(content, '') AS content
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
            SELECT id::BIGINT AS id, COALESCE(title, '') AS title, COALESCE(content, '') AS content
            FROM articles
            WHERE id = $1
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
            VALUES ($1, $2)
            RETURNING id::BIGINT AS id, COALESCE(title, '') AS title, COALESCE(content, '') AS content
            "#,
        )
        .bind(&article.title)
        .bind(&article.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_by_id(&self, id: i64, article: &NewArticle) -> Result<u64, StorageError> {
        let res = sqlx::query("UPDATE articles SET title = $1, content = $2 WHERE id = $3")
            .bind(&article.title)
            .bind(&article.content)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StorageError> {
        let res = sqlx::query("DELETE FROM articles WHERE id = $1")
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
