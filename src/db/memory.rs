use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::ArticleRepository;
use crate::error::StorageError;
use crate::model::{Article, NewArticle};

struct MemoryState {
    next_id: i64,
    articles: BTreeMap<i64, Article>,
}

/// Articles held in process memory, keyed by id. Ids start at 1 and are never reused.
pub struct MemoryArticleRepository {
    state: Mutex<MemoryState>,
}

impl MemoryArticleRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: 1,
                articles: BTreeMap::new(),
            }),
        }
    }

    // A panic mid-operation cannot leave the map half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryArticleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticleRepository {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Article>, StorageError> {
        Ok(self.lock().articles.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Article, StorageError> {
        self.lock()
            .articles
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert(&self, article: &NewArticle) -> Result<Article, StorageError> {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        let stored = article.clone().with_id(id);
        state.articles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_by_id(&self, id: i64, article: &NewArticle) -> Result<u64, StorageError> {
        match self.lock().articles.get_mut(&id) {
            Some(existing) => {
                existing.title.clone_from(&article.title);
                existing.content.clone_from(&article.content);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StorageError> {
        Ok(u64::from(self.lock().articles.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn ids_are_assigned_in_order_and_not_reused() {
        let repo = MemoryArticleRepository::new();
        let first = repo.insert(&NewArticle::new("a", "1")).await.unwrap();
        let second = repo.insert(&NewArticle::new("b", "2")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert_eq!(repo.delete_by_id(second.id).await.unwrap(), 1);
        let third = repo.insert(&NewArticle::new("c", "3")).await.unwrap();
        assert_eq!(third.id, 3);

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[tokio::test]
    async fn update_and_delete_report_affected_rows() {
        let repo = MemoryArticleRepository::new();
        assert_eq!(repo.update_by_id(9, &NewArticle::new("x", "y")).await.unwrap(), 0);
        assert!(repo.list_all().await.unwrap().is_empty());

        let created = repo.insert(&NewArticle::new("Hello", "World")).await.unwrap();
        let affected = repo
            .update_by_id(created.id, &NewArticle::new("Hi", "There"))
            .await
            .unwrap();
        assert_eq!(affected, 1);
        assert_eq!(
            repo.get_by_id(created.id).await.unwrap(),
            NewArticle::new("Hi", "There").with_id(created.id)
        );

        assert_eq!(repo.delete_by_id(created.id).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(created.id).await.unwrap(), 0);
        assert!(matches!(
            repo.get_by_id(created.id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let repo = Arc::new(MemoryArticleRepository::new());
        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert(&NewArticle::new(format!("t{i}"), "c"))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(repo.list_all().await.unwrap().len(), 32);
    }
}
