//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PageRequest, PostFilter, PostRepository};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&entity.id) {
            return Err(RepoError::Constraint(format!("id {} already exists", entity.id)));
        }
        if store.values().any(|p| p.slug == entity.slug) {
            return Err(RepoError::Constraint(format!(
                "slug {} already exists",
                entity.slug
            )));
        }

        store.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let existing = store.get_mut(&entity.id).ok_or(RepoError::NotFound)?;

        // author, slug and created_at are fixed at insert.
        existing.title = entity.title;
        existing.content = entity.content;
        existing.category = entity.category;
        existing.updated_at = entity.updated_at;

        Ok(existing.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<&Post> = store
            .values()
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|category| &p.category == category)
            })
            .collect();
        posts.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);

        Ok(posts
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;

    fn post_at(title: &str, category: &str, minutes_ago: i64) -> Post {
        let mut post = Post::new(
            Uuid::new_v4(),
            title.to_string(),
            "Body".to_string(),
            category.to_string(),
        );
        post.created_at = Utc::now() - TimeDelta::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let post = post_at("First", "news", 0);

        repo.insert(post.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(post.id).await.unwrap(), Some(post));
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let post = post_at("First", "news", 0);
        repo.insert(post.clone()).await.unwrap();

        repo.delete(post.id).await.unwrap();

        assert!(matches!(
            repo.delete(post.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let post = post_at("Gone", "news", 0);
        repo.insert(post.clone()).await.unwrap();
        repo.delete(post.id).await.unwrap();

        assert!(matches!(
            repo.update(post.clone()).await,
            Err(RepoError::NotFound)
        ));
        assert_eq!(repo.find_by_id(post.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_keeps_immutable_fields() {
        let repo = InMemoryPostRepository::new();
        let post = post_at("Kept", "news", 0);
        repo.insert(post.clone()).await.unwrap();

        let mut changed = post.clone();
        changed.title = "Changed".to_string();
        changed.slug = "forged".to_string();
        changed.author = Uuid::new_v4();

        let stored = repo.update(changed).await.unwrap();

        assert_eq!(stored.title, "Changed");
        assert_eq!(stored.slug, post.slug);
        assert_eq!(stored.author, post.author);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let repo = InMemoryPostRepository::new();
        let first = post_at("First", "news", 0);
        let mut second = post_at("Second", "news", 0);
        second.slug = first.slug.clone();

        repo.insert(first).await.unwrap();

        assert!(matches!(
            repo.insert(second).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_find_page_orders_by_creation() {
        let repo = InMemoryPostRepository::new();
        repo.insert(post_at("Newest", "news", 1)).await.unwrap();
        repo.insert(post_at("Oldest", "news", 30)).await.unwrap();
        repo.insert(post_at("Middle", "tech", 10)).await.unwrap();

        let all = repo
            .find_page(
                &PostFilter::default(),
                PageRequest {
                    offset: 0,
                    limit: 10,
                },
            )
            .await
            .unwrap();
        let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Oldest", "Middle", "Newest"]);

        let news_tail = repo
            .find_page(
                &PostFilter {
                    category: Some("news".to_string()),
                },
                PageRequest {
                    offset: 1,
                    limit: 10,
                },
            )
            .await
            .unwrap();
        assert_eq!(news_tail.len(), 1);
        assert_eq!(news_tail[0].title, "Newest");
    }
}
