//! Post lifecycle: validation, ownership and repository orchestration.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Identity, Post, PostChanges};
use crate::error::DomainError;
use crate::ports::{PageRequest, PostFilter, PostRepository};

const ENTITY: &str = "post";

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 50;

/// Largest offset or limit a store can bind (SQL `LIMIT`/`OFFSET` are signed 64-bit).
const MAX_WINDOW: u64 = i64::MAX as u64;

/// Raw create input. Every field is required and must be non-empty.
#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

/// Raw list input; absent values fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct ListPosts {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub category: Option<String>,
}

impl ListPosts {
    /// Resolve the filter and the page window.
    fn resolve(self) -> Result<(PostFilter, PageRequest), DomainError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if page == 0 {
            return Err(DomainError::Validation("page must be at least 1".into()));
        }
        if limit == 0 {
            return Err(DomainError::Validation("limit must be at least 1".into()));
        }

        if limit > MAX_WINDOW {
            return Err(DomainError::Validation("limit is out of range".into()));
        }

        let offset = (page - 1)
            .checked_mul(limit)
            .filter(|offset| *offset <= MAX_WINDOW)
            .ok_or_else(|| DomainError::Validation("page is out of range".into()))?;

        let filter = PostFilter {
            category: self.category.filter(|c| !c.is_empty()),
        };

        Ok((filter, PageRequest { offset, limit }))
    }
}

/// Post service - the create/list/get/update/delete operations.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post authored by `author`.
    pub async fn create(&self, author: &Identity, input: CreatePost) -> Result<Post, DomainError> {
        let title = required("title", input.title)?;
        let content = required("content", input.content)?;
        let category = required("category", input.category)?;

        let post = Post::new(author.id, title, content, category);
        Ok(self.repo.insert(post).await?)
    }

    pub async fn list(&self, input: ListPosts) -> Result<Vec<Post>, DomainError> {
        let (filter, page) = input.resolve()?;
        Ok(self.repo.find_page(&filter, page).await?)
    }

    /// Fetch a post. A malformed id is reported as not found.
    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        let post_id = parse_id(id)?;
        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply `changes` to a post owned by `caller`.
    pub async fn update(
        &self,
        caller: &Identity,
        id: &str,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        let mut post = self.owned(caller, id).await?;

        if let Some(field) = changes.first_empty_field() {
            return Err(DomainError::Validation(format!("{field} must not be empty")));
        }

        post.apply(changes);
        Ok(self.repo.update(post).await?)
    }

    /// Permanently remove a post owned by `caller`.
    pub async fn delete(&self, caller: &Identity, id: &str) -> Result<(), DomainError> {
        let post = self.owned(caller, id).await?;
        Ok(self.repo.delete(post.id).await?)
    }

    async fn owned(&self, caller: &Identity, id: &str) -> Result<Post, DomainError> {
        let post = self.get(id).await?;
        if !post.is_authored_by(caller.id) {
            return Err(DomainError::Forbidden(ENTITY));
        }
        Ok(post)
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, DomainError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::Validation(format!("{field} is required")))
}

fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id).map_err(|_| not_found(id))
}

fn not_found(id: &str) -> DomainError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id: id.to_string(),
    }
}
