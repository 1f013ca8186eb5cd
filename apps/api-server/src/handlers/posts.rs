//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;

use quill_core::DomainError;
use quill_core::domain::{Identity, Post, PostChanges};
use quill_core::service::{CreatePost, ListPosts};
use quill_shared::SuccessResponse;
use quill_shared::dto::{CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        author: post.author.to_string(),
        category: post.category,
        slug: post.slug,
    }
}

/// An empty body reads as `{}`; anything else must be valid JSON for `T`.
fn parse_body<T: DeserializeOwned + Default>(body: &web::Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::Internal(format!("request body: {e}")))
}

/// POST /api/posts
pub async fn create_post(
    CurrentUser(identity): CurrentUser,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = parse_body(&body)?;

    let post = state
        .posts
        .create(
            &identity,
            CreatePost {
                title: req.title,
                content: req.content,
                category: req.category,
            },
        )
        .await?;

    tracing::info!(post_id = %post.id, user_id = %identity.id, slug = %post.slug, "Post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let posts = state
        .posts
        .list(ListPosts {
            page: query.page,
            limit: query.limit,
            category: query.category,
        })
        .await?;

    tracing::debug!(count = posts.len(), "Listed posts");

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&path).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    CurrentUser(identity): CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: UpdatePostRequest = parse_body(&body)?;
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        category: req.category,
    };

    let post = state
        .posts
        .update(&identity, &path, changes)
        .await
        .inspect_err(|e| log_denial(e, &identity, &path))?;

    tracing::info!(post_id = %post.id, user_id = %identity.id, "Post updated");

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    CurrentUser(identity): CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(&identity, &path)
        .await
        .inspect_err(|e| log_denial(e, &identity, &path))?;

    tracing::info!(post_id = %path, user_id = %identity.id, "Post deleted");

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

fn log_denial(err: &DomainError, identity: &Identity, id: &str) {
    if matches!(err, DomainError::Forbidden(_)) {
        tracing::warn!(post_id = %id, user_id = %identity.id, "Ownership check failed");
    }
}
