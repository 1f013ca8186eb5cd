//! Error handling: typed failures and the catch-all 500 boundary.

use actix_web::{
    HttpMessage, HttpResponse, ResponseError,
    dev::ServiceResponse,
    http::StatusCode,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
};
use quill_core::DomainError;
use quill_core::error::RepoError;
use quill_core::ports::AuthError;
use quill_shared::ErrorResponse;
use std::fmt;

use crate::observability::RequestId;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Unauthorized,
    Forbidden,
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation(_) => ErrorResponse::validation_failed(),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Forbidden => ErrorResponse::forbidden(),
            // Not found carries no body.
            AppError::NotFound(_) => return HttpResponse::NotFound().finish(),
            // Logged by the error boundary.
            AppError::Internal(_) => ErrorResponse::internal_error(),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Forbidden(_) => AppError::Forbidden,
            DomainError::Repository(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Connection(msg) => AppError::Internal(format!("database connection: {msg}")),
            RepoError::Query(msg) => AppError::Internal(format!("database query: {msg}")),
            RepoError::Constraint(msg) => AppError::Internal(format!("constraint: {msg}")),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Encoding(msg) => AppError::Internal(msg),
            other => {
                tracing::debug!(reason = %other, "Rejected credentials");
                AppError::Unauthorized
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Outermost boundary: every 500 is logged and its body replaced by the
/// generic internal-failure message.
pub fn error_boundary<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, internal_failure)
}

fn internal_failure<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let request_id = res
        .request()
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_owned())
        .unwrap_or_default();

    match res.response().error() {
        Some(err) => tracing::error!(
            request_id = %request_id,
            method = %res.request().method(),
            path = %res.request().path(),
            error = %err,
            "Unhandled failure"
        ),
        None => tracing::error!(
            request_id = %request_id,
            method = %res.request().method(),
            path = %res.request().path(),
            "Unhandled failure"
        ),
    }

    let (req, _) = res.into_parts();
    let response = HttpResponse::InternalServerError().json(ErrorResponse::internal_error());

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (
                AppError::from(DomainError::Validation("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(DomainError::Forbidden("post")),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::from(DomainError::NotFound {
                    entity_type: "post",
                    id: "abc".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(DomainError::Repository(RepoError::Query("boom".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(AuthError::TokenExpired),
                StatusCode::UNAUTHORIZED,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[actix_web::test]
    async fn test_internal_response_hides_detail() {
        let err = AppError::Internal("secret connection string".into());

        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            r#"{"error":"Internal Server Error"}"#
        );
    }
}
