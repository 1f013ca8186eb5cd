//! Authentication extractor - the gate in front of mutating post routes.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use quill_core::domain::Identity;
use quill_core::ports::AuthError;

use super::error::AppError;
use crate::state::AppState;

/// Authenticated caller extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(CurrentUser(identity): CurrentUser) -> impl Responder {
///     format!("Hello, user {}!", identity.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// The value must be exactly two space-separated parts with the scheme `Bearer`.
pub fn bearer_token(value: Option<&header::HeaderValue>) -> Result<&str, AuthError> {
    let value = value.ok_or(AuthError::MissingAuth)?;
    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(AppError::Internal("AppState not found in app data".to_string()));
    };

    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    Ok(state.tokens.verify(token)?)
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(CurrentUser))
    }
}
