//! Authentication ports.

use crate::domain::Identity;

/// Token service trait for issuing and verifying identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed, time-bounded token for `identity`.
    fn issue(&self, identity: &Identity) -> Result<String, AuthError>;

    /// Verify a token and return the identity it encodes.
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}
