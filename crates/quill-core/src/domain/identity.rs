use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller, as resolved from a verified token.
///
/// Users themselves live outside this service; an identity is never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

impl Identity {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
