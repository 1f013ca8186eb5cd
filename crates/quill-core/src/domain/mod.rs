//! Domain entities - the core business objects.

mod identity;

mod post;

pub use identity::Identity;
pub use post::{Post, PostChanges, slugify};
