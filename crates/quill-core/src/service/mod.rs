//! Application services - orchestrate domain rules over the ports.

mod posts;

pub use posts::{CreatePost, ListPosts, PostService};
