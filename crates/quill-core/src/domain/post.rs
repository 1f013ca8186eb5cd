use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of trailing id characters appended to a slug.
const SLUG_SUFFIX_LEN: usize = 6;

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: Uuid,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of post fields a caller may change after creation.
///
/// `id`, `author` and `slug` are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl Post {
    /// Create a new post owned by `author`. The slug is derived here and never recomputed.
    pub fn new(author: Uuid, title: String, content: String, category: String) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            slug: slugify(&title, id),
            id,
            title,
            content,
            category,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author == user_id
    }

    /// Merge `changes` onto this post, leaving absent fields untouched.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        self.updated_at = Utc::now();
    }
}

impl PostChanges {
    /// Name of the first provided field that is empty, if any.
    pub fn first_empty_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("content", &self.content),
            ("category", &self.category),
        ]
        .into_iter()
        .find(|(_, value)| value.as_deref() == Some(""))
        .map(|(name, _)| name)
    }
}

/// Lowercase `title`, collapse each whitespace run to `-`, then append the
/// last characters of `id`.
pub fn slugify(title: &str, id: Uuid) -> String {
    let mut slug = String::with_capacity(title.len() + SLUG_SUFFIX_LEN + 1);
    let mut in_whitespace = false;

    for ch in title.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }

    let simple = id.simple().to_string();
    slug.push('-');
    slug.push_str(&simple[simple.len() - SLUG_SUFFIX_LEN..]);
    slug
}
