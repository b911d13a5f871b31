//! Core post types for bulletin.
//!
//! This module defines the single entity the board stores: a short text
//! post with an optional author and its creation time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default maximum author length, in characters.
pub const AUTHOR_MAX_CHARS: usize = 30;

/// A single user-submitted message.
///
/// The serialized field names are the persisted layout: `id`, `author`,
/// `content` and `timestamp` (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Post {
    /// Opaque unique token, stable for the life of the post.
    pub id: String,

    /// Author name, possibly empty.
    pub author: String,

    /// Post body. Never empty for posts created through the board.
    pub content: String,

    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Post {
    /// Create a new post at `timestamp` with a freshly generated id.
    ///
    /// The caller is responsible for normalizing `author` and `content`;
    /// see [`normalize_author`] and [`normalize_content`].
    #[must_use]
    pub fn new(author: String, content: String, timestamp: i64) -> Self {
        Self {
            id: generate_id(timestamp),
            author,
            content,
            timestamp,
        }
    }

    /// Check whether the post has an author name.
    #[must_use]
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

/// Generate a post id of the form `<timestamp>-<16 hex digits>`.
///
/// The random suffix comes from a v4 UUID, so two ids minted in the same
/// millisecond still differ.
#[must_use]
pub fn generate_id(timestamp: i64) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{timestamp}-{}", &random[..16])
}

/// Trim an author name and cap it at `max_chars` characters.
#[must_use]
pub fn normalize_author(raw: &str, max_chars: usize) -> String {
    raw.trim().chars().take(max_chars).collect()
}

/// Trim post content. Returns `None` when nothing is left.
#[must_use]
pub fn normalize_content(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
