//! Reading and writing the post collection.
//!
//! The whole collection lives under one store key as a JSON document:
//!
//! ```json
//! {"version": 1, "posts": [{"id": "…", "author": "…", "content": "…", "timestamp": 1700000000000}]}
//! ```
//!
//! Older boards wrote the bare array without the envelope; that layout is
//! read as version 0 and rewritten as version 1 on the next save.
//!
//! Loading never fails. A value that cannot be read is logged and treated as
//! an empty board; it is left in the store untouched until the next save
//! overwrites it.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::post::Post;
use crate::repository::sort_newest_first;
use crate::storage::KeyValueStore;

/// Default store key for the post collection.
pub const DEFAULT_KEY: &str = "bulletin-board-posts";

/// Version written by [`PostStore::save`].
pub const FORMAT_VERSION: u64 = 1;

/// Why a persisted value could not be used.
#[derive(Debug, Error)]
enum LoadError {
    #[error("store read failed: {0}")]
    Read(#[source] Error),

    #[error("value is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected layout: {0}")]
    Shape(&'static str),

    #[error("format version {0} is newer than supported version {max}", max = FORMAT_VERSION)]
    UnsupportedVersion(u64),
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    posts: &'a [Post],
}

/// The persistence adapter: one store, one key, the whole collection.
#[derive(Debug)]
pub struct PostStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> PostStore<S> {
    /// Bind the adapter to `key` in `backend`.
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The store key holding the collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// The underlying store, mutably.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Load the collection, newest first.
    ///
    /// Returns an empty list when nothing is stored or the stored value is
    /// unreadable. Elements with missing timestamps get `clock`'s current time.
    pub fn load(&self, clock: &impl Clock) -> Vec<Post> {
        match self.try_load(clock) {
            Ok(posts) => {
                info!(key = %self.key, count = posts.len(), "loaded posts");
                posts
            }
            Err(reason) => {
                error!(key = %self.key, %reason, "failed to load posts, starting with an empty board");
                Vec::new()
            }
        }
    }

    fn try_load(&self, clock: &impl Clock) -> std::result::Result<Vec<Post>, LoadError> {
        let Some(raw) = self.backend.get_item(&self.key).map_err(LoadError::Read)? else {
            debug!(key = %self.key, "no stored posts");
            return Ok(Vec::new());
        };
        decode(&raw, clock.now_millis())
    }

    /// Overwrite the stored collection with `posts`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the store rejects the write.
    pub fn save(&mut self, posts: &[Post]) -> Result<()> {
        let json = serde_json::to_string(&Envelope {
            version: FORMAT_VERSION,
            posts,
        })?;
        self.backend
            .set_item(&self.key, &json)
            .map_err(|source| Error::storage_write(&self.key, source))?;
        debug!(key = %self.key, count = posts.len(), "saved posts");
        Ok(())
    }

    /// Remove the stored collection. Returns `true` if anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the store rejects the removal.
    pub fn clear(&mut self) -> Result<bool> {
        self.backend
            .remove_item(&self.key)
            .map_err(|source| Error::storage_write(&self.key, source))
    }
}

/// Decode a stored value into posts sorted newest first.
fn decode(raw: &str, now: i64) -> std::result::Result<Vec<Post>, LoadError> {
    let items = match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => {
            debug!("reading unversioned post array");
            items
        }
        Value::Object(map) => envelope_posts(map)?,
        _ => return Err(LoadError::Shape("expected an array or a versioned object")),
    };

    let total = items.len();
    let mut posts: Vec<Post> = items
        .into_iter()
        .filter_map(|item| coerce_post(item, now))
        .collect();
    if posts.len() < total {
        warn!(discarded = total - posts.len(), "discarded non-object entries");
    }

    sort_newest_first(&mut posts);
    Ok(posts)
}

fn envelope_posts(mut map: Map<String, Value>) -> std::result::Result<Vec<Value>, LoadError> {
    let version = map
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(LoadError::Shape("missing or non-numeric version"))?;
    if version > FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion(version));
    }
    match map.remove("posts") {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(LoadError::Shape("posts is not an array")),
        None => Err(LoadError::Shape("missing posts")),
    }
}

fn coerce_post(item: Value, now: i64) -> Option<Post> {
    let Value::Object(map) = item else {
        return None;
    };
    Some(Post {
        id: coerce_text(map.get("id")),
        author: coerce_text(map.get("author")),
        content: coerce_text(map.get("content")),
        timestamp: coerce_timestamp(map.get("timestamp")).unwrap_or(now),
    })
}

/// Strings pass through; scalars become their text; missing or null is empty.
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_timestamp(value: Option<&Value>) -> Option<i64> {
    let float_millis = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_millis)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_millis))
        }
        _ => None,
    }
}
