//! `bulletin` - a small bulletin board kept on the local machine
//!
//! Posts are short messages with an optional author. They are stored as one
//! collection under a single key of a local key-value store, shown newest
//! first, and can be deleted one at a time.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod board;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod persist;
pub mod post;
pub mod render;
pub mod repository;
pub mod storage;

pub use board::{Board, BoardSettings, Click, ClickOutcome, FormField, PostForm, SubmitOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use persist::PostStore;
pub use post::Post;
pub use render::{build_view, Renderer, View};
pub use repository::PostList;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
