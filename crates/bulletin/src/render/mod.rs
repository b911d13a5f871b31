//! Turning the post list into something a user can see.
//!
//! Rendering happens in two steps. [`build_view`] is a pure function from
//! posts to a [`View`]; a [`Renderer`] then paints that view, replacing
//! whatever it painted before. User text is always carried as plain text and
//! each renderer escapes it for its own medium.

mod html;
mod json;
mod locale;
mod terminal;

use serde::Serialize;

use crate::error::Result;
use crate::post::Post;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use locale::{DateFormatter, Locale};
pub use terminal::{sanitize_line, TerminalRenderer};

/// One post as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    /// Post id, used to resolve clicks back to the post.
    pub id: String,
    /// Author name, or the anonymous label.
    pub author: String,
    /// Whether `author` is the anonymous label.
    pub anonymous: bool,
    /// Locale-formatted creation time.
    pub display_time: String,
    /// RFC 3339 creation time in UTC.
    pub datetime: String,
    /// Post content, verbatim.
    pub content: String,
    /// Accessible label of the card's delete control.
    pub delete_label: String,
}

/// The complete contents of the post list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// No posts; only the empty-state message is shown.
    Empty {
        /// The empty-state message.
        message: String,
    },
    /// One card per post, newest first.
    Posts {
        /// The cards in display order.
        cards: Vec<PostCard>,
    },
}

impl View {
    /// The cards in this view (none for the empty state).
    #[must_use]
    pub fn cards(&self) -> &[PostCard] {
        match self {
            Self::Empty { .. } => &[],
            Self::Posts { cards } => cards,
        }
    }

    /// Check if this is the empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Build the view for `posts`, keeping their order.
#[must_use]
pub fn build_view(posts: &[Post], locale: Locale, dates: &DateFormatter) -> View {
    if posts.is_empty() {
        return View::Empty {
            message: locale.empty_message().to_string(),
        };
    }

    let cards = posts
        .iter()
        .map(|post| PostCard {
            id: post.id.clone(),
            author: if post.has_author() {
                post.author.clone()
            } else {
                locale.anonymous_label().to_string()
            },
            anonymous: !post.has_author(),
            display_time: dates.display(post.timestamp),
            datetime: DateFormatter::iso(post.timestamp),
            content: post.content.clone(),
            delete_label: locale.delete_label().to_string(),
        })
        .collect();

    View::Posts { cards }
}

/// Something that can display a [`View`].
///
/// Each call replaces everything shown by the previous call.
pub trait Renderer {
    /// Display `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn render(&mut self, view: &View) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, view: &View) -> Result<()> {
        (**self).render(view)
    }
}

/// Keeps every view it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<View>,
}

impl RecordingRenderer {
    /// Create a renderer with no frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All rendered views, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[View] {
        &self.frames
    }

    /// The most recent view.
    #[must_use]
    pub fn last(&self) -> Option<&View> {
        self.frames.last()
    }

    /// Number of renders so far.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.frames.len()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &View) -> Result<()> {
        self.frames.push(view.clone());
        Ok(())
    }
}
