//! The board: session state plus the actions a user can take on it.
//!
//! [`Board`] owns the post list, the persistence adapter, the renderer and
//! the clock. Each action runs to completion in one call: mutate the list,
//! save the whole collection, repaint. If the save fails the mutation is
//! undone and the error is returned, so the list never drifts from what is
//! stored.

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::Result;
use crate::persist::PostStore;
use crate::post::{normalize_author, normalize_content, Post, AUTHOR_MAX_CHARS};
use crate::render::{build_view, DateFormatter, Locale, Renderer};
use crate::repository::PostList;
use crate::storage::KeyValueStore;

/// Display and input settings for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSettings {
    /// Locale for labels and time formatting.
    pub locale: Locale,
    /// Formatter for display times.
    pub dates: DateFormatter,
    /// Author names are truncated to this many characters.
    pub author_max_chars: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            dates: DateFormatter::local(Locale::default()),
            author_max_chars: AUTHOR_MAX_CHARS,
        }
    }
}

/// The new-post form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    /// Author field, as typed.
    pub author: String,
    /// Content field, as typed.
    pub content: String,
}

impl PostForm {
    /// A form filled with `author` and `content`.
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

/// A field of the new-post form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// The content field.
    Content,
}

/// What happened to a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The post was created, saved and rendered.
    Created(Post),
    /// Nothing happened; the given field needs attention.
    Rejected {
        /// Field that should receive focus.
        focus: FormField,
    },
}

/// A click inside the post list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Click {
    /// Accessible label of the control that was clicked, if any.
    pub control_label: Option<String>,
    /// Id of the card enclosing the click target, if any.
    pub card_id: Option<String>,
}

impl Click {
    /// A click on the delete control of card `id`.
    pub fn delete_control(id: impl Into<String>, locale: Locale) -> Self {
        Self {
            control_label: Some(locale.delete_label().to_string()),
            card_id: Some(id.into()),
        }
    }
}

/// What happened to a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The post was removed, the list saved and rendered.
    Deleted(Post),
    /// The click did not hit a delete control of a known post.
    Ignored,
}

/// A bulletin board session.
#[derive(Debug)]
pub struct Board<S, R, C> {
    store: PostStore<S>,
    posts: PostList,
    renderer: R,
    clock: C,
    settings: BoardSettings,
}

impl<S, R, C> Board<S, R, C>
where
    S: KeyValueStore,
    R: Renderer,
    C: Clock,
{
    /// Load the stored posts and paint them once.
    ///
    /// A missing or unreadable stored value starts an empty board.
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial render fails.
    pub fn start(
        store: PostStore<S>,
        renderer: R,
        clock: C,
        settings: BoardSettings,
    ) -> Result<Self> {
        let mut board = Self::open(store, renderer, clock, settings);
        board.render()?;
        Ok(board)
    }

    /// Load the stored posts without painting.
    ///
    /// One-shot commands use this so that only the state after the action
    /// is shown.
    pub fn open(store: PostStore<S>, renderer: R, clock: C, settings: BoardSettings) -> Self {
        let posts = PostList::from_posts(store.load(&clock));
        Self {
            store,
            posts,
            renderer,
            clock,
            settings,
        }
    }

    /// Repaint the current list.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer fails.
    pub fn render(&mut self) -> Result<()> {
        let view = build_view(
            self.posts.as_slice(),
            self.settings.locale,
            &self.settings.dates,
        );
        self.renderer.render(&view)
    }

    /// Submit the new-post form.
    ///
    /// Blank content (after trimming) is rejected without touching the list,
    /// the store or the display. On success the content field is cleared
    /// and the author field is left as typed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StorageWrite`] if the post cannot be saved (the
    /// list is left unchanged), or a render error.
    pub fn submit(&mut self, form: &mut PostForm) -> Result<SubmitOutcome> {
        let Some(content) = normalize_content(&form.content) else {
            debug!("rejected submission with blank content");
            return Ok(SubmitOutcome::Rejected {
                focus: FormField::Content,
            });
        };
        let author = normalize_author(&form.author, self.settings.author_max_chars);
        let post = Post::new(author, content, self.clock.now_millis());

        self.posts.insert_front(post.clone());
        if let Err(err) = self.store.save(self.posts.as_slice()) {
            warn!(id = %post.id, error = %err, "save failed, discarding new post");
            self.posts.remove_by_id(&post.id);
            return Err(err);
        }
        info!(id = %post.id, total = self.posts.len(), "created post");

        self.render()?;
        form.content.clear();
        Ok(SubmitOutcome::Created(post))
    }

    /// Handle a click in the post list.
    ///
    /// Only a click on a control labelled with the locale's delete label,
    /// inside a card whose id is on the board, deletes anything.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StorageWrite`] if the list cannot be saved (the
    /// post is put back), or a render error.
    pub fn click(&mut self, click: &Click) -> Result<ClickOutcome> {
        if click.control_label.as_deref() != Some(self.settings.locale.delete_label()) {
            return Ok(ClickOutcome::Ignored);
        }
        let Some(id) = click.card_id.as_deref() else {
            return Ok(ClickOutcome::Ignored);
        };
        let Some((index, removed)) = self.posts.take(id) else {
            debug!(id, "delete of unknown post ignored");
            return Ok(ClickOutcome::Ignored);
        };

        if let Err(err) = self.store.save(self.posts.as_slice()) {
            warn!(id, error = %err, "save failed, restoring post");
            self.posts.restore(index, removed);
            return Err(err);
        }
        info!(id, total = self.posts.len(), "deleted post");

        self.render()?;
        Ok(ClickOutcome::Deleted(removed))
    }

    /// Click the delete control of post `id`.
    ///
    /// # Errors
    ///
    /// See [`Board::click`].
    pub fn delete(&mut self, id: &str) -> Result<ClickOutcome> {
        let click = Click::delete_control(id, self.settings.locale);
        self.click(&click)
    }

    /// Remove every post and the stored value. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StorageWrite`] if the stored value cannot be
    /// removed (the list is left unchanged), or a render error.
    pub fn clear(&mut self) -> Result<usize> {
        self.store.clear()?;
        let removed = std::mem::take(&mut self.posts).len();
        info!(removed, "cleared board");
        self.render()?;
        Ok(removed)
    }

    /// The posts, newest first.
    #[must_use]
    pub fn posts(&self) -> &PostList {
        &self.posts
    }

    /// The persistence adapter.
    pub fn store(&self) -> &PostStore<S> {
        &self.store
    }

    /// The persistence adapter, mutably.
    pub fn store_mut(&mut self) -> &mut PostStore<S> {
        &mut self.store
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The settings this board was started with.
    #[must_use]
    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }
}
