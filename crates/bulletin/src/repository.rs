//! The in-memory post collection for one session.

use tracing::debug;

use crate::post::Post;

/// Posts for the active session, newest first.
///
/// This is the single source of truth for rendering. Every method keeps the
/// list sorted by descending timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostList {
    posts: Vec<Post>,
}

impl PostList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from loaded posts, sorting them newest first.
    #[must_use]
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        sort_newest_first(&mut posts);
        Self { posts }
    }

    /// Insert a new post at the front.
    ///
    /// A post older than the current head (clock skew) is placed at its
    /// sorted position instead.
    pub fn insert_front(&mut self, post: Post) {
        let index = self
            .posts
            .partition_point(|existing| existing.timestamp > post.timestamp);
        debug!(id = %post.id, index, "inserting post");
        self.posts.insert(index, post);
    }

    /// Remove the post with the given id.
    ///
    /// Returns `None` if no such post exists; that is not an error.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Post> {
        self.take(id).map(|(_, post)| post)
    }

    /// Remove the post with the given id, along with the index it held.
    pub(crate) fn take(&mut self, id: &str) -> Option<(usize, Post)> {
        let index = self.posts.iter().position(|post| post.id == id)?;
        Some((index, self.posts.remove(index)))
    }

    /// Put back a post taken from `index` by [`PostList::take`].
    ///
    /// Must be called before any other change to the list.
    pub(crate) fn restore(&mut self, index: usize, post: Post) {
        let index = index.min(self.posts.len());
        self.posts.insert(index, post);
    }

    /// Get a post by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Check whether a post with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The posts, newest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Post] {
        &self.posts
    }

    /// Iterate over the posts, newest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }

    /// Number of posts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Check if there are no posts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl<'a> IntoIterator for &'a PostList {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Stable sort by descending timestamp.
pub(crate) fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
