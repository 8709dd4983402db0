//! Post storage.
//!
//! `PostRepository` is the seam between HTTP handlers and the document
//! store. `InMemoryPostRepository` keeps posts in process memory.
//!
//! # Invariants
//! - Listing operations return active posts only, oldest first.
//! - Posts with equal create dates keep insertion order.

use std::sync::RwLock;

use thiserror::Error;

use super::{Page, Post, PostFields};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("post store lock poisoned")]
    LockPoisoned,
    #[error("post with id {0} already exists")]
    DuplicateId(String),
}

/// Storage operations the HTTP layer needs.
pub trait PostRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepositoryError>;

    /// Active posts, oldest first, restricted to `page`.
    fn find_page(&self, page: Page) -> Result<Vec<Post>, RepositoryError>;

    /// Active posts of `category_id`, oldest first, restricted to `page`.
    fn find_page_by_category(
        &self,
        category_id: i64,
        page: Page,
    ) -> Result<Vec<Post>, RepositoryError>;

    fn add(&self, post: Post) -> Result<(), RepositoryError>;

    /// Replace the editable fields of post `id`. Returns `false` if no such post exists.
    fn update(&self, id: &str, fields: PostFields) -> Result<bool, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn active_page(
        &self,
        page: Page,
        filter: impl Fn(&Post) -> bool,
    ) -> Result<Vec<Post>, RepositoryError> {
        let posts = self.posts.read().map_err(|_| RepositoryError::LockPoisoned)?;

        let mut matching: Vec<&Post> = posts.iter().filter(|p| p.is_active && filter(p)).collect();
        // Stable sort keeps insertion order for equal dates.
        matching.sort_by_key(|p| p.create_date);

        Ok(matching
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect())
    }
}

impl PostRepository for InMemoryPostRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepositoryError> {
        let posts = self.posts.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    fn find_page(&self, page: Page) -> Result<Vec<Post>, RepositoryError> {
        self.active_page(page, |_| true)
    }

    fn find_page_by_category(
        &self,
        category_id: i64,
        page: Page,
    ) -> Result<Vec<Post>, RepositoryError> {
        self.active_page(page, |p| p.category_id == category_id)
    }

    fn add(&self, post: Post) -> Result<(), RepositoryError> {
        let mut posts = self.posts.write().map_err(|_| RepositoryError::LockPoisoned)?;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepositoryError::DuplicateId(post.id));
        }
        posts.push(post);
        Ok(())
    }

    fn update(&self, id: &str, fields: PostFields) -> Result<bool, RepositoryError> {
        let mut posts = self.posts.write().map_err(|_| RepositoryError::LockPoisoned)?;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        post.title = fields.title;
        post.body = fields.body;
        post.category_id = fields.category_id;
        Ok(true)
    }
}
