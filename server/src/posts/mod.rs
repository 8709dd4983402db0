//! Blog posts: records, pagination and storage.

pub mod model;
pub mod pagination;
pub mod repository;

pub use model::{Post, PostFields, PostRequest, PostView};
pub use pagination::{Page, PageError, PageParams};
pub use repository::{InMemoryPostRepository, PostRepository, RepositoryError};
