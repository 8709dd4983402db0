//! Blog post records and their wire representations.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length in bytes of a generated post id before hex encoding.
const POST_ID_BYTES: usize = 12;

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// 24 lowercase hex characters.
    pub id: String,
    pub title: String,
    pub body: String,
    pub create_date: DateTime<Utc>,
    /// Inactive posts are kept but never listed.
    pub is_active: bool,
    pub category_id: i64,
}

impl Post {
    /// Create a new active post with a fresh id.
    #[must_use]
    pub fn new(fields: PostFields, create_date: DateTime<Utc>) -> Self {
        Self {
            id: generate_post_id(),
            title: fields.title,
            body: fields.body,
            create_date,
            is_active: true,
            category_id: fields.category_id,
        }
    }
}

/// The caller-editable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub body: String,
    pub category_id: i64,
}

/// Request body for creating or updating a post.
///
/// `CreateDate` may be sent but is ignored; the server stamps its own time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "CategoryID", alias = "CategoryId")]
    pub category_id: i64,
}

impl PostRequest {
    #[must_use]
    pub fn into_parts(self) -> (String, PostFields) {
        (
            self.id,
            PostFields {
                title: self.title,
                body: self.body,
                category_id: self.category_id,
            },
        )
    }
}

/// Public view of a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostView {
    pub title: String,
    pub body: String,
    pub create_date: DateTime<Utc>,
    pub id: String,
    pub category_id: i64,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            body: post.body,
            create_date: post.create_date,
            id: post.id,
            category_id: post.category_id,
        }
    }
}

fn generate_post_id() -> String {
    let bytes: [u8; POST_ID_BYTES] = rand::random();
    bytes
        .iter()
        .fold(String::with_capacity(POST_ID_BYTES * 2), |mut id, byte| {
            let _ = write!(id, "{byte:02x}");
            id
        })
}
