//! HTTP routes.
//!
//! | Method | Path                              | Auth   |
//! |--------|-----------------------------------|--------|
//! | POST   | `/login`                          | none   |
//! | POST   | `/posts`                          | bearer |
//! | PUT    | `/posts`                          | bearer |
//! | GET    | `/posts?page=&size=`              | none   |
//! | GET    | `/posts/id/{id}`                  | none   |
//! | GET    | `/posts/categoryid/{categoryid}`  | none   |

mod body;
pub mod error;
pub mod login;
pub mod posts;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use crate::auth::require_bearer;
use crate::state::AppState;

/// Build the application router.
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
pub fn router(state: AppState) -> Router {
    let gate = middleware::from_fn_with_state(Arc::clone(&state.tokens), require_bearer);

    Router::new()
        .route("/login", post(login::login))
        .route(
            "/posts",
            get(posts::list_posts).merge(
                post(posts::create_post)
                    .put(posts::update_post)
                    .route_layer(gate),
            ),
        )
        .route("/posts/id/{id}", get(posts::get_post_by_id))
        .route(
            "/posts/categoryid/{categoryid}",
            get(posts::list_posts_by_category),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
