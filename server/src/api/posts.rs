use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::Utc;
use serde_json::Value;

use super::{ApiError, body::json_object};
use crate::auth::AuthenticatedPrincipal;
use crate::posts::{Page, PageError, PageParams, Post, PostRequest, PostView};
use crate::state::AppState;

/// Validate `?page=&size=`. Query strings that do not decode at all (for
/// example a repeated key) are reported as an invalid page.
fn page_from_query(query: Result<Query<PageParams>, QueryRejection>) -> Result<Page, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!("rejected query string: {rejection}");
        ApiError::Page(PageError::InvalidPage)
    })?;
    Ok(Page::from_params(&params)?)
}

/// `GET /posts?page=&size=`
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    let page = page_from_query(query)?;
    let posts = state.posts.find_page(page)?;

    if posts.is_empty() {
        return Err(ApiError::NotFound("post not found"));
    }
    Ok(Json(posts.into_iter().map(PostView::from).collect()))
}

/// `GET /posts/categoryid/{categoryid}?page=&size=`
///
/// A non-numeric category id is treated as category 0.
pub async fn list_posts_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    let category_id = category_id.parse::<i64>().unwrap_or(0);
    let page = page_from_query(query)?;
    let posts = state.posts.find_page_by_category(category_id, page)?;

    if posts.is_empty() {
        return Err(ApiError::NotFound("posts not found"));
    }
    Ok(Json(posts.into_iter().map(PostView::from).collect()))
}

/// `GET /posts/id/{id}`
pub async fn get_post_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostView>, ApiError> {
    state
        .posts
        .find_by_id(&id)?
        .map(|post| Json(PostView::from(post)))
        .ok_or(ApiError::NotFound("post not found"))
}

/// `POST /posts` (protected)
pub async fn create_post(
    State(state): State<AppState>,
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<bool>, ApiError> {
    let request: PostRequest = json_object(body)?;
    let (_, fields) = request.into_parts();

    let post = Post::new(fields, Utc::now());
    tracing::info!(author = %principal, post_id = %post.id, "creating post");
    state.posts.add(post)?;

    Ok(Json(true))
}

/// `PUT /posts` (protected)
pub async fn update_post(
    State(state): State<AppState>,
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<bool>, ApiError> {
    let request: PostRequest = json_object(body)?;
    let (id, fields) = request.into_parts();

    if !state.posts.update(&id, fields)? {
        return Err(ApiError::NotFound("post not found"));
    }
    tracing::info!(author = %principal, post_id = %id, "updated post");

    Ok(Json(true))
}
