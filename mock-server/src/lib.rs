use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

/// Upstream page size when `_page` is given without `_limit`.
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: u64, title: &str, body: &str) -> Self {
        Self {
            user_id: id.saturating_sub(1) / 10 + 1,
            id,
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(rename = "_page")]
    pub page: Option<usize>,
    #[serde(rename = "_limit")]
    pub limit: Option<usize>,
}

pub type Db = Arc<Vec<Post>>;

/// Posts `1..=count` with predictable text.
pub fn fixture_posts(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|id| Post::new(id, &format!("post {id} title"), &format!("post {id} body")))
        .collect()
}

pub fn app(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(posts);
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .with_state(db)
}

/// A router whose posts listing always answers `status`.
pub fn failing_app(status: StatusCode) -> Router {
    Router::new().route("/posts", get(move || async move { (status, "upstream failure") }))
}

pub async fn run(listener: TcpListener, posts: Vec<Post>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(posts)).await
}

/// Slice `posts` the way the upstream does: 1-based `_page`, `_limit` per
/// page, everything when neither is given.
pub fn paginate(posts: &[Post], params: &PageParams) -> Vec<Post> {
    let (page, limit) = match (params.page, params.limit) {
        (None, None) => return posts.to_vec(),
        (None, Some(limit)) => (1, limit),
        (Some(page), limit) => (page.max(1), limit.unwrap_or(DEFAULT_LIMIT)),
    };
    posts
        .iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .cloned()
        .collect()
}

async fn list_posts(State(db): State<Db>, Query(params): Query<PageParams>) -> Json<Vec<Post>> {
    let page = paginate(&db, &params);
    info!(
        page = ?params.page,
        limit = ?params.limit,
        returned = page.len(),
        "mock: list posts"
    );
    Json(page)
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    db.iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
