//! Stateless request builder and response parser for the posts resource.
//!
//! # Design
//! `PostsClient` holds only a `base_url`. `build_fetch_posts` produces an
//! `HttpRequest` and `parse_fetch_posts` consumes the matching
//! `HttpResponse`; the round-trip in between belongs to the caller, or to a
//! `Transport` when going through `fetch_posts`.
//!
//! Only `_page` and `_limit` are sent upstream. The search term is applied
//! to the returned page by `filter::filter_page`.

use tracing::debug;

use crate::error::FetchError;
use crate::filter::filter_page;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Post, Query};

/// Client for the upstream posts resource.
#[derive(Debug, Clone)]
pub struct PostsClient {
    base_url: String,
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_fetch_posts(&self, query: &Query) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!(
                "{}/posts?_page={}&_limit={}",
                self.base_url, query.page, query.limit
            ),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Check status, decode the page, then apply the search term if any.
    pub fn parse_fetch_posts(
        &self,
        query: &Query,
        response: HttpResponse,
    ) -> Result<Vec<Post>, FetchError> {
        if !response.is_success() {
            return Err(FetchError::Network {
                status: response.status,
                body: response.body,
            });
        }
        let posts: Vec<Post> = serde_json::from_str(&response.body)
            .map_err(|e| FetchError::transport(format!("invalid posts payload: {e}")))?;
        Ok(filter_page(posts, &query.search_term))
    }

    /// One request, one parse. No retry and no caching.
    pub async fn fetch_posts(
        &self,
        transport: &dyn Transport,
        query: &Query,
    ) -> Result<Vec<Post>, FetchError> {
        let request = self.build_fetch_posts(query);
        debug!(method = request.method.as_str(), url = %request.path, "posts: fetching page");
        let response = transport.execute(request).await?;
        self.parse_fetch_posts(query, response)
    }
}
