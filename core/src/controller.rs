//! View-state controller for the paginated posts list.
//!
//! # Design
//! The controller owns the current `Query`, the current `FetchOutcome`, and
//! a monotonically increasing cycle counter. Every page or search change
//! dispatches a new `FetchCycle` and puts the view in `Loading`. Completions
//! carry the id of the cycle they belong to; anything but the most recently
//! dispatched id is stale and dropped, so a slow early request can never
//! overwrite a newer result no matter how many cycles are in flight.
//!
//! No I/O happens here. The caller executes `FetchCycle::request` and hands
//! back either the raw response (`complete`) or an already-parsed result
//! (`resolve`).

use tracing::{debug, warn};

use crate::client::PostsClient;
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Post, Query};

/// Identifies one fetch cycle. Later cycles have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleId(pub u64);

/// Result state of the most recent cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loading,
    Success(Vec<Post>),
    Failure(String),
}

/// A dispatched fetch cycle, waiting for someone to run `request`.
#[derive(Debug, Clone)]
pub struct FetchCycle {
    pub id: CycleId,
    pub query: Query,
    pub request: HttpRequest,
}

/// Whether a completion changed the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsView<'a> {
    pub page: u32,
    pub search_term: &'a str,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub posts: &'a [Post],
}

/// Owned copy of a `PostsView`, for handing across tasks or threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub page: u32,
    pub search_term: String,
    pub loading: bool,
    pub error: Option<String>,
    pub posts: Vec<Post>,
}

impl From<PostsView<'_>> for ViewSnapshot {
    fn from(view: PostsView<'_>) -> Self {
        Self {
            page: view.page,
            search_term: view.search_term.to_string(),
            loading: view.loading,
            error: view.error.map(str::to_string),
            posts: view.posts.to_vec(),
        }
    }
}

#[derive(Debug)]
pub struct ViewController {
    client: PostsClient,
    query: Query,
    outcome: FetchOutcome,
    current: CycleId,
}

impl ViewController {
    /// Create the controller and dispatch its first cycle for page 1 with no
    /// search term.
    pub fn start(client: PostsClient, limit: u32) -> (Self, FetchCycle) {
        let mut controller = Self {
            client,
            query: Query::first_page(limit),
            outcome: FetchOutcome::Loading,
            current: CycleId(0),
        };
        let cycle = controller.dispatch();
        (controller, cycle)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    pub fn current_cycle(&self) -> CycleId {
        self.current
    }

    /// Move to page `page`. No clamping happens here; see `change_page`.
    pub fn set_page(&mut self, page: u32) -> FetchCycle {
        self.query = self.query.with_page(page);
        self.dispatch()
    }

    /// Step by `delta` pages, never going below page 1.
    pub fn change_page(&mut self, delta: i64) -> FetchCycle {
        let target = (i64::from(self.query.page) + delta).clamp(1, i64::from(u32::MAX));
        self.set_page(target as u32)
    }

    /// Search for `term` starting again from page 1.
    pub fn submit_search(&mut self, term: &str) -> FetchCycle {
        self.query = self.query.with_search(term);
        self.dispatch()
    }

    /// Apply a raw response for cycle `id`. Stale responses are not parsed.
    pub fn complete(
        &mut self,
        id: CycleId,
        response: Result<HttpResponse, FetchError>,
    ) -> Completion {
        if !self.is_current(id) {
            return Completion::Stale;
        }
        let result = response.and_then(|r| self.client.parse_fetch_posts(&self.query, r));
        self.apply(result)
    }

    /// Apply an already-parsed result for cycle `id`.
    pub fn resolve(&mut self, id: CycleId, result: Result<Vec<Post>, FetchError>) -> Completion {
        if !self.is_current(id) {
            return Completion::Stale;
        }
        self.apply(result)
    }

    pub fn view(&self) -> PostsView<'_> {
        let (loading, error, posts) = match &self.outcome {
            FetchOutcome::Loading => (true, None, &[][..]),
            FetchOutcome::Success(posts) => (false, None, posts.as_slice()),
            FetchOutcome::Failure(msg) => (false, Some(msg.as_str()), &[][..]),
        };
        PostsView {
            page: self.query.page,
            search_term: &self.query.search_term,
            loading,
            error,
            posts,
        }
    }

    fn dispatch(&mut self) -> FetchCycle {
        self.current = CycleId(self.current.0 + 1);
        self.outcome = FetchOutcome::Loading;
        debug!(
            cycle = self.current.0,
            page = self.query.page,
            limit = self.query.limit,
            search = %self.query.search_term,
            "posts: cycle dispatched"
        );
        FetchCycle {
            id: self.current,
            query: self.query.clone(),
            request: self.client.build_fetch_posts(&self.query),
        }
    }

    fn is_current(&self, id: CycleId) -> bool {
        if id == self.current {
            return true;
        }
        debug!(
            cycle = id.0,
            current = self.current.0,
            "posts: dropping result of superseded cycle"
        );
        false
    }

    fn apply(&mut self, result: Result<Vec<Post>, FetchError>) -> Completion {
        self.outcome = match result {
            Ok(posts) => FetchOutcome::Success(posts),
            Err(e) => {
                warn!(cycle = self.current.0, error = %e, "posts: cycle failed");
                FetchOutcome::Failure(e.user_message())
            }
        };
        Completion::Applied
    }
}
