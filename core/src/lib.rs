//! Core of the paginated posts viewer.
//!
//! # Overview
//! Builds the upstream request for one page of posts, parses and filters the
//! response, and keeps the view state (page, search term, loading, error,
//! posts) consistent across overlapping fetch cycles.
//!
//! # Design
//! - `PostsClient` is stateless: `build_fetch_posts` / `parse_fetch_posts`
//!   keep the I/O boundary explicit (host-does-IO), and `fetch_posts` runs
//!   the pair over any `Transport`.
//! - Search is client-side and scoped to the fetched page (`filter`).
//! - `ViewController` is a synchronous state machine guarded by a cycle
//!   counter; `PostsSession` drives it on tokio.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

pub use client::PostsClient;
pub use config::ViewerConfig;
pub use controller::{
    Completion, CycleId, FetchCycle, FetchOutcome, PostsView, ViewController, ViewSnapshot,
};
pub use error::FetchError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::PostsSession;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Post, Query, DEFAULT_PAGE_SIZE};
