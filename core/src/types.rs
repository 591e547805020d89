//! Domain types for the posts viewer.
//!
//! # Design
//! `Post` mirrors the upstream JSON record but keeps only the fields the
//! viewer renders; `userId` and anything else the server adds are ignored on
//! deserialization. `Query` is the (page, limit, search term) tuple that
//! drives one fetch cycle.

use serde::{Deserialize, Serialize};

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// A single post returned by the upstream resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// The inputs of one fetch cycle.
///
/// `page` is 1-based. `search_term` is applied client-side only; an empty
/// string means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub page: u32,
    pub limit: u32,
    pub search_term: String,
}

impl Query {
    /// First page, no search term.
    pub fn first_page(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search_term: String::new(),
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Reset to page 1 with a new search term.
    pub fn with_search(&self, term: &str) -> Self {
        Self {
            page: 1,
            limit: self.limit,
            search_term: term.to_string(),
        }
    }

    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}
