//! Error types for the posts fetch client.
//!
//! # Design
//! Two failure families: the server answered with a non-2xx status
//! (`Network`), or the exchange could not complete or produced an unreadable
//! body (`Transport`). Both collapse to one user-visible message at the
//! controller boundary via `user_message`.

use thiserror::Error;

/// Shown when an error carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Failed to load posts";

/// Errors produced by a fetch cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The upstream answered with a non-success status.
    #[error("Failed fetching posts (HTTP {status})")]
    Network { status: u16, body: String },

    /// The request could not complete, or the body was not a list of posts.
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        FetchError::Transport(msg.into())
    }

    /// Message for the view layer, never blank.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            msg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_names_status() {
        let err = FetchError::Network {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(err.user_message(), "Failed fetching posts (HTTP 503)");
    }

    #[test]
    fn transport_error_is_verbatim() {
        let err = FetchError::transport("connection refused");
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn blank_transport_error_falls_back() {
        assert_eq!(FetchError::transport("").user_message(), FALLBACK_MESSAGE);
        assert_eq!(FetchError::transport("  ").user_message(), FALLBACK_MESSAGE);
    }
}
