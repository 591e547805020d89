//! Viewer configuration.
//!
//! Defaults point at the public JSONPlaceholder service with eight posts per
//! page. `from_env` overlays `POSTS_BASE_URL` and `POSTS_PAGE_SIZE`.

use tracing::warn;

use crate::types::DEFAULT_PAGE_SIZE;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub base_url: String,
    /// Fixed for the lifetime of a controller.
    pub page_size: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("POSTS_BASE_URL") {
            if !v.trim().is_empty() {
                config.base_url = v.trim().to_string();
            }
        }

        if let Some(v) = lookup("POSTS_PAGE_SIZE") {
            match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => config.page_size = n,
                _ => warn!(value = %v, "config: ignoring invalid POSTS_PAGE_SIZE"),
            }
        }

        config
    }
}
