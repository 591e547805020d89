//! Client-side search over a fetched page.
//!
//! The upstream has no search parameter, so the term is matched against the
//! page that was already fetched. Matches on other pages are never seen: a
//! search can return fewer than `limit` posts, or none, while matches exist
//! elsewhere in the dataset.

use crate::types::Post;

/// True if `term` occurs in the post's title or body, ignoring case.
/// The empty term matches everything.
pub fn matches_search(post: &Post, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    post.title.to_lowercase().contains(&needle) || post.body.to_lowercase().contains(&needle)
}

/// Keep the posts matching `term`, in their original order.
pub fn filter_page(posts: Vec<Post>, term: &str) -> Vec<Post> {
    if term.is_empty() {
        return posts;
    }
    posts.into_iter().filter(|p| matches_search(p, term)).collect()
}
