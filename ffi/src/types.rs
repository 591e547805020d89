//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! enums with explicit discriminants. Conversions live here to keep `lib.rs`
//! focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use posts_core::{Completion, FetchCycle, HttpMethod, PostsView, ViewController};

/// Opaque handle to a `ViewController`. C callers receive a pointer to this
/// and pass it back into every `posts_viewer_*` function.
pub struct FfiPostsViewer {
    pub(crate) inner: ViewController,
}

/// Convert to an owned C string. Interior NUL bytes are dropped.
pub(crate) fn c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

// ---------------------------------------------------------------------------
// Fetch cycles
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A dispatched fetch cycle. The host performs `method url`, then reports
/// the outcome with `posts_viewer_complete` or `posts_viewer_fail`, passing
/// `cycle_id` back.
#[repr(C)]
pub struct FfiFetchCycle {
    pub cycle_id: u64,
    pub page: u32,
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
}

impl FfiFetchCycle {
    pub(crate) fn from_core(cycle: FetchCycle) -> *mut Self {
        Box::into_raw(Box::new(FfiFetchCycle {
            cycle_id: cycle.id.0,
            page: cycle.query.page,
            method: cycle.request.method.into(),
            url: c_string(&cycle.request.path),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host builds this on its own stack; the FFI layer reads but does not
/// free it.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// What happened to a reported completion.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiCompletion {
    Applied = 0,
    Stale = 1,
    NullArg = 2,
    Panic = 3,
}

impl From<Completion> for FfiCompletion {
    fn from(c: Completion) -> Self {
        match c {
            Completion::Applied => FfiCompletion::Applied,
            Completion::Stale => FfiCompletion::Stale,
        }
    }
}

// ---------------------------------------------------------------------------
// View snapshot
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct FfiPost {
    pub id: u64,
    pub title: *mut c_char,
    pub body: *mut c_char,
}

/// Everything the host needs to render the posts panel.
///
/// `error_message` is null unless the last cycle failed. `posts` is a boxed
/// slice of `posts_len` items, null when empty.
#[repr(C)]
pub struct FfiPostsView {
    pub page: u32,
    pub loading: bool,
    pub error_message: *mut c_char,
    pub search_term: *mut c_char,
    pub posts: *mut FfiPost,
    pub posts_len: u32,
}

impl FfiPostsView {
    pub(crate) fn from_core(view: PostsView<'_>) -> *mut Self {
        let posts: Box<[FfiPost]> = view
            .posts
            .iter()
            .map(|p| FfiPost {
                id: p.id,
                title: c_string(&p.title),
                body: c_string(&p.body),
            })
            .collect();

        let posts_len = posts.len() as u32;
        let posts = if posts.is_empty() {
            std::ptr::null_mut()
        } else {
            Box::into_raw(posts) as *mut FfiPost
        };

        Box::into_raw(Box::new(FfiPostsView {
            page: view.page,
            loading: view.loading,
            error_message: view.error.map_or(std::ptr::null_mut(), c_string),
            search_term: c_string(view.search_term),
            posts,
            posts_len,
        }))
    }
}
