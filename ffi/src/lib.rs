//! C-ABI wrapper around the `posts-core` view controller.
//!
//! # Overview
//! Lets a non-Rust UI host drive the posts panel: the host creates a viewer,
//! forwards page and search events, performs each returned fetch cycle with
//! its own HTTP stack, reports the response back, and reads a view snapshot
//! to render.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Cycle ids come back with each completion; results for superseded
//!   cycles are reported as `Stale` and leave the view untouched.
//! - The host owns all returned pointers and must call the matching
//!   `posts_free_*` / `posts_viewer_free` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use posts_core::{CycleId, FetchError, HttpResponse, PostsClient, ViewController};
use tracing::error;

use types::*;

/// Read a borrowed C string; invalid UTF-8 reads as empty.
fn read_str<'a>(s: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(s) }.to_str().unwrap_or("")
}

/// Run `f` against the viewer, returning a fetch cycle or null.
fn with_viewer(
    viewer: *mut FfiPostsViewer,
    name: &str,
    f: impl FnOnce(&mut ViewController) -> posts_core::FetchCycle,
) -> *mut FfiFetchCycle {
    if viewer.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(AssertUnwindSafe(|| {
        let viewer = unsafe { &mut *viewer };
        FfiFetchCycle::from_core(f(&mut viewer.inner))
    }))
    .unwrap_or_else(|_| {
        error!(function = name, "ffi: panic caught");
        std::ptr::null_mut()
    })
}

// ---------------------------------------------------------------------------
// Viewer lifecycle
// ---------------------------------------------------------------------------

/// Create a viewer bound to `base_url` with a fixed page size `limit`.
///
/// The initial fetch cycle (page 1, no search) is written to `out_cycle`
/// when it is non-null; the host should execute it right away. Returns null
/// if `base_url` is null, `limit` is zero, or an internal panic occurs.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_new(
    base_url: *const c_char,
    limit: u32,
    out_cycle: *mut *mut FfiFetchCycle,
) -> *mut FfiPostsViewer {
    catch_unwind(|| {
        if base_url.is_null() || limit == 0 {
            return std::ptr::null_mut();
        }
        let client = PostsClient::new(read_str(base_url));
        let (controller, cycle) = ViewController::start(client, limit);
        if !out_cycle.is_null() {
            unsafe { *out_cycle = FfiFetchCycle::from_core(cycle) };
        }
        Box::into_raw(Box::new(FfiPostsViewer { inner: controller }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a viewer created by `posts_viewer_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_free(viewer: *mut FfiPostsViewer) {
    if !viewer.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(viewer) });
        });
    }
}

// ---------------------------------------------------------------------------
// UI events
// ---------------------------------------------------------------------------

/// Jump to `page`. The host is responsible for keeping it at or above 1.
///
/// Returns null if `viewer` is null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_set_page(
    viewer: *mut FfiPostsViewer,
    page: u32,
) -> *mut FfiFetchCycle {
    with_viewer(viewer, "posts_viewer_set_page", |c| c.set_page(page))
}

/// Prev/Next buttons: move by `delta` pages, stopping at page 1.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_change_page(
    viewer: *mut FfiPostsViewer,
    delta: i32,
) -> *mut FfiFetchCycle {
    with_viewer(viewer, "posts_viewer_change_page", |c| {
        c.change_page(i64::from(delta))
    })
}

/// Submit a search. Resets to page 1. A null `term` clears the search.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_submit_search(
    viewer: *mut FfiPostsViewer,
    term: *const c_char,
) -> *mut FfiFetchCycle {
    let term = if term.is_null() { "" } else { read_str(term) };
    with_viewer(viewer, "posts_viewer_submit_search", |c| c.submit_search(term))
}

// ---------------------------------------------------------------------------
// Completions
// ---------------------------------------------------------------------------

/// Report the HTTP response for `cycle_id`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_complete(
    viewer: *mut FfiPostsViewer,
    cycle_id: u64,
    response: *const FfiHttpResponse,
) -> FfiCompletion {
    if viewer.is_null() || response.is_null() {
        return FfiCompletion::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let viewer = unsafe { &mut *viewer };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            ""
        } else {
            read_str(resp.body)
        };
        let response = HttpResponse::new(resp.status, body);
        viewer.inner.complete(CycleId(cycle_id), Ok(response)).into()
    }))
    .unwrap_or_else(|_| {
        error!(function = "posts_viewer_complete", "ffi: panic caught");
        FfiCompletion::Panic
    })
}

/// Report that the request for `cycle_id` could not be completed at all
/// (connection refused, timeout on the host side, ...). `message` may be
/// null, in which case a generic message is shown.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_fail(
    viewer: *mut FfiPostsViewer,
    cycle_id: u64,
    message: *const c_char,
) -> FfiCompletion {
    if viewer.is_null() {
        return FfiCompletion::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let viewer = unsafe { &mut *viewer };
        let message = if message.is_null() {
            ""
        } else {
            read_str(message)
        };
        viewer
            .inner
            .complete(CycleId(cycle_id), Err(FetchError::transport(message)))
            .into()
    }))
    .unwrap_or_else(|_| {
        error!(function = "posts_viewer_fail", "ffi: panic caught");
        FfiCompletion::Panic
    })
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Snapshot the current view. Free with `posts_free_view`.
///
/// Returns null if `viewer` is null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_viewer_view(viewer: *const FfiPostsViewer) -> *mut FfiPostsView {
    if viewer.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| {
        let viewer = unsafe { &*viewer };
        FfiPostsView::from_core(viewer.inner.view())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiFetchCycle`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_free_cycle(cycle: *mut FfiFetchCycle) {
    if cycle.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let cycle = unsafe { Box::from_raw(cycle) };
        free_c_string(cycle.url);
    });
}

/// Free an `FfiPostsView` and every string and post it owns. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_free_view(view: *mut FfiPostsView) {
    if view.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let view = unsafe { Box::from_raw(view) };
        free_c_string(view.error_message);
        free_c_string(view.search_term);
        if !view.posts.is_null() && view.posts_len > 0 {
            let posts = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    view.posts,
                    view.posts_len as usize,
                ))
            };
            for post in posts.iter() {
                free_c_string(post.title);
                free_c_string(post.body);
            }
        }
    });
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
