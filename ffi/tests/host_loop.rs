//! Drive the C surface the way a UI host would, against the live mock server.
//!
//! # Design
//! The test plays the host: it performs each returned fetch cycle with ureq,
//! hands the status and body back through `posts_viewer_complete`, and reads
//! the view snapshot after every step.

use std::ffi::{CStr, CString};

use posts_ffi::types::{FfiCompletion, FfiFetchCycle, FfiHttpResponse, FfiPostsViewer};
use posts_ffi::*;

fn spawn_server(posts: Vec<mock_server::Post>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, posts).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Execute the cycle's GET and report it back. Frees the cycle.
fn run_cycle(viewer: *mut FfiPostsViewer, cycle: *mut FfiFetchCycle) -> FfiCompletion {
    let (cycle_id, url) = {
        let c = unsafe { &*cycle };
        let url = unsafe { CStr::from_ptr(c.url) }.to_str().unwrap().to_string();
        (c.cycle_id, url)
    };
    posts_free_cycle(cycle);

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let mut response = agent.get(&url).call().expect("HTTP transport error");
    let status = response.status().as_u16();
    let body = CString::new(response.body_mut().read_to_string().unwrap_or_default()).unwrap();

    let resp = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    posts_viewer_complete(viewer, cycle_id, &resp)
}

fn visible_ids(viewer: *mut FfiPostsViewer) -> Vec<u64> {
    let view = posts_viewer_view(viewer);
    let v = unsafe { &*view };
    assert!(!v.loading);
    assert!(v.error_message.is_null());
    let ids = if v.posts_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(v.posts, v.posts_len as usize) }
            .iter()
            .map(|p| p.id)
            .collect()
    };
    posts_free_view(view);
    ids
}

#[test]
fn host_pages_and_searches() {
    let base = CString::new(spawn_server(mock_server::fixture_posts(20))).unwrap();

    let mut initial: *mut FfiFetchCycle = std::ptr::null_mut();
    let viewer = posts_viewer_new(base.as_ptr(), 8, &mut initial);
    assert!(!viewer.is_null());

    assert_eq!(run_cycle(viewer, initial), FfiCompletion::Applied);
    assert_eq!(visible_ids(viewer), (1..=8).collect::<Vec<_>>());

    let next = posts_viewer_change_page(viewer, 1);
    run_cycle(viewer, next);
    assert_eq!(visible_ids(viewer), (9..=16).collect::<Vec<_>>());

    // "post 1" hits 1 and 10..=19 overall, but only page 1 is searched.
    let term = CString::new("Post 1").unwrap();
    let search = posts_viewer_submit_search(viewer, term.as_ptr());
    run_cycle(viewer, search);
    assert_eq!(visible_ids(viewer), vec![1]);

    let next = posts_viewer_change_page(viewer, 1);
    run_cycle(viewer, next);
    assert_eq!(visible_ids(viewer), (10..=16).collect::<Vec<_>>());

    posts_viewer_free(viewer);
}

#[test]
fn host_reports_results_out_of_order() {
    let base = CString::new(spawn_server(mock_server::fixture_posts(20))).unwrap();

    let mut initial: *mut FfiFetchCycle = std::ptr::null_mut();
    let viewer = posts_viewer_new(base.as_ptr(), 8, &mut initial);
    let newer = posts_viewer_set_page(viewer, 3);

    assert_eq!(run_cycle(viewer, newer), FfiCompletion::Applied);
    assert_eq!(run_cycle(viewer, initial), FfiCompletion::Stale);
    assert_eq!(visible_ids(viewer), (17..=20).collect::<Vec<_>>());

    posts_viewer_free(viewer);
}
