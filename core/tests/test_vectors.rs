//! Verify build/parse against the JSON test vectors in `test-vectors/`.
//!
//! Each case describes a query, the expected request, a simulated response,
//! and either the expected posts or the expected error family.

use posts_core::{FetchError, HttpMethod, HttpResponse, Post, PostsClient, Query};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_query(v: &serde_json::Value) -> Query {
    Query {
        page: v["page"].as_u64().unwrap() as u32,
        limit: v["limit"].as_u64().unwrap() as u32,
        search_term: v["search_term"].as_str().unwrap().to_string(),
    }
}

#[test]
fn fetch_posts_test_vectors() {
    let raw = include_str!("../../test-vectors/fetch_posts.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let base_url = vectors["base_url"].as_str().unwrap();
    let c = PostsClient::new(base_url);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = parse_query(&case["query"]);
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_fetch_posts(&query);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{base_url}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let result = c.parse_fetch_posts(&query, response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "Network" => assert!(matches!(err, FetchError::Network { .. }), "{name}: expected Network"),
                "Transport" => assert!(matches!(err, FetchError::Transport(_)), "{name}: expected Transport"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let posts = result.unwrap();
            let expected: Vec<Post> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(posts, expected, "{name}: parsed result");
        }
    }
}

#[test]
fn filtered_results_are_a_subsequence_of_the_page() {
    let raw = include_str!("../../test-vectors/fetch_posts.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = PostsClient::new(vectors["base_url"].as_str().unwrap());
    for case in vectors["cases"].as_array().unwrap() {
        let sim = &case["simulated_response"];
        if sim["status"] != 200 || case.get("expected_error").is_some() {
            continue;
        }
        let query = parse_query(&case["query"]);
        let body = sim["body"].as_str().unwrap();

        let unfiltered = c
            .parse_fetch_posts(&query.with_search(""), HttpResponse::new(200, body))
            .unwrap();
        let filtered = c.parse_fetch_posts(&query, HttpResponse::new(200, body)).unwrap();

        let term = query.search_term.to_lowercase();
        let mut rest = unfiltered.iter();
        for post in &filtered {
            assert!(
                post.title.to_lowercase().contains(&term) || post.body.to_lowercase().contains(&term),
                "post {} does not match {term:?}",
                post.id
            );
            assert!(rest.any(|p| p == post), "post {} out of order", post.id);
        }
    }
}
