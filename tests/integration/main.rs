//! Integration tests for the service
//!
//! These tests use wiremock to stand in for the Feddit API and drive either the
//! client directly or the whole axum router.

mod api_tests;

use feddit_sentiment::config::Config;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_PREFIX: &str = "/api/v1";

/// Config pointing at the mock server
pub fn config_for(server: &MockServer, page_size: u32) -> Config {
    let mut config = Config::default();
    config.feddit.base_url = format!("{}{}", server.uri(), API_PREFIX);
    config.feddit.page_size = page_size;
    config.feddit.timeout_secs = 1;
    config.feddit.connect_timeout_secs = 1;
    config
}

pub fn comment(id: i64, text: &str, created_at: i64) -> Value {
    json!({
        "id": id,
        "username": format!("user_{}", id),
        "text": text,
        "created_at": created_at,
    })
}

/// Mounts a forum listing
pub async fn mount_forums(server: &MockServer, forums: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{}/subfeddits/", API_PREFIX)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "subfeddits": forums })))
        .mount(server)
        .await;
}

/// Mounts `comments` split into pages of `page_size`, followed by empty pages
pub async fn mount_comment_pages(server: &MockServer, comments: &[Value], page_size: usize) {
    for (i, chunk) in comments.chunks(page_size).enumerate() {
        let skip = i * page_size;
        Mock::given(method("GET"))
            .and(path(format!("{}/comments/", API_PREFIX)))
            .and(query_param("skip", skip.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "subfeddit_id": 1,
                "skip": skip,
                "limit": page_size,
                "comments": chunk,
            })))
            .mount(server)
            .await;
    }

    // Registered last so the pages above win
    Mock::given(method("GET"))
        .and(path(format!("{}/comments/", API_PREFIX)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subfeddit_id": 1,
            "comments": [],
        })))
        .mount(server)
        .await;
}
