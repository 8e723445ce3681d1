use crate::{comment, config_for, mount_comment_pages, mount_forums, API_PREFIX};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use feddit_sentiment::aggregate::CancelSignal;
use feddit_sentiment::config::Config;
use feddit_sentiment::server::{build_router, AppState};
use feddit_sentiment::{FedditClient, LexiconScorer};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_SIZE: u32 = 5;

fn app_for(mock_server: &MockServer) -> Router {
    app_with(config_for(mock_server, PAGE_SIZE))
}

fn app_with(config: Config) -> Router {
    let client = FedditClient::new(&config.feddit).expect("Failed to build client");
    let state = Arc::new(AppState::new(
        config,
        Arc::new(client),
        Arc::new(LexiconScorer::new()),
        CancelSignal::never(),
    ));
    build_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect()
}

/// Forum "Cats" with comments created at 100, 200, ... and mixed sentiment
async fn cats_forum(count: i64) -> MockServer {
    let mock_server = MockServer::start().await;
    mount_forums(&mock_server, json!([{"id": 1, "title": "Cats"}, {"id": 2, "title": "Dogs"}])).await;

    let texts = [
        "I love this, great work!",
        "This is terrible and disappointing.",
        "The package arrived on Tuesday.",
        "Pretty good overall",
    ];
    let comments: Vec<Value> = (1..=count)
        .map(|id| comment(id, texts[(id as usize - 1) % texts.len()], id * 100))
        .collect();
    mount_comment_pages(&mock_server, &comments, PAGE_SIZE as usize).await;

    mock_server
}

#[tokio::test]
async fn test_comments_returns_enriched_comments() {
    let mock_server = cats_forum(3).await;

    let (status, body) = get(app_for(&mock_server), "/comments/Cats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let first = &body[0];
    assert_eq!(first["text"], "I love this, great work!");
    assert_eq!(first["classification"], "positive");
    assert!(first["polarity"].as_f64().unwrap() > 0.0);
    assert!(first.get("created_at").is_none());
    assert!(first.get("username").is_none());

    assert_eq!(body[1]["classification"], "negative");
    assert_eq!(body[2]["polarity"].as_f64().unwrap(), 0.0);
    assert_eq!(body[2]["classification"], "negative");
}

#[tokio::test]
async fn test_forum_name_is_case_insensitive() {
    let mock_server = cats_forum(2).await;

    let (status, body) = get(app_for(&mock_server), "/comments/CATS").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn test_default_limit_is_25() {
    let mock_server = cats_forum(40).await;

    let (status, body) = get(app_for(&mock_server), "/comments/Cats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (1..=25).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_limit_spans_pages() {
    let mock_server = cats_forum(40).await;

    let (status, body) = get(app_for(&mock_server), "/comments/Cats?limit=12").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (1..=12).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_time_range_filters_comments() {
    let mock_server = cats_forum(10).await;

    // created_at of comment n is n * 100
    let uri = "/comments/Cats?start=1970-01-01T00:04:10Z&end=1970-01-01T00:10:00Z";
    let (status, body) = get(app_for(&mock_server), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 4, 5, 6]);
}

#[tokio::test]
async fn test_sorting_reorders_without_changing_selection() {
    let mock_server = cats_forum(8).await;
    let app = app_for(&mock_server);

    let (_, unsorted) = get(app.clone(), "/comments/Cats?limit=6").await;
    let (status, asc) = get(app.clone(), "/comments/Cats?limit=6&sort_by_polarity_score=asc").await;
    assert_eq!(status, StatusCode::OK);
    let (_, desc) = get(app, "/comments/Cats?limit=6&sort_by_polarity_score=desc").await;

    let polarities = |body: &Value| -> Vec<f64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|c| c["polarity"].as_f64().unwrap())
            .collect()
    };

    let asc_p = polarities(&asc);
    assert!(asc_p.windows(2).all(|w| w[0] <= w[1]), "{:?}", asc_p);
    let desc_p = polarities(&desc);
    assert!(desc_p.windows(2).all(|w| w[0] >= w[1]), "{:?}", desc_p);

    let mut expected = ids(&unsorted);
    expected.sort();
    for body in [&asc, &desc] {
        let mut got = ids(body);
        got.sort();
        assert_eq!(got, expected);
    }
}

#[tokio::test]
async fn test_unknown_forum_is_404() {
    let mock_server = cats_forum(3).await;

    let (status, body) = get(app_for(&mock_server), "/comments/hamsters").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Subfeddit 'hamsters' not found");
}

#[tokio::test]
async fn test_no_comments_in_range_is_404() {
    let mock_server = cats_forum(3).await;

    let (status, body) = get(app_for(&mock_server), "/comments/Cats?start=2030-01-01T00:00:00Z").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["detail"],
        "No comments found for subfeddit 'Cats' in the given time range"
    );
}

#[tokio::test]
async fn test_invalid_parameters_are_422() {
    let mock_server = cats_forum(3).await;
    let app = app_for(&mock_server);

    for uri in [
        "/comments/Cats?limit=0",
        "/comments/Cats?limit=101",
        "/comments/Cats?limit=lots",
        "/comments/Cats?start=last-week",
        "/comments/Cats?end=2021-13-45T00:00:00",
        "/comments/Cats?sort_by_polarity_score=sideways",
    ] {
        let (status, body) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert!(body["detail"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_late_page_failure_returns_partial_result() {
    let mock_server = MockServer::start().await;
    mount_forums(&mock_server, json!([{"id": 1, "title": "Cats"}])).await;

    let first_page: Vec<Value> = (1..=5).map(|id| comment(id, "nice", id * 100)).collect();
    Mock::given(method("GET"))
        .and(path(format!("{}/comments/", API_PREFIX)))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comments": first_page })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/comments/", API_PREFIX)))
        .and(query_param("skip", "5"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get(app_for(&mock_server), "/comments/Cats?limit=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_first_page_failure_is_404_without_range_claim() {
    let mock_server = MockServer::start().await;
    mount_forums(&mock_server, json!([{"id": 1, "title": "Cats"}])).await;
    Mock::given(method("GET"))
        .and(path(format!("{}/comments/", API_PREFIX)))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let (status, body) = get(app_for(&mock_server), "/comments/Cats").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No comments could be retrieved for subfeddit 'Cats'");
}

#[tokio::test]
async fn test_request_timeout_is_500_with_detail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/subfeddits/", API_PREFIX)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"subfeddits": [{"id": 1, "title": "Cats"}]}))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server, PAGE_SIZE);
    config.server.request_timeout_secs = 1;
    config.feddit.timeout_secs = 5;

    let (status, body) = get(app_with(config), "/comments/Cats").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Request timed out after 1s");
}

#[tokio::test]
async fn test_forum_listing_failure_is_500() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/subfeddits/", API_PREFIX)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let (status, body) = get(app_for(&mock_server), "/comments/Cats").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("HTTP 503"));
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;

    let (status, body) = get(app_for(&mock_server), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
