//! End-to-end tests for the Faleproxy REST API.
//!
//! Drives the real router with in-process requests; the remote site is
//! mocked with wiremock, so no live network access is needed.

use assert_json_diff::assert_json_include;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use faleproxy::rest::{router, AppState};
use http_body_util::BodyExt;
use scraper::{Html, Selector};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Yale University Test Page</title>
  <style>.yale-banner { color: blue; }</style>
</head>
<body>
  <h1>Welcome to Yale University</h1>
  <p>Yale University is a private Ivy League research university in New Haven.</p>
  <nav>
    <a href="https://www.yale.edu/about">About Yale</a>
    <a href="https://www.yale.edu/admissions">Yale Admissions</a>
  </nav>
  <script>var campus = "yale";</script>
</body>
</html>"#;

fn app() -> Router {
    let state = AppState::new("yale", "fale", 5_000).expect("valid word pair");
    router(Arc::new(state))
}

async fn post_fetch(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/fetch")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, json)
}

fn select_text(document: &Html, selector: &str) -> String {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}

#[tokio::test]
async fn replaces_target_in_fetched_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_HTML))
        .mount(&server)
        .await;

    let (status, body) = post_fetch(app(), serde_json::json!({ "url": server.uri() })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["title"], "Fale University Test Page");
    assert_eq!(body["originalUrl"], server.uri());

    let document = Html::parse_document(body["content"].as_str().unwrap());
    assert_eq!(select_text(&document, "h1"), "Welcome to Fale University");
    assert!(select_text(&document, "p").contains("Fale University is a private"));

    // Link text changes, hyperlink targets do not.
    let link_sel = Selector::parse("a").unwrap();
    let links: Vec<_> = document.select(&link_sel).collect();
    assert_eq!(links[0].text().collect::<String>(), "About Fale");
    assert!(links
        .iter()
        .all(|a| a.value().attr("href").unwrap().contains("yale.edu")));
}

#[tokio::test]
async fn script_and_style_content_is_not_rewritten() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_HTML))
        .mount(&server)
        .await;

    let (_, body) = post_fetch(app(), serde_json::json!({ "url": server.uri() })).await;
    let content = body["content"].as_str().unwrap();

    assert!(content.contains(r#"var campus = "yale";"#));
    assert!(content.contains(".yale-banner { color: blue; }"));
}

#[tokio::test]
async fn missing_url_is_rejected_without_network_access() {
    // A mock server expecting zero requests: input validation must fail
    // before any fetch is attempted.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_fetch(app(), serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL is required");
    server.verify().await;
}

#[tokio::test]
async fn empty_url_is_rejected() {
    let (status, body) = post_fetch(app(), serde_json::json!({ "url": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn connection_refused_reports_fetch_failure() {
    // Bind then drop a listener to get a port nothing is serving.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let (status, body) = post_fetch(
        app(),
        serde_json::json!({ "url": format!("http://127.0.0.1:{port}/") }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Failed to fetch content"));
    assert!(body.get("success").is_none());
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn non_success_status_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (status, body) = post_fetch(app(), serde_json::json!({ "url": server.uri() })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Failed to fetch content"));
}

#[tokio::test]
async fn mixed_case_variations_are_projected() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body><p>Testing YaLe and yAlE and YAlE variations.</p></body>
</html>"#;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let (status, body) = post_fetch(app(), serde_json::json!({ "url": server.uri() })).await;

    assert_eq!(status, StatusCode::OK);
    let document = Html::parse_document(body["content"].as_str().unwrap());
    let text = select_text(&document, "p");
    assert!(text.contains("FaLe"));
    assert!(text.contains("fAlE"));
    assert!(text.contains("FAlE"));
}

#[tokio::test]
async fn rewriting_already_rewritten_content_is_a_noop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_HTML))
        .mount(&server)
        .await;

    let (_, first) = post_fetch(app(), serde_json::json!({ "url": server.uri() })).await;
    let rewritten = first["content"].as_str().unwrap().to_string();

    // Serve the already-rewritten document and run it through again.
    let second_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rewritten.clone()))
        .mount(&second_server)
        .await;

    let (status, second) =
        post_fetch(app(), serde_json::json!({ "url": second_server.uri() })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["content"].as_str().unwrap(), rewritten);
    assert_eq!(second["title"], first["title"]);
}

#[tokio::test]
async fn serves_embedded_frontend() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("<form"));
    assert!(page.contains("Faleproxy"));
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_json_include!(
        actual: json,
        expected: serde_json::json!({ "status": "ok" })
    );
}
