use super::*;

use std::time::Duration;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;

use crate::config::{ProxyTimeouts, ServerConfig};

#[test]
fn upstream_url_joins_path_and_query() {
    assert_eq!(
        upstream_url("https://hr.example.com/", "company-Setup/designations/", None),
        "https://hr.example.com/company-Setup/designations/"
    );
    assert_eq!(
        upstream_url("https://hr.example.com", "/company-Setup-fkf/parent-departments/", Some("page=2")),
        "https://hr.example.com/company-Setup-fkf/parent-departments/?page=2"
    );
    assert_eq!(upstream_url("http://h", "x", Some("")), "http://h/x");
}

#[test]
fn forwarded_headers_drops_everything_else() {
    let mut incoming = HeaderMap::new();
    incoming.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    incoming.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    incoming.insert(header::COOKIE, HeaderValue::from_static("session=1"));
    incoming.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

    let out = forwarded_headers(&incoming);
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer abc");
    assert!(out.get(header::COOKIE).is_none());
    assert!(out.get(header::HOST).is_none());
}

#[test]
fn proxy_errors_map_to_gateway_statuses() {
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(ProxyError::Upstream("refused".into()).status(), StatusCode::BAD_GATEWAY);
    let response = ProxyError::Upstream("refused".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// END TO END
// =============================================================================

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn state_for(api_url: String) -> AppState {
    AppState::new(ServerConfig {
        port: 0,
        api_url,
        timeouts: ProxyTimeouts { request_secs: 2, connect_secs: 1 },
        site_dir: None,
    })
    .unwrap()
}

async fn fake_upstream() -> String {
    let router = Router::new()
        .route(
            "/company-Setup/designations/",
            get(|headers: HeaderMap| async move {
                let auth = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).unwrap_or("").to_owned();
                axum::Json(serde_json::json!([{ "id": 1, "name": "Engineer", "auth": auth }]))
            })
            .post(|body: String| async move { (StatusCode::BAD_REQUEST, format!("{{\"detail\":\"got {body}\"}}")) }),
        );
    serve(router).await
}

#[tokio::test]
async fn forward_relays_body_status_and_auth() {
    let upstream = fake_upstream().await;
    let proxy = serve(crate::routes::api_routes(state_for(upstream))).await;
    let http = reqwest::Client::new();

    let listed: serde_json::Value = http
        .get(format!("{proxy}/api/company-Setup/designations/"))
        .bearer_auth("tok")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed[0]["name"], "Engineer");
    assert_eq!(listed[0]["auth"], "Bearer tok");

    let rejected = http
        .post(format!("{proxy}/api/company-Setup/designations/"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(rejected.text().await.unwrap(), "{\"detail\":\"got {}\"}");
}

#[tokio::test]
async fn forward_reports_unreachable_upstream_as_bad_gateway() {
    // Bind then drop to get a port nothing listens on.
    let dead = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let proxy = serve(crate::routes::api_routes(state_for(format!("http://{dead}")))).await;

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        reqwest::get(format!("{proxy}/api/company-Setup/designations/")),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().starts_with("upstream unavailable"));
}

#[tokio::test]
async fn healthz_answers_ok() {
    let proxy = serve(crate::routes::api_routes(state_for("http://127.0.0.1:9".to_owned()))).await;
    let response = reqwest::get(format!("{proxy}/healthz")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
