//! Serving the staged site end to end.

use std::fs;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wasm_site::security::headers::DEFAULT_CONTENT_SECURITY_POLICY;
use wasm_site::{stage_assets, HttpServer, SiteConfig, StageConfig};

mod common;
use common::{start_server, Fixture, CORE_WASM};

fn site_config(fixture: &Fixture) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.site.static_dir = fixture.static_dir().to_string_lossy().into_owned();
    config.staging.source_dir = fixture.source().to_string_lossy().into_owned();
    config.staging.dest_dir = fixture.dest().to_string_lossy().into_owned();
    config
}

#[tokio::test]
async fn test_serves_staged_wasm_with_isolation_headers() {
    let fixture = Fixture::new();
    let config = site_config(&fixture);
    stage_assets(&StageConfig::from(&config.staging)).unwrap();

    let response = HttpServer::new(config)
        .router()
        .oneshot(
            Request::builder()
                .uri("/wasm/ffmpeg-core.wasm")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cross-origin-embedder-policy"], "require-corp");
    assert_eq!(response.headers()["content-security-policy"], DEFAULT_CONTENT_SECURITY_POLICY);
    assert!(response.headers().contains_key("x-request-id"));
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], CORE_WASM);
}

#[tokio::test]
async fn test_not_found_still_carries_headers() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.static_dir()).unwrap();

    let response = HttpServer::new(site_config(&fixture))
        .router()
        .oneshot(Request::builder().uri("/missing.js").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["cross-origin-opener-policy"], "same-origin");
    assert_eq!(response.headers()["cross-origin-resource-policy"], "same-site");
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let fixture = Fixture::new();

    let response = HttpServer::new(site_config(&fixture))
        .router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "build-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "build-42");
}

#[tokio::test]
async fn test_live_server_and_graceful_shutdown() {
    let fixture = Fixture::new();
    let config = site_config(&fixture);
    stage_assets(&StageConfig::from(&config.staging)).unwrap();
    fs::write(fixture.static_dir().join("index.html"), "<!doctype html>").unwrap();

    let server = start_server(config).await;
    let addr = server.addr;
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["cross-origin-opener-policy"], "same-origin");
    assert_eq!(res.text().await.unwrap(), "<!doctype html>");

    let res = client
        .get(format!("http://{addr}/wasm/ffmpeg-core.worker.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["cross-origin-embedder-policy"], "require-corp");

    server.stop().await.unwrap();
    // serve loop has returned and dropped the listener
    assert!(client.get(format!("http://{addr}/health")).send().await.is_err());
}
