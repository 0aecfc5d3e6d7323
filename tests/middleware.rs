mod common;

use axum::{body::Body, http::Request};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{FakeBroker, PASSWORD, USERNAME, app, basic_auth, request, send};

#[tokio::test]
async fn rejects_requests_without_credentials() {
    let app = app(FakeBroker::new());
    let req = Request::builder()
        .uri("/v2/catalog")
        .header("X-Broker-API-Version", "2.14")
        .body(Body::empty())
        .unwrap();

    let res = send(&app, req).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.text, "Not Authorized");
    assert!(res.headers.contains_key("www-authenticate"));
}

#[tokio::test]
async fn rejects_wrong_password() {
    let app = app(FakeBroker::new());
    let req = Request::builder()
        .uri("/v2/catalog")
        .header("Authorization", basic_auth(USERNAME, "nope"))
        .header("X-Broker-API-Version", "2.14")
        .body(Body::empty())
        .unwrap();

    assert_eq!(send(&app, req).await.status, 401);
}

#[tokio::test]
async fn auth_runs_before_version_check() {
    let app = app(FakeBroker::new());
    let req = Request::builder()
        .uri("/v2/catalog")
        .body(Body::empty())
        .unwrap();

    assert_eq!(send(&app, req).await.status, 401);
}

#[tokio::test]
async fn missing_version_header_is_precondition_failed() {
    let app = app(FakeBroker::new());
    let req = Request::builder()
        .uri("/v2/catalog")
        .header("Authorization", basic_auth(USERNAME, PASSWORD))
        .body(Body::empty())
        .unwrap();

    let res = send(&app, req).await;
    assert_eq!(res.status, 412);
    let description = res.body["description"].as_str().unwrap();
    assert!(description.contains("X-Broker-API-Version"));
}

#[tokio::test]
async fn unsupported_major_version_is_precondition_failed() {
    let app = app(FakeBroker::new());
    for version in ["3.0", "1.13", "banana"] {
        let res = send(
            &app,
            request("GET", "/v2/catalog", version)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status, 412, "version {version}");
    }
}

#[tokio::test]
async fn version_failure_still_echoes_request_identity() {
    let app = app(FakeBroker::new());
    let req = Request::builder()
        .uri("/v2/catalog")
        .header("Authorization", basic_auth(USERNAME, PASSWORD))
        .header("X-Broker-API-Request-Identity", "req-42")
        .body(Body::empty())
        .unwrap();

    let res = send(&app, req).await;
    assert_eq!(res.status, 412);
    assert_eq!(res.headers["x-broker-api-request-identity"], "req-42");
}

#[tokio::test]
async fn request_identity_is_echoed_on_success() {
    let app = app(FakeBroker::new());
    let res = send(
        &app,
        request("GET", "/v2/catalog", "2.14")
            .header("X-Broker-API-Request-Identity", "req-7")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.headers["x-broker-api-request-identity"], "req-7");
}

#[tokio::test]
async fn no_request_identity_header_without_one_on_the_request() {
    let app = app(FakeBroker::new());
    let res = send(
        &app,
        request("GET", "/v2/catalog", "2.14")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert!(!res.headers.contains_key("x-broker-api-request-identity"));
}

#[tokio::test]
async fn request_context_reaches_the_broker() {
    let broker = FakeBroker::new();
    let app = app(broker.clone());
    common::provision(&app, "seed").await;

    let identity = format!(
        "cloudfoundry {}",
        STANDARD.encode(r#"{"user_id":"683ea748"}"#)
    );
    let res = send(
        &app,
        request("GET", "/v2/service_instances/seed", "2.14")
            .header("X-Vcap-Request-Id", "corr-1")
            .header("X-Broker-API-Originating-Identity", identity.as_str())
            .header("X-Api-Info-Location", "api.example.com/v2/info")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(res.status, 200);

    let ctx = broker.with(|s| s.last_ctx.clone()).unwrap();
    assert_eq!(ctx.correlation_id, "corr-1");
    assert_eq!(ctx.info_location.as_deref(), Some("api.example.com/v2/info"));
    assert_eq!(ctx.api_version.map(|v| v.minor), Some(14));

    let origin = ctx.originating_identity().unwrap();
    assert_eq!(origin.platform, "cloudfoundry");
    assert_eq!(origin.value["user_id"], "683ea748");
}

#[tokio::test]
async fn correlation_id_is_generated_when_absent() {
    let broker = FakeBroker::new();
    let app = app(broker.clone());
    common::provision(&app, "i-1").await;

    let ctx = broker.with(|s| s.last_ctx.clone()).unwrap();
    assert!(!ctx.correlation_id.is_empty());
}
