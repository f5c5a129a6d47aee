mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use seo_brief_generator::api::models::{BriefResponse, SeoBrief, GENERATE_FALLBACK_MESSAGE};
use seo_brief_generator::client::ApiClient;
use seo_brief_generator::error::AppError;

use common::{backend, base_url, dead_addr, marathon_request, sample_brief, spawn};

#[tokio::test]
async fn structured_brief_round_trips() {
    let expected = BriefResponse::ok(sample_brief());
    let (router, captured) = backend(StatusCode::OK, serde_json::to_string(&expected).unwrap());
    let addr = spawn(router).await;

    let client = ApiClient::direct(base_url(addr));
    let response: BriefResponse<SeoBrief> = client.generate_brief(&marathon_request()).await.unwrap();
    assert_eq!(response, expected);

    let requests = captured.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "application/json");
    let sent: Value = serde_json::from_str(&requests[0].1).unwrap();
    assert_eq!(
        sent,
        json!({
            "title": "Best Running Shoes for Marathon Training",
            "target_audience": "Marathon runners aged 25-45",
            "primary_keywords": ["running shoes"],
            "secondary_keywords": []
        })
    );
}

#[tokio::test]
async fn text_brief_deployment_decodes_string() {
    let body = json!({"success": true, "brief": "# SEO Brief\n\nMeta title: Shoes", "error": null});
    let (router, _) = backend(StatusCode::OK, body.to_string());
    let addr = spawn(router).await;

    let response: BriefResponse<String> = ApiClient::direct(base_url(addr))
        .generate_brief(&marathon_request())
        .await
        .unwrap();
    assert_eq!(response.into_brief().unwrap(), "# SEO Brief\n\nMeta title: Shoes");
}

#[tokio::test]
async fn success_status_envelope_is_returned_unchecked() {
    let body = json!({"success": false, "brief": null, "error": "Model overloaded"});
    let (router, _) = backend(StatusCode::OK, body.to_string());
    let addr = spawn(router).await;

    let response: BriefResponse = ApiClient::direct(base_url(addr))
        .generate_brief(&marathon_request())
        .await
        .unwrap();
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Model overloaded"));
}

#[tokio::test]
async fn unparseable_failure_body_uses_generic_message() {
    let (router, _) = backend(StatusCode::SERVICE_UNAVAILABLE, "<html>upstream down</html>");
    let addr = spawn(router).await;

    let err = ApiClient::direct(base_url(addr))
        .generate_brief::<SeoBrief>(&marathon_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BackendError(_)));
    assert_eq!(err.to_string(), GENERATE_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn failure_body_detail_is_surfaced() {
    let (router, _) = backend(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail": "Gemini API key invalid"}"#);
    let addr = spawn(router).await;

    let err = ApiClient::direct(base_url(addr))
        .generate_brief::<SeoBrief>(&marathon_request())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Gemini API key invalid");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let http = reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();
    let err = ApiClient::direct(base_url(dead_addr()))
        .with_http_client(http)
        .generate_brief::<SeoBrief>(&marathon_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TransportError(_)));
}

#[tokio::test]
async fn malformed_success_body_is_parse_error() {
    let (router, _) = backend(StatusCode::OK, r#"{"success": true, "brief": {"meta_title": 7}}"#);
    let addr = spawn(router).await;

    let err = ApiClient::direct(base_url(addr))
        .generate_brief::<SeoBrief>(&marathon_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ParseError(_)));
}

#[tokio::test]
async fn health_check_returns_status() {
    let (router, _) = backend(StatusCode::OK, r#"{"status": "healthy", "model": "gemini"}"#);
    let addr = spawn(router).await;

    let health = ApiClient::direct(base_url(addr)).check_health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.details.get("model"), Some(&json!("gemini")));
}

#[tokio::test]
async fn failing_health_check_reports_unavailable() {
    let (router, _) = backend(StatusCode::SERVICE_UNAVAILABLE, r#"{"status": "degraded"}"#);
    let addr = spawn(router).await;

    let err = ApiClient::direct(base_url(addr)).check_health().await.unwrap_err();
    assert_eq!(err.to_string(), "API is not available");
}
