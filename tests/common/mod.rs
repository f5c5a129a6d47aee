#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use seo_brief_generator::{
    api::models::{BriefCandidate, BriefRequest, SeoBrief},
    config::Config,
    AppState,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Requests a stub backend received, as (content type, raw body).
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<(String, String)>>>);

impl Captured {
    pub fn requests(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct StubReply {
    status: StatusCode,
    body: String,
    captured: Captured,
}

async fn answer(State(reply): State<StubReply>, headers: HeaderMap, raw: String) -> (StatusCode, [(axum::http::HeaderName, &'static str); 1], String) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    reply.captured.0.lock().unwrap().push((content_type, raw));
    (reply.status, [(CONTENT_TYPE, "application/json")], reply.body)
}

/// Backend whose generation and health endpoints always answer `status` with `body`.
pub fn backend(status: StatusCode, body: impl Into<String>) -> (Router, Captured) {
    let captured = Captured::default();
    let reply = StubReply {
        status,
        body: body.into(),
        captured: captured.clone(),
    };
    let router = Router::new()
        .route("/api/v1/generate-brief", post(answer))
        .route("/health", get(answer))
        .with_state(reply);
    (router, captured)
}

pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Address nothing listens on.
pub fn dead_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

pub fn relay_state(backend_url: &str) -> AppState {
    let config = Config::from_lookup(|key| match key {
        "BACKEND_URL" => Some(backend_url.to_string()),
        _ => None,
    })
    .unwrap();
    AppState::new(config)
}

pub fn marathon_candidate() -> BriefCandidate {
    BriefCandidate {
        title: "Best Running Shoes for Marathon Training".to_string(),
        target_audience: "Marathon runners aged 25-45".to_string(),
        primary_keywords: vec!["running shoes".to_string()],
        secondary_keywords: vec![],
    }
}

pub fn marathon_request() -> BriefRequest {
    marathon_candidate().into_request().unwrap()
}

pub fn sample_brief() -> SeoBrief {
    SeoBrief {
        meta_title: "Best Running Shoes for Marathon Training | 2024 Guide".to_string(),
        meta_description: "Compare the best marathon running shoes for cushioning, durability and speed.".to_string(),
        h1_suggestion: "Best Running Shoes for Marathon Training".to_string(),
        word_count_recommendation: 2200,
        content_outline: vec![
            "Why Shoe Choice Matters for Marathons".to_string(),
            "Top 7 Marathon Running Shoes".to_string(),
            "How to Choose".to_string(),
        ],
        keyword_placement_tips: vec!["Place 'running shoes' in the H1 and first 100 words".to_string()],
        internal_linking_suggestions: vec!["Link to the 16-week marathon plan".to_string()],
    }
}
