use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::models::{BriefRequest, BriefResponse, HealthStatus, GENERATE_FALLBACK_MESSAGE};
use crate::config::{ClientMode, Config, BACKEND_GENERATE_PATH, HEALTH_PATH, RELAY_GENERATE_PATH};
use crate::error::{AppError, Result};

/// Error fields a failing backend or relay may carry, in lookup order.
const ERROR_FIELDS: [&str; 2] = ["error", "detail"];

const HEALTH_FALLBACK_MESSAGE: &str = "API is not available";

/// Where generation requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientTarget {
    /// Straight to the backend's generation endpoint.
    Direct,
    /// Through the same-origin relay served at `origin`.
    Proxy { origin: String },
}

/// Anything that can turn a validated request into a backend envelope.
#[async_trait]
pub trait BriefGenerator<B: Send>: Send + Sync {
    async fn generate(&self, request: &BriefRequest) -> Result<BriefResponse<B>>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    backend_url: String,
    target: ClientTarget,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        let target = match config.client_mode {
            ClientMode::Direct => ClientTarget::Direct,
            ClientMode::Proxy => ClientTarget::Proxy {
                origin: config.proxy_origin.clone(),
            },
        };
        ApiClient {
            http: Client::new(),
            backend_url: config.backend_url.clone(),
            target,
        }
    }

    pub fn direct(backend_url: impl Into<String>) -> Self {
        ApiClient {
            http: Client::new(),
            backend_url: trim_base(backend_url.into()),
            target: ClientTarget::Direct,
        }
    }

    pub fn via_proxy(backend_url: impl Into<String>, origin: impl Into<String>) -> Self {
        ApiClient {
            http: Client::new(),
            backend_url: trim_base(backend_url.into()),
            target: ClientTarget::Proxy {
                origin: trim_base(origin.into()),
            },
        }
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn target(&self) -> &ClientTarget {
        &self.target
    }

    /// URL generation requests are posted to for the active target.
    pub fn generate_url(&self) -> String {
        match &self.target {
            ClientTarget::Direct => format!("{}{}", self.backend_url, BACKEND_GENERATE_PATH),
            ClientTarget::Proxy { origin } => format!("{}{}", origin, RELAY_GENERATE_PATH),
        }
    }

    /// Posts the request and returns the envelope as the backend sent it.
    ///
    /// The envelope is not checked here; callers decide whether it carries a
    /// usable brief (see [`BriefResponse::into_brief`]).
    pub async fn generate_brief<B: DeserializeOwned>(&self, request: &BriefRequest) -> Result<BriefResponse<B>> {
        let url = self.generate_url();
        info!(%url, title = request.title(), "requesting SEO brief");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = extract_error_message(&body);
            warn!(status = status.as_u16(), %message, "brief generation failed");
            return Err(AppError::BackendError(message));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "brief response received");
        Ok(serde_json::from_slice(&body)?)
    }

    /// Hits the backend liveness endpoint.
    pub async fn check_health(&self) -> Result<HealthStatus> {
        let url = format!("{}{}", self.backend_url, HEALTH_PATH);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "health check failed");
            return Err(AppError::BackendError(HEALTH_FALLBACK_MESSAGE.to_string()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl<B> BriefGenerator<B> for ApiClient
where
    B: DeserializeOwned + Send + 'static,
{
    async fn generate(&self, request: &BriefRequest) -> Result<BriefResponse<B>> {
        self.generate_brief(request).await
    }
}

/// Picks the best error text out of a failure body, tolerating bodies that are not JSON.
pub fn extract_error_message(body: &[u8]) -> String {
    let data: Value = serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Default::default()));
    ERROR_FIELDS
        .iter()
        .filter_map(|field| data.get(*field).and_then(Value::as_str))
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| GENERATE_FALLBACK_MESSAGE.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
