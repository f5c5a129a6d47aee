use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

/// Backend used when `BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Path of the generation endpoint on the real backend.
pub const BACKEND_GENERATE_PATH: &str = "/api/v1/generate-brief";

/// Path of the same-origin relay route.
pub const RELAY_GENERATE_PATH: &str = "/api/generate-brief";

/// Liveness path on the real backend.
pub const HEALTH_PATH: &str = "/health";

/// How the API client reaches the backend in this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    Direct,
    Proxy,
}

impl FromStr for ClientMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(ClientMode::Direct),
            "proxy" | "relay" => Ok(ClientMode::Proxy),
            other => Err(AppError::ConfigError(format!("Unknown client mode: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub backend_url: String,
    pub client_mode: ClientMode,
    pub proxy_origin: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
        let server_addr = SocketAddr::new(ip, port);

        let backend_url = normalize_base_url(
            &lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        )?;

        let client_mode = match lookup("BRIEF_CLIENT_MODE") {
            Some(mode) => mode.parse()?,
            None => ClientMode::Direct,
        };

        let proxy_origin = match lookup("PROXY_ORIGIN") {
            Some(origin) => normalize_base_url(&origin)?,
            None => default_origin(server_addr),
        };

        Ok(Config {
            server_addr,
            backend_url,
            client_mode,
            proxy_origin,
        })
    }

    /// Full URL of the backend generation endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}{}", self.backend_url, BACKEND_GENERATE_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.backend_url, HEALTH_PATH)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    reqwest::Url::parse(trimmed)
        .map_err(|e| AppError::ConfigError(format!("Invalid URL {}: {}", trimmed, e)))?;
    Ok(trimmed.to_string())
}

fn default_origin(addr: SocketAddr) -> String {
    let ip = if addr.ip().is_unspecified() {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    } else {
        addr.ip()
    };
    format!("http://{}", SocketAddr::new(ip, addr.port()))
}
