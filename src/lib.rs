pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod validation;

use std::sync::Arc;
use config::Config;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }
}
