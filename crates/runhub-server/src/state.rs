//! Shared application state for the Axum server.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::fixture::Fixture;

#[derive(Clone)]
pub struct AppState {
    pub fixture: Arc<RwLock<Fixture>>,
}

impl AppState {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(RwLock::new(fixture)),
        }
    }
}

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Fixture file; the built-in sample data is used when unset.
    pub fixtures: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            fixtures: None,
        }
    }
}
