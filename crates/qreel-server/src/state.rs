//! Application state for the server.

use std::net::SocketAddr;

use qreel_engine::SpinEngine;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: ([0, 0, 0, 0], 8000).into(),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// The spin engine.
    pub engine: SpinEngine,
}

impl AppState {
    /// Create application state around an engine.
    pub fn new(engine: SpinEngine) -> Self {
        Self { engine }
    }
}
