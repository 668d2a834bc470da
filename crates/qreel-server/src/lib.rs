//! HTTP surface for the qreel quantum slot engine.
//!
//! The server layer is deliberately thin: routing, schema defaults, and
//! CORS. Everything with design weight lives in `qreel-engine`.

pub mod api;
pub mod dto;
pub mod error;
mod server;
mod state;

pub use server::create_router;
pub use state::{AppState, ServerConfig};
