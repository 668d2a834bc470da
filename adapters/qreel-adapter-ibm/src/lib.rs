//! IBM Quantum backend adapter.
//!
//! Talks to the IBM Quantum REST API: resolves a target device (explicitly
//! named or least-busy), reports live queue depth for routing, submits spin
//! circuits as OpenQASM 3 sampler jobs, and converts quasi-probability
//! results back into integer counts.

mod api;
mod backend;
mod error;

pub use api::{BackendInfo, BackendStatus, DEFAULT_ENDPOINT, IbmClient};
pub use backend::IbmBackend;
pub use error::{IbmError, IbmResult};
