//! Quantum spin pipeline.
//!
//! Composes five stages per request:
//!
//! ```text
//!   Circuit Builder → Target Selector → Executor → Sampler → Symbol Mapper
//!   (qreel-ir)        (connection)      (executor)  (sampler)  (symbols)
//! ```
//!
//! The engine degrades rather than fails: when quantum hardware is
//! unconfigured, busy, or broken, a spin runs on the local statevector
//! simulator, and the response says so via `backend_used`. Hardware
//! breakage is sticky: one failure disables hardware for the rest of the
//! process lifetime.

mod config;
mod connection;
mod engine;
mod error;
mod executor;
mod sampler;
mod symbols;

pub use config::{DEFAULT_SHOTS, EngineConfig};
pub use connection::{ConnectionManager, ConnectionStatus, ExecutionTarget, MAX_PENDING_JOBS};
pub use engine::{EngineInfo, HardwareInfo, SpinEngine, SpinOutcome};
pub use error::{EngineError, EngineResult};
pub use sampler::{DrawnOutcome, draw};
pub use symbols::{SYMBOLS, symbol_for_bit, symbols_for};
