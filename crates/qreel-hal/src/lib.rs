//! Qreel Hardware Abstraction Layer
//!
//! A unified interface over the execution targets a spin can run on: the
//! local statevector simulator and real quantum hardware.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] and [`BackendAvailability`] for routing decisions
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example: Running a Spin Circuit
//!
//! ```ignore
//! use qreel_hal::Backend;
//! use qreel_adapter_sim::SimulatorBackend;
//! use qreel_ir::SpinCircuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = SpinCircuit::new(std::f64::consts::FRAC_PI_2, false);
//!     let backend = SimulatorBackend::new();
//!
//!     let job_id = backend.submit(&circuit, 100).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("Counts: {:?}", result.counts);
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod capability;
mod error;
mod job;
mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
