//! The spin engine: the five pipeline stages composed per request.

use serde::Serialize;
use tracing::info;

use qreel_hal::Counts;
use qreel_ir::SpinCircuit;

use crate::config::EngineConfig;
use crate::connection::ConnectionManager;
use crate::error::EngineResult;
use crate::executor::Executor;
use crate::{sampler, symbols};

/// The outcome of one spin.
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    /// Display symbols, one per reel.
    pub symbols: Vec<String>,
    /// Raw per-reel measurement bits.
    pub measurements: Vec<u8>,
    /// Full outcome distribution across all shots.
    pub distribution: Counts,
    /// Backend identifier (`simulator` or the hardware device name).
    pub backend_used: String,
    /// Queue depth observed for a completed hardware run.
    pub queue_position: Option<u32>,
}

/// Hardware connection details for the info endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HardwareInfo {
    /// Whether hardware is currently usable.
    pub connected: bool,
    /// Connection state name.
    pub state: &'static str,
    /// Resolved device name, when connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Device qubit count, when connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_qubits: Option<u32>,
    /// Live pending-job count (best effort).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_jobs: Option<u32>,
}

/// Engine state snapshot for the info endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    /// Hardware connection details.
    pub hardware: HardwareInfo,
    /// Whether busy hardware routes spins to the simulator.
    pub use_simulator_fallback: bool,
    /// Overall hardware timeout in seconds.
    pub max_queue_wait: u64,
    /// Shots per spin.
    pub shots: u32,
}

/// The quantum slot engine.
///
/// Owns the hardware connection manager and the executor; each call to
/// [`spin`](Self::spin) runs the full pipeline: build the circuit, select
/// the target, execute, draw one outcome, map it to symbols.
pub struct SpinEngine {
    connection: ConnectionManager,
    executor: Executor,
    config: EngineConfig,
}

impl SpinEngine {
    /// Build an engine from the process environment and connect.
    pub async fn from_env() -> Self {
        Self::new(EngineConfig::from_env()).await
    }

    /// Build an engine from explicit configuration and connect.
    pub async fn new(config: EngineConfig) -> Self {
        let connection = ConnectionManager::establish(&config).await;
        Self::with_connection(config, connection)
    }

    /// Build an engine around an existing connection manager.
    pub fn with_connection(config: EngineConfig, connection: ConnectionManager) -> Self {
        let executor = Executor::new(config.shots, config.max_queue_wait);
        Self {
            connection,
            executor,
            config,
        }
    }

    /// Run one spin.
    ///
    /// Never fails for hardware reasons: every hardware problem degrades
    /// to the simulator inside the pipeline. The only error left is the
    /// empty-distribution precondition violation.
    pub async fn spin(&self, theta: f64, entangle: bool) -> EngineResult<SpinOutcome> {
        let circuit = SpinCircuit::new(theta, entangle);

        let execution = self
            .executor
            .execute(&self.connection, &circuit, self.config.fallback_on_busy)
            .await?;

        let drawn = sampler::draw(&execution.result.counts)?;
        let reel_symbols = symbols::symbols_for(&drawn.bits)
            .into_iter()
            .map(str::to_string)
            .collect();

        info!(
            backend = %execution.backend_used,
            outcome = %drawn.bitstring,
            theta,
            entangle,
            "spin complete"
        );

        Ok(SpinOutcome {
            symbols: reel_symbols,
            measurements: drawn.bits,
            distribution: execution.result.counts,
            backend_used: execution.backend_used,
            queue_position: execution.queue_position,
        })
    }

    /// Snapshot of engine state for the info endpoint.
    ///
    /// The pending-job probe is best effort and read-only: a failure here
    /// reports `None` and never degrades the connection.
    pub async fn info(&self) -> EngineInfo {
        let status = self.connection.status().await;

        let pending_jobs = match self.connection.hardware().await {
            Some(backend) => backend
                .availability()
                .await
                .ok()
                .and_then(|availability| availability.queue_depth),
            None => None,
        };

        EngineInfo {
            hardware: HardwareInfo {
                connected: status.state == "connected",
                state: status.state,
                backend: status.backend,
                num_qubits: status.num_qubits,
                pending_jobs,
            },
            use_simulator_fallback: self.config.fallback_on_busy,
            max_queue_wait: self.config.max_queue_wait.as_secs(),
            shots: self.config.shots,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
