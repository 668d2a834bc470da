//! Circuit execution against the selected target.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use qreel_adapter_sim::SimulatorBackend;
use qreel_hal::{Backend, ExecutionResult, HalError, HalResult};
use qreel_ir::SpinCircuit;

use crate::connection::{ConnectionManager, ExecutionTarget};
use crate::error::EngineResult;

/// One completed execution: the distribution plus where it ran.
pub struct Execution {
    /// The outcome distribution.
    pub result: ExecutionResult,
    /// Backend identifier for the response (`simulator` or the device name).
    pub backend_used: String,
    /// Queue depth observed for a completed hardware run.
    pub queue_position: Option<u32>,
}

/// Runs spin circuits for a fixed shot count.
///
/// The executor handles no hardware failures itself: any error or timeout
/// on the hardware path is reported to the connection manager, which
/// degrades permanently, and the spin reruns on the simulator.
pub struct Executor {
    simulator: Arc<SimulatorBackend>,
    shots: u32,
    max_queue_wait: Duration,
}

impl Executor {
    /// Create an executor with the given shot count and hardware timeout.
    pub fn new(shots: u32, max_queue_wait: Duration) -> Self {
        Self {
            simulator: Arc::new(SimulatorBackend::new()),
            shots,
            max_queue_wait,
        }
    }

    /// Execute one spin circuit on whichever target the manager selects.
    pub async fn execute(
        &self,
        connection: &ConnectionManager,
        circuit: &SpinCircuit,
        fallback_on_busy: bool,
    ) -> EngineResult<Execution> {
        match connection.select_target(fallback_on_busy).await {
            ExecutionTarget::Hardware {
                backend,
                pending_jobs,
            } => {
                info!(
                    backend = %backend.name(),
                    pending_jobs,
                    "running on quantum hardware"
                );

                match self.run_hardware(backend.as_ref(), circuit).await {
                    Ok(result) => {
                        if let Some((outcome, count)) = result.counts.most_frequent() {
                            debug!(%outcome, count, "hardware execution complete");
                        }
                        Ok(Execution {
                            backend_used: backend.name().to_string(),
                            queue_position: Some(pending_jobs),
                            result,
                        })
                    }
                    Err(e) => {
                        warn!(error = %e, "hardware execution failed, falling back to simulator");
                        connection
                            .degrade(&format!("hardware execution failed: {e}"))
                            .await;
                        self.run_simulator(circuit).await
                    }
                }
            }
            ExecutionTarget::Simulator => self.run_simulator(circuit).await,
        }
    }

    /// Submit to hardware and wait, bounded by the overall timeout.
    ///
    /// The in-flight job is not cancelled on timeout; the caller simply
    /// stops waiting and treats it as a failure.
    async fn run_hardware(
        &self,
        backend: &dyn Backend,
        circuit: &SpinCircuit,
    ) -> HalResult<ExecutionResult> {
        let submit_and_wait = async {
            let job_id = backend.submit(circuit, self.shots).await?;
            backend.wait(&job_id).await
        };

        timeout(self.max_queue_wait, submit_and_wait)
            .await
            .map_err(|_| HalError::Timeout("hardware spin".into()))?
    }

    async fn run_simulator(&self, circuit: &SpinCircuit) -> EngineResult<Execution> {
        debug!("running on statevector simulator");
        let job_id = self.simulator.submit(circuit, self.shots).await?;
        let result = self.simulator.wait(&job_id).await?;

        Ok(Execution {
            backend_used: self.simulator.name().to_string(),
            queue_position: None,
            result,
        })
    }
}
