//! Hardware connection manager and execution target selection.
//!
//! The hardware handle is the only cross-request shared state in the
//! system. It lives behind an explicit state machine:
//!
//! ```text
//!   Unconfigured                 (no token: simulator forever, silently)
//!   Connected(handle) ──→ Degraded
//!                 (any connection/availability/execution failure; one-way,
//!                  no reconnection for the process lifetime)
//! ```
//!
//! Request handlers never touch the handle directly; they ask
//! [`ConnectionManager::select_target`] for this request's
//! [`ExecutionTarget`].

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use qreel_adapter_ibm::IbmBackend;
use qreel_hal::{Backend, BackendConfig};

use crate::config::EngineConfig;

/// Hardware queue threshold: at this many pending jobs (and above), a spin
/// routes to the simulator when fallback-on-busy is enabled.
pub const MAX_PENDING_JOBS: u32 = 10;

/// Where a single spin executes.
pub enum ExecutionTarget {
    /// Local statevector simulator.
    Simulator,
    /// Connected quantum hardware, with its queue depth at selection time.
    Hardware {
        /// Handle to the hardware backend.
        backend: Arc<dyn Backend>,
        /// Pending jobs observed when the target was selected.
        pending_jobs: u32,
    },
}

/// Lifecycle state of the hardware connection.
enum ConnectionState {
    /// No credentials configured; hardware was never an option.
    Unconfigured,
    /// Hardware connected and eligible for selection.
    Connected(Arc<dyn Backend>),
    /// Hardware permanently abandoned after a failure.
    Degraded,
}

/// Point-in-time connection status, for the info endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// State name: `unconfigured`, `connected`, or `degraded`.
    pub state: &'static str,
    /// Resolved hardware backend name, when connected.
    pub backend: Option<String>,
    /// Qubit count of the connected device.
    pub num_qubits: Option<u32>,
}

/// Owner of the process-wide hardware handle.
pub struct ConnectionManager {
    state: RwLock<ConnectionState>,
}

impl ConnectionManager {
    /// Connect according to configuration.
    ///
    /// No token → `Unconfigured`. A configured token that fails to connect
    /// is non-fatal: the failure is logged and the manager starts
    /// `Degraded` (simulator for the rest of the process lifetime).
    pub async fn establish(config: &EngineConfig) -> Self {
        let Some(token) = config.ibm_token.as_ref() else {
            info!("no IBM Quantum token configured, using simulator");
            return Self::unconfigured();
        };

        let mut backend_config = BackendConfig::new("ibm").with_token(token);
        if let Some(endpoint) = &config.ibm_endpoint {
            backend_config = backend_config.with_endpoint(endpoint);
        }
        if let Some(name) = &config.ibm_backend {
            backend_config = backend_config.with_extra("backend", serde_json::json!(name));
        }

        match IbmBackend::connect(backend_config).await {
            Ok(backend) => Self::connected(Arc::new(backend)),
            Err(e) => {
                warn!(error = %e, "failed to connect to IBM Quantum, falling back to simulator");
                Self::degraded()
            }
        }
    }

    /// A manager with no hardware configured.
    pub fn unconfigured() -> Self {
        Self {
            state: RwLock::new(ConnectionState::Unconfigured),
        }
    }

    /// A manager holding a connected hardware backend.
    pub fn connected(backend: Arc<dyn Backend>) -> Self {
        Self {
            state: RwLock::new(ConnectionState::Connected(backend)),
        }
    }

    /// A manager that has already abandoned hardware.
    pub fn degraded() -> Self {
        Self {
            state: RwLock::new(ConnectionState::Degraded),
        }
    }

    /// Read-only accessor for the hardware handle, if still usable.
    pub async fn hardware(&self) -> Option<Arc<dyn Backend>> {
        match &*self.state.read().await {
            ConnectionState::Connected(backend) => Some(Arc::clone(backend)),
            ConnectionState::Unconfigured | ConnectionState::Degraded => None,
        }
    }

    /// Permanently abandon the hardware connection.
    ///
    /// One-way: only `Connected` transitions, and nothing ever transitions
    /// back. A single transient hardware error disables hardware for all
    /// subsequent requests in the process lifetime.
    pub async fn degrade(&self, reason: &str) {
        let mut state = self.state.write().await;
        if let ConnectionState::Connected(backend) = &*state {
            warn!(
                backend = %backend.name(),
                reason,
                "degrading to simulator for the remainder of the process"
            );
            *state = ConnectionState::Degraded;
        }
    }

    /// Select the execution target for one spin.
    ///
    /// Queries the live queue depth when connected. An availability-check
    /// failure degrades permanently; a long queue (or non-operational
    /// device) routes this spin to the simulator while keeping the
    /// connection for the next one.
    pub async fn select_target(&self, fallback_on_busy: bool) -> ExecutionTarget {
        let Some(backend) = self.hardware().await else {
            return ExecutionTarget::Simulator;
        };

        let availability = match backend.availability().await {
            Ok(availability) => availability,
            Err(e) => {
                self.degrade(&format!("availability check failed: {e}")).await;
                return ExecutionTarget::Simulator;
            }
        };

        if !availability.is_available {
            info!(
                backend = %backend.name(),
                status = ?availability.status_message,
                "hardware not operational, using simulator for this spin"
            );
            return ExecutionTarget::Simulator;
        }

        let pending_jobs = availability.queue_depth.unwrap_or(0);
        if pending_jobs >= MAX_PENDING_JOBS && fallback_on_busy {
            info!(
                backend = %backend.name(),
                pending_jobs,
                "hardware queue too long, using simulator for this spin"
            );
            return ExecutionTarget::Simulator;
        }

        ExecutionTarget::Hardware {
            backend,
            pending_jobs,
        }
    }

    /// Current connection status.
    pub async fn status(&self) -> ConnectionStatus {
        match &*self.state.read().await {
            ConnectionState::Unconfigured => ConnectionStatus {
                state: "unconfigured",
                backend: None,
                num_qubits: None,
            },
            ConnectionState::Connected(backend) => ConnectionStatus {
                state: "connected",
                backend: Some(backend.name().to_string()),
                num_qubits: Some(backend.capabilities().num_qubits),
            },
            ConnectionState::Degraded => ConnectionStatus {
                state: "degraded",
                backend: None,
                num_qubits: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_selects_simulator() {
        let manager = ConnectionManager::unconfigured();
        assert!(matches!(
            manager.select_target(true).await,
            ExecutionTarget::Simulator
        ));
        assert_eq!(manager.status().await.state, "unconfigured");
    }

    #[tokio::test]
    async fn test_degraded_selects_simulator() {
        let manager = ConnectionManager::degraded();
        assert!(matches!(
            manager.select_target(true).await,
            ExecutionTarget::Simulator
        ));
        assert!(manager.hardware().await.is_none());
    }

    #[tokio::test]
    async fn test_degrade_without_connection_is_noop() {
        let manager = ConnectionManager::unconfigured();
        manager.degrade("nothing to abandon").await;
        assert_eq!(manager.status().await.state, "unconfigured");
    }

    #[tokio::test]
    async fn test_establish_without_token_is_unconfigured() {
        let manager = ConnectionManager::establish(&EngineConfig::default()).await;
        assert_eq!(manager.status().await.state, "unconfigured");
    }
}
