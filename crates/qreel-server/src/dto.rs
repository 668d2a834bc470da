//! Request and response types for the HTTP API.

use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use qreel_engine::{HardwareInfo, SYMBOLS, SpinOutcome};

/// Request body for `POST /spin`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpinRequest {
    /// Bias angle for the per-reel rotation.
    #[serde(default = "default_theta")]
    pub theta: f64,
    /// Whether to correlate the reels.
    #[serde(default)]
    pub entanglement: bool,
}

fn default_theta() -> f64 {
    FRAC_PI_2
}

impl Default for SpinRequest {
    fn default() -> Self {
        Self {
            theta: default_theta(),
            entanglement: false,
        }
    }
}

/// Response body for `POST /spin`.
#[derive(Debug, Serialize)]
pub struct SpinResponse {
    /// The three reel symbols.
    pub symbols: Vec<String>,
    /// The raw measurement outcomes (0 or 1), one per reel.
    pub measurements: Vec<u8>,
    /// Outcome distribution across all shots.
    pub distribution: BTreeMap<String, u64>,
    /// Which backend produced the outcome.
    pub backend_used: String,
    /// Queue depth at execution time; only present for hardware runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<u32>,
}

impl From<SpinOutcome> for SpinResponse {
    fn from(outcome: SpinOutcome) -> Self {
        let distribution = outcome
            .distribution
            .iter()
            .map(|(bitstring, &count)| (bitstring.clone(), count))
            .collect();

        Self {
            symbols: outcome.symbols,
            measurements: outcome.measurements,
            distribution,
            backend_used: outcome.backend_used,
            queue_position: outcome.queue_position,
        }
    }
}

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

impl StatusResponse {
    pub fn online() -> Self {
        Self {
            status: "online",
            message: "Quantum Slot Machine API",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Response body for `GET /info`.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub description: &'static str,
    pub hardware: HardwareInfo,
    pub quantum_circuit: CircuitDescription,
    pub ry_gate: RotationDescription,
    pub randomness_source: &'static str,
    pub symbols: Vec<&'static str>,
    pub configuration: ConfigurationView,
}

/// Static description of the spin circuit.
#[derive(Debug, Serialize)]
pub struct CircuitDescription {
    pub qubits: usize,
    pub gates: &'static str,
    pub measurement: &'static str,
    pub entanglement: &'static str,
}

impl Default for CircuitDescription {
    fn default() -> Self {
        Self {
            qubits: 3,
            gates: "ry(θ) rotation applied to each qubit",
            measurement: "Each qubit measured in the computational basis",
            entanglement: "Optional cx chain to correlate the qubits",
        }
    }
}

/// Static description of the bias rotation.
#[derive(Debug, Serialize)]
pub struct RotationDescription {
    pub description: &'static str,
    pub effect: &'static str,
    pub theta_range: &'static str,
    pub theta_0: &'static str,
    pub theta_pi_2: &'static str,
    pub theta_pi: &'static str,
}

impl Default for RotationDescription {
    fn default() -> Self {
        Self {
            description: "ry(θ) rotates a qubit around the Y axis",
            effect: "Creates superposition: |0⟩ → cos(θ/2)|0⟩ + sin(θ/2)|1⟩",
            theta_range: "0 to π",
            theta_0: "100% probability of |0⟩",
            theta_pi_2: "50/50 superposition (default)",
            theta_pi: "100% probability of |1⟩",
        }
    }
}

/// Runtime configuration values exposed by the info endpoint.
#[derive(Debug, Serialize)]
pub struct ConfigurationView {
    pub use_simulator_fallback: bool,
    pub max_queue_wait: u64,
    pub shots: u32,
}

impl InfoResponse {
    /// Assemble the info payload from an engine snapshot.
    pub fn from_engine(info: qreel_engine::EngineInfo) -> Self {
        let randomness_source = if info.hardware.connected {
            "Real quantum measurement"
        } else {
            "Simulated quantum measurement"
        };

        Self {
            description: "Quantum slot machine backed by IBM Quantum hardware or a local statevector simulator",
            randomness_source,
            quantum_circuit: CircuitDescription::default(),
            ry_gate: RotationDescription::default(),
            symbols: SYMBOLS.to_vec(),
            configuration: ConfigurationView {
                use_simulator_fallback: info.use_simulator_fallback,
                max_queue_wait: info.max_queue_wait,
                shots: info.shots,
            },
            hardware: info.hardware,
        }
    }
}
