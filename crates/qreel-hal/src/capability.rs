//! Backend capability introspection.

use serde::{Deserialize, Serialize};

/// Capabilities of an execution target.
///
/// Cached at backend construction time; `Backend::capabilities()` returns a
/// reference without I/O. The selector uses the qubit count when resolving
/// a hardware target; the info endpoint reports the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (not real hardware).
    pub is_simulator: bool,
}

impl Capabilities {
    /// Capabilities for the local simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            max_shots: 100_000,
            is_simulator: true,
        }
    }

    /// Capabilities for a hardware device.
    pub fn hardware(name: impl Into<String>, num_qubits: u32, max_shots: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            max_shots,
            is_simulator: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert_eq!(caps.name, "simulator");
    }

    #[test]
    fn test_hardware_capabilities() {
        let caps = Capabilities::hardware("ibm_torino", 133, 100_000);
        assert!(!caps.is_simulator);
        assert_eq!(caps.num_qubits, 133);
        assert_eq!(caps.name, "ibm_torino");
    }
}
