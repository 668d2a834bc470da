//! Simulator backend implementation.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qreel_hal::{
    Backend, BackendAvailability, BackendConfig, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, JobId, JobStatus,
};
use qreel_ir::SpinCircuit;

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    status: JobStatus,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Simulates spin circuits with a statevector and samples one collapse
/// outcome per shot. Execution happens synchronously at submit time; the
/// job table exists to honor the submit/status/result lifecycle.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Completed jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
}

/// Qubit ceiling for the statevector; far above the 3 qubits a spin uses.
const MAX_QUBITS: u32 = 20;

impl SimulatorBackend {
    /// Create a new simulator backend.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(MAX_QUBITS),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &SpinCircuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        let instructions = circuit.instructions();
        debug!(
            num_qubits,
            shots,
            theta = circuit.theta(),
            entangle = circuit.entangle(),
            "starting simulation"
        );

        let mut counts = Counts::new();

        for _ in 0..shots {
            let mut sv = Statevector::new(num_qubits);
            for inst in &instructions {
                sv.apply(inst);
            }

            let outcome = sv.sample();
            counts.insert(sv.outcome_to_bitstring(outcome), 1);
        }

        let elapsed = start.elapsed();
        debug!("simulation completed in {:?}", elapsed);

        ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &SpinCircuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        debug!("submitted job: {}", job_id);

        let result = self.run_simulation(circuit, shots);

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(
                job_id.0.clone(),
                SimJob {
                    status: JobStatus::Completed,
                    result: Some(result),
                },
            );
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    async fn run(theta: f64, entangle: bool, shots: u32) -> ExecutionResult {
        let backend = SimulatorBackend::new();
        let circuit = SpinCircuit::new(theta, entangle);
        let job_id = backend.submit(&circuit, shots).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        backend.result(&job_id).await.unwrap()
    }

    /// Frequency of 1-bits across all qubits and shots.
    fn one_frequency(counts: &Counts) -> f64 {
        let mut ones = 0u64;
        let mut bits = 0u64;
        for (bitstring, &count) in counts.iter() {
            for c in bitstring.chars() {
                bits += count;
                if c == '1' {
                    ones += count;
                }
            }
        }
        ones as f64 / bits as f64
    }

    /// Mutual information (bits) between qubit `a` and qubit `b` outcomes.
    ///
    /// Bitstrings have qubit 0 rightmost, so a qubit's bit sits at
    /// index `len - 1 - qubit`.
    fn mutual_information(counts: &Counts, a: usize, b: usize) -> f64 {
        let total = counts.total_shots() as f64;
        let mut joint = [[0.0f64; 2]; 2];
        for (bitstring, &count) in counts.iter() {
            let chars: Vec<char> = bitstring.chars().collect();
            let bit_a = usize::from(chars[chars.len() - 1 - a] == '1');
            let bit_b = usize::from(chars[chars.len() - 1 - b] == '1');
            joint[bit_a][bit_b] += count as f64 / total;
        }

        let marginal_a = [joint[0][0] + joint[0][1], joint[1][0] + joint[1][1]];
        let marginal_b = [joint[0][0] + joint[1][0], joint[0][1] + joint[1][1]];

        let mut mi = 0.0;
        for (i, row) in joint.iter().enumerate() {
            for (j, &p) in row.iter().enumerate() {
                if p > 0.0 {
                    mi += p * (p / (marginal_a[i] * marginal_b[j])).log2();
                }
            }
        }
        mi
    }

    #[tokio::test]
    async fn test_counts_sum_to_shots() {
        let result = run(PI / 2.0, false, 100).await;
        assert_eq!(result.shots, 100);
        assert_eq!(result.counts.total_shots(), 100);
    }

    #[tokio::test]
    async fn test_theta_zero_is_all_zeros() {
        let result = run(0.0, false, 100).await;
        assert_eq!(result.counts.get("000"), 100);
        assert_eq!(result.counts.len(), 1);
    }

    #[tokio::test]
    async fn test_theta_pi_is_all_ones() {
        let result = run(PI, false, 100).await;
        assert_eq!(result.counts.get("111"), 100);
    }

    #[tokio::test]
    async fn test_outcomes_are_three_bit_strings() {
        let result = run(PI / 2.0, false, 500).await;
        for (bitstring, _) in result.counts.iter() {
            assert_eq!(bitstring.len(), 3);
            assert!(bitstring.chars().all(|c| c == '0' || c == '1'));
        }
        assert!(result.counts.len() <= 8);
    }

    #[tokio::test]
    async fn test_one_frequency_tracks_bias_angle() {
        // 6000 shots × 3 bits = 18000 samples; 0.05 tolerance is many sigma.
        let balanced = run(PI / 2.0, false, 6000).await;
        assert!((one_frequency(&balanced.counts) - 0.5).abs() < 0.05);

        let biased = run(PI / 3.0, false, 6000).await;
        let expected = (PI / 6.0).sin().powi(2);
        assert!((one_frequency(&biased.counts) - expected).abs() < 0.05);
    }

    #[tokio::test]
    async fn test_entanglement_correlates_neighbors() {
        // At θ=π/4 the cx chain leaves the joint distribution far from the
        // product of marginals (~0.2 bits of MI between qubits 0 and 1).
        let entangled = run(PI / 4.0, true, 4000).await;
        assert!(mutual_information(&entangled.counts, 0, 1) > 0.05);
        assert!(mutual_information(&entangled.counts, 0, 2) > 0.02);
    }

    #[tokio::test]
    async fn test_no_entanglement_is_independent() {
        let plain = run(PI / 4.0, false, 4000).await;
        assert!(mutual_information(&plain.counts, 0, 1) < 0.02);
    }

    #[tokio::test]
    async fn test_simulator_always_available() {
        let backend = SimulatorBackend::new();
        let avail = backend.availability().await.unwrap();
        assert!(avail.is_available);
        assert_eq!(avail.queue_depth, Some(0));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let backend = SimulatorBackend::new();
        let missing = backend.status(&JobId::new("nope")).await;
        assert!(matches!(missing, Err(HalError::JobNotFound(_))));
    }
}
