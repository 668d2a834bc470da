//! IBM Quantum backend implementation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use qreel_hal::{
    Backend, BackendAvailability, BackendConfig, Capabilities, Counts, ExecutionResult, HalResult,
    JobId, JobStatus,
};
use qreel_ir::{NUM_REELS, SpinCircuit, emit};

use crate::api::{BackendInfo, DEFAULT_ENDPOINT, IbmClient, JobResultResponse};
use crate::error::{IbmError, IbmResult};

/// Minimum qubit count a device must offer to host a spin.
const MIN_QUBITS: usize = NUM_REELS;

/// Shot count assumed when neither the job table nor the result metadata
/// report one.
const FALLBACK_SHOTS: u32 = 100;

/// IBM Quantum backend adapter.
pub struct IbmBackend {
    /// API client.
    client: Arc<IbmClient>,
    /// Target device name.
    target: String,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Shot counts recorded at submission, for scaling quasi-distributions.
    submitted_shots: Mutex<FxHashMap<String, u32>>,
}

impl IbmBackend {
    /// Connect to IBM Quantum and resolve the target device.
    ///
    /// `config.token` is required. `config.extra["backend"]` names an
    /// explicit device; otherwise the least-busy operational non-simulator
    /// device with at least [`MIN_QUBITS`] qubits is selected.
    /// `config.endpoint` overrides the default API endpoint.
    pub async fn connect(config: BackendConfig) -> IbmResult<Self> {
        let token = config.token.as_ref().ok_or(IbmError::MissingToken)?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        let client = IbmClient::new(endpoint, token)?;

        let named = config.extra.get("backend").and_then(|v| v.as_str());
        let device = match named {
            Some(name) => client.get_backend(name).await?,
            None => {
                let backends = client.list_backends().await?;
                select_least_busy(&backends, MIN_QUBITS)
                    .ok_or(IbmError::NoEligibleBackend(MIN_QUBITS))?
                    .clone()
            }
        };

        info!(
            backend = %device.name,
            num_qubits = device.num_qubits,
            pending_jobs = ?device.status.pending_jobs,
            "connected to IBM Quantum"
        );

        Ok(Self {
            client: Arc::new(client),
            capabilities: Capabilities::hardware(
                &device.name,
                device.num_qubits as u32,
                device.max_shots.unwrap_or(100_000),
            ),
            target: device.name,
            submitted_shots: Mutex::new(FxHashMap::default()),
        })
    }

    /// Get the target device name.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Convert a sampler result to counts.
    ///
    /// Each quasi-probability is scaled by the shot count and truncated to
    /// an integer, so the counts may sum to slightly less than `shots`.
    /// Negative quasi entries clamp to zero.
    fn results_to_counts(results: &JobResultResponse, shots: u32) -> Counts {
        let mut counts = Counts::new();

        let Some(result) = results.results.first() else {
            return counts;
        };

        let effective_shots = result
            .metadata
            .as_ref()
            .and_then(|m| m.get("shots"))
            .and_then(serde_json::Value::as_u64)
            .map_or(f64::from(shots), |s| s as f64);

        if let Some(dist) = result.quasi_dists.as_ref().and_then(|d| d.first()) {
            for (outcome, &prob) in dist {
                let bitstring = outcome_to_bitstring(outcome, NUM_REELS);
                let count = (prob.max(0.0) * effective_shots) as u64;
                if count > 0 {
                    counts.insert(bitstring, count);
                }
            }
        }

        counts
    }
}

/// Pick the least-busy eligible device: operational, not a simulator, and
/// offering at least `min_qubits` qubits. Devices that do not report a
/// queue depth sort last.
fn select_least_busy(backends: &[BackendInfo], min_qubits: usize) -> Option<&BackendInfo> {
    backends
        .iter()
        .filter(|b| b.status.operational && !b.simulator && b.num_qubits >= min_qubits)
        .min_by_key(|b| b.status.pending_jobs.unwrap_or(u32::MAX))
}

/// Convert a quasi-distribution outcome key to a fixed-width bitstring.
///
/// Keys arrive as integers rendered in decimal or hex (`"5"` or `"0x5"`).
/// Rightmost bit = qubit 0.
fn outcome_to_bitstring(outcome: &str, width: usize) -> String {
    let digits = outcome.strip_prefix("0x").unwrap_or(outcome);
    let value = u64::from_str_radix(digits, 16).unwrap_or(0);
    format!("{value:0width$b}")
}

#[async_trait]
impl Backend for IbmBackend {
    fn name(&self) -> &str {
        &self.target
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Live availability, including the device's pending-job count.
    ///
    /// Deliberately uncached: the execution target selector routes on the
    /// queue depth of the moment.
    async fn availability(&self) -> HalResult<BackendAvailability> {
        let info = self.client.get_backend(&self.target).await?;

        Ok(BackendAvailability {
            is_available: info.status.operational,
            queue_depth: info.status.pending_jobs,
            estimated_wait: None,
            status_message: info.status.status_msg,
        })
    }

    async fn submit(&self, circuit: &SpinCircuit, shots: u32) -> HalResult<JobId> {
        // IBM's QASM loader needs the standard gate definitions.
        let qasm = emit(circuit).replacen(
            "OPENQASM 3.0;",
            "OPENQASM 3.0;\ninclude \"stdgates.inc\";",
            1,
        );

        let response = self
            .client
            .submit_sampler_job(&self.target, vec![qasm], shots)
            .await?;

        debug!(job_id = %response.id, backend = %self.target, "submitted sampler job");

        {
            let mut submitted = self
                .submitted_shots
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            submitted.insert(response.id.clone(), shots);
        }

        Ok(JobId::new(response.id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let response = self
            .client
            .get_job_status(&job_id.0)
            .await?;

        let status = if response.is_completed() {
            JobStatus::Completed
        } else if response.is_failed() {
            JobStatus::Failed(
                response
                    .error_message()
                    .unwrap_or_else(|| response.status.clone()),
            )
        } else if response.is_cancelled() {
            JobStatus::Cancelled
        } else if response.normalized_status() == "RUNNING" {
            JobStatus::Running
        } else {
            JobStatus::Queued
        };

        Ok(status)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let response = self
            .client
            .get_job_results(&job_id.0)
            .await?;

        let shots = {
            let submitted = self
                .submitted_shots
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            submitted.get(&job_id.0).copied().unwrap_or(FALLBACK_SHOTS)
        };

        let counts = Self::results_to_counts(&response, shots);
        Ok(ExecutionResult::new(counts, shots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BackendStatus, SamplerResult};

    fn device(name: &str, qubits: usize, operational: bool, pending: Option<u32>) -> BackendInfo {
        BackendInfo {
            name: name.to_string(),
            num_qubits: qubits,
            status: BackendStatus {
                operational,
                status_msg: None,
                pending_jobs: pending,
            },
            simulator: false,
            max_shots: None,
        }
    }

    #[test]
    fn test_least_busy_picks_smallest_queue() {
        let backends = vec![
            device("ibm_fez", 156, true, Some(12)),
            device("ibm_torino", 133, true, Some(3)),
            device("ibm_marrakesh", 156, true, Some(7)),
        ];

        let picked = select_least_busy(&backends, 3).unwrap();
        assert_eq!(picked.name, "ibm_torino");
    }

    #[test]
    fn test_least_busy_skips_ineligible() {
        let mut sim = device("cloud_sim", 32, true, Some(0));
        sim.simulator = true;
        let backends = vec![
            sim,
            device("ibm_down", 127, false, Some(0)),
            device("ibm_tiny", 2, true, Some(0)),
            device("ibm_busy", 127, true, Some(40)),
        ];

        let picked = select_least_busy(&backends, 3).unwrap();
        assert_eq!(picked.name, "ibm_busy");
    }

    #[test]
    fn test_least_busy_none_eligible() {
        let backends = vec![device("ibm_down", 127, false, Some(0))];
        assert!(select_least_busy(&backends, 3).is_none());
    }

    #[test]
    fn test_unknown_queue_depth_sorts_last() {
        let backends = vec![
            device("ibm_unknown", 127, true, None),
            device("ibm_known", 127, true, Some(30)),
        ];

        let picked = select_least_busy(&backends, 3).unwrap();
        assert_eq!(picked.name, "ibm_known");
    }

    #[test]
    fn test_outcome_to_bitstring() {
        assert_eq!(outcome_to_bitstring("0", 3), "000");
        assert_eq!(outcome_to_bitstring("5", 3), "101");
        assert_eq!(outcome_to_bitstring("7", 3), "111");
        assert_eq!(outcome_to_bitstring("0x3", 3), "011");
    }

    #[test]
    fn test_quasi_conversion_truncates() {
        let results = JobResultResponse {
            results: vec![SamplerResult {
                quasi_dists: Some(vec![[
                    ("0".to_string(), 0.335),
                    ("7".to_string(), 0.665),
                ]
                .into_iter()
                .collect()]),
                metadata: None,
            }],
        };

        let counts = IbmBackend::results_to_counts(&results, 100);
        assert_eq!(counts.get("000"), 33);
        assert_eq!(counts.get("111"), 66);
        // Truncation drops fractional shots; the sampler tolerates the gap.
        assert_eq!(counts.total_shots(), 99);
    }

    #[test]
    fn test_quasi_conversion_clamps_negatives() {
        // Quasi-probabilities from error mitigation can dip below zero.
        let results = JobResultResponse {
            results: vec![SamplerResult {
                quasi_dists: Some(vec![[
                    ("1".to_string(), -0.02),
                    ("6".to_string(), 1.02),
                ]
                .into_iter()
                .collect()]),
                metadata: None,
            }],
        };

        let counts = IbmBackend::results_to_counts(&results, 100);
        assert_eq!(counts.get("001"), 0);
        assert_eq!(counts.get("110"), 101);
    }

    #[test]
    fn test_metadata_shots_take_precedence() {
        let results = JobResultResponse {
            results: vec![SamplerResult {
                quasi_dists: Some(vec![[("7".to_string(), 1.0)].into_iter().collect()]),
                metadata: Some(serde_json::json!({"shots": 200})),
            }],
        };

        let counts = IbmBackend::results_to_counts(&results, 100);
        assert_eq!(counts.get("111"), 200);
    }

    #[test]
    fn test_empty_results_give_empty_counts() {
        let results = JobResultResponse { results: vec![] };
        assert!(IbmBackend::results_to_counts(&results, 100).is_empty());
    }
}
