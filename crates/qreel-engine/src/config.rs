//! Environment-driven engine configuration.

use std::time::Duration;

/// Number of shots executed per spin.
pub const DEFAULT_SHOTS: u32 = 100;

/// Default overall timeout for a hardware execution.
const DEFAULT_MAX_QUEUE_WAIT_SECS: u64 = 300;

/// Placeholder value shipped in example env files; treated as unset.
const TOKEN_PLACEHOLDER: &str = "your_token_here";

/// Engine configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// IBM Quantum API token. `None` means simulator only.
    pub ibm_token: Option<String>,
    /// Explicit IBM device name. `None` selects the least-busy device.
    pub ibm_backend: Option<String>,
    /// IBM API endpoint override (tests, staging).
    pub ibm_endpoint: Option<String>,
    /// Route to the simulator when the hardware queue is long.
    pub fallback_on_busy: bool,
    /// Overall timeout for one hardware submit-and-wait.
    pub max_queue_wait: Duration,
    /// Shots per spin.
    pub shots: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ibm_token: None,
            ibm_backend: None,
            ibm_endpoint: None,
            fallback_on_busy: true,
            max_queue_wait: Duration::from_secs(DEFAULT_MAX_QUEUE_WAIT_SECS),
            shots: DEFAULT_SHOTS,
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup (the environment in
    /// production, a closure in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let ibm_token = lookup("IBM_QUANTUM_TOKEN")
            .filter(|t| !t.is_empty() && t != TOKEN_PLACEHOLDER);

        let fallback_on_busy = lookup("USE_SIMULATOR_FALLBACK")
            .map_or(defaults.fallback_on_busy, |v| {
                v.eq_ignore_ascii_case("true")
            });

        let max_queue_wait = lookup("MAX_QUEUE_WAIT")
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(defaults.max_queue_wait, Duration::from_secs);

        Self {
            ibm_token,
            ibm_backend: lookup("IBM_QUANTUM_BACKEND").filter(|b| !b.is_empty()),
            ibm_endpoint: lookup("IBM_QUANTUM_ENDPOINT").filter(|e| !e.is_empty()),
            fallback_on_busy,
            max_queue_wait,
            shots: defaults.shots,
        }
    }
}
