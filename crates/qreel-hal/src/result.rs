//! Execution result types.
//!
//! Bitstring ordering: the rightmost bit corresponds to the lowest-indexed
//! qubit (OpenQASM 3 convention). For a spin, `"011"` means reels 0 and 1
//! measured `1` and reel 2 measured `0`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts from circuit execution.
///
/// Maps bitstrings to occurrence counts. Absent bitstrings implicitly have
/// count 0. On the simulator path the counts sum exactly to the shot count;
/// on the hardware path per-outcome truncation may leave the sum slightly
/// short, so consumers must not assume a fixed total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counts {
    /// Map from bitstring to count.
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from an iterator of (bitstring, count) pairs.
    /// Duplicate bitstrings are accumulated, consistent with `insert()`.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Insert a count for a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let key = bitstring.into();
        *self.counts.entry(key).or_default() += count;
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Get the total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get the most frequent bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts.iter().max_by_key(|&(_, count)| count)
    }

    /// Get the number of unique bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if counts are empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, value) in iter {
            counts.insert(key, value);
        }
        counts
    }
}

/// Result of circuit execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Set the execution time.
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_basic() {
        let mut counts = Counts::new();
        counts.insert("000", 50);
        counts.insert("111", 50);

        assert_eq!(counts.get("000"), 50);
        assert_eq!(counts.get("111"), 50);
        assert_eq!(counts.get("010"), 0);
        assert_eq!(counts.total_shots(), 100);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_counts_accumulate_duplicates() {
        let counts = Counts::from_pairs([("101", 30), ("101", 12)]);
        assert_eq!(counts.get("101"), 42);
    }

    #[test]
    fn test_counts_most_frequent() {
        let counts = Counts::from_pairs([("000", 10), ("111", 90)]);

        let (most, count) = counts.most_frequent().unwrap();
        assert_eq!(most, "111");
        assert_eq!(*count, 90);
    }

    #[test]
    fn test_truncated_counts_may_undershoot() {
        // Hardware conversion can drop fractional shots per outcome.
        let counts = Counts::from_pairs([("000", 33), ("111", 66)]);
        assert!(counts.total_shots() < 100);
    }

    #[test]
    fn test_execution_result() {
        let counts = Counts::from_pairs([("000", 100)]);
        let result = ExecutionResult::new(counts, 100).with_execution_time(7);

        assert_eq!(result.shots, 100);
        assert_eq!(result.execution_time_ms, Some(7));
        assert_eq!(result.counts.total_shots(), 100);
    }
}
