//! Single-outcome draw from a measurement distribution.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use qreel_hal::Counts;

use crate::error::{EngineError, EngineResult};

/// One bitstring drawn from a distribution, decomposed per reel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnOutcome {
    /// The drawn bitstring.
    pub bitstring: String,
    /// Bit values in display order (the bitstring's characters, left to
    /// right).
    pub bits: Vec<u8>,
}

/// Draw exactly one outcome, with probability proportional to its count.
///
/// Weights need not sum to the nominal shot count; the hardware path's
/// truncated counts are accepted as-is. Zero-count outcomes are never
/// drawn. An empty or all-zero distribution is a precondition violation
/// and returns [`EngineError::EmptyDistribution`].
pub fn draw(counts: &Counts) -> EngineResult<DrawnOutcome> {
    let entries: Vec<(&String, u64)> = counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(bitstring, &count)| (bitstring, count))
        .collect();

    let weights = WeightedIndex::new(entries.iter().map(|&(_, count)| count))
        .map_err(|_| EngineError::EmptyDistribution)?;

    let mut rng = rand::thread_rng();
    let (bitstring, _) = entries[weights.sample(&mut rng)];

    let bits = bitstring.chars().map(|c| u8::from(c == '1')).collect();

    Ok(DrawnOutcome {
        bitstring: bitstring.clone(),
        bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_draw_single_outcome() {
        let counts = Counts::from_pairs([("101", 100)]);
        let drawn = draw(&counts).unwrap();

        assert_eq!(drawn.bitstring, "101");
        assert_eq!(drawn.bits, vec![1, 0, 1]);
    }

    #[test]
    fn test_draw_never_picks_zero_count() {
        let counts = Counts::from_pairs([("000", 0), ("111", 60)]);
        for _ in 0..200 {
            assert_eq!(draw(&counts).unwrap().bitstring, "111");
        }
    }

    #[test]
    fn test_draw_tolerates_truncated_totals() {
        // Hardware counts summing below the nominal 100 shots still work.
        let counts = Counts::from_pairs([("000", 33), ("111", 66)]);
        let drawn = draw(&counts).unwrap();
        assert!(drawn.bitstring == "000" || drawn.bitstring == "111");
    }

    #[test]
    fn test_empty_distribution_is_an_error() {
        assert!(matches!(
            draw(&Counts::new()),
            Err(EngineError::EmptyDistribution)
        ));

        let all_zero = Counts::from_pairs([("000", 0), ("010", 0)]);
        assert!(matches!(
            draw(&all_zero),
            Err(EngineError::EmptyDistribution)
        ));
    }

    #[test]
    fn test_draw_is_weighted() {
        // 99:1 split; 300 draws virtually never favor the rare outcome.
        let counts = Counts::from_pairs([("000", 990), ("111", 10)]);
        let mut majority = 0;
        for _ in 0..300 {
            if draw(&counts).unwrap().bitstring == "000" {
                majority += 1;
            }
        }
        assert!(majority > 250);
    }

    proptest! {
        #[test]
        fn prop_drawn_outcome_has_positive_count(
            weights in proptest::collection::vec(0u64..50, 8),
        ) {
            let bitstrings = ["000", "001", "010", "011", "100", "101", "110", "111"];
            let counts = Counts::from_pairs(
                bitstrings.iter().copied().zip(weights.iter().copied()),
            );

            match draw(&counts) {
                Ok(drawn) => {
                    prop_assert!(counts.get(&drawn.bitstring) > 0);
                    prop_assert_eq!(drawn.bits.len(), 3);
                }
                Err(EngineError::EmptyDistribution) => {
                    prop_assert_eq!(counts.total_shots(), 0);
                }
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
            }
        }
    }
}
