//! Host-side input vectors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::config::Config;
use crate::BenchError;

/// Exclusive upper bound of generated element values.
pub const VALUE_BOUND: i32 = 100;

/// Fill a vector of `len` values drawn uniformly from `0..VALUE_BOUND`.
pub fn generate_vector<R: Rng>(len: usize, rng: &mut R) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(0..VALUE_BOUND)).collect()
}

/// Seed derived from the wall clock, for runs that do not pin one.
pub fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// The two operands of the sum. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputVectors {
    a: Vec<i32>,
    b: Vec<i32>,
}

impl InputVectors {
    /// Generate A then B from a single `StdRng` seeded with `seed`.
    pub fn generate(len: usize, seed: u64) -> Self {
        debug!(len, seed, "generating input vectors");
        let mut rng = StdRng::seed_from_u64(seed);
        let a = generate_vector(len, &mut rng);
        let b = generate_vector(len, &mut rng);
        Self { a, b }
    }

    /// Generate the operands a run of `config` needs, returning them with the
    /// seed used. The length is checked before anything is allocated.
    pub fn from_config(config: &Config) -> Result<(Self, u64), BenchError> {
        config.check_len()?;
        let seed = config.seed.unwrap_or_else(seed_from_clock);
        Ok((Self::generate(config.vector_len, seed), seed))
    }

    /// Use caller supplied operands.
    pub fn from_vecs(a: Vec<i32>, b: Vec<i32>) -> Result<Self, BenchError> {
        if a.len() != b.len() {
            return Err(BenchError::InvalidConfiguration(format!(
                "input lengths differ: {} vs {}",
                a.len(),
                b.len()
            )));
        }
        if a.is_empty() {
            return Err(BenchError::InvalidConfiguration(
                "input vectors are empty".into(),
            ));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> &[i32] {
        &self.a
    }

    pub fn b(&self) -> &[i32] {
        &self.b
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Reference sum computed on the host.
    pub fn expected_sum(&self) -> Vec<i32> {
        self.a.iter().zip(&self.b).map(|(x, y)| x.wrapping_add(*y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn values_stay_in_range() {
        let inputs = InputVectors::generate(10_000, 7);
        assert_eq!(inputs.len(), 10_000);
        assert!(inputs
            .a()
            .iter()
            .chain(inputs.b())
            .all(|&v| (0..VALUE_BOUND).contains(&v)));
    }

    #[test]
    fn operands_are_drawn_independently() {
        let inputs = InputVectors::generate(1_000, 3);
        assert_ne!(inputs.a(), inputs.b());
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = InputVectors::from_vecs(vec![1, 2], vec![1]).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfiguration(_)));
        let err = InputVectors::from_vecs(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfiguration(_)));
    }

    #[test]
    fn from_config_uses_configured_seed() {
        let config = Config {
            vector_len: 64,
            seed: Some(17),
            ..Config::default()
        };
        let (inputs, seed) = InputVectors::from_config(&config).unwrap();
        assert_eq!(seed, 17);
        assert_eq!(inputs, InputVectors::generate(64, 17));
    }

    #[test]
    fn from_config_rejects_length_before_allocating() {
        let config = Config {
            vector_len: 3_000_000_000,
            seed: Some(1),
            ..Config::default()
        };
        assert!(matches!(
            InputVectors::from_config(&config),
            Err(BenchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn expected_sum_wraps_like_the_device() {
        let inputs = InputVectors::from_vecs(vec![i32::MAX, 5], vec![1, 6]).unwrap();
        assert_eq!(inputs.expected_sum(), vec![i32::MIN, 11]);
    }

    quickcheck! {
        fn same_seed_same_vectors(seed: u64, len: u16) -> bool {
            let len = len as usize % 512;
            InputVectors::generate(len, seed) == InputVectors::generate(len, seed)
        }
    }
}
