//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use eco_trivia_core::rng::DeterministicRng;

/// An RNG that returns the same sample on every call. Suitable for tests that
/// pin a single draw, e.g. `FixedRng(0.5)` over a five-record table selects
/// offset 2.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(pub f64);

impl DeterministicRng for FixedRng {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that issue several selections and
/// need each draw to be known in advance.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
