//! Shared test doubles and fixtures for the Eco Trivia backend.

mod fixtures;
mod rng;
mod store;

pub use fixtures::{fixed_timestamp, sample_trivia};
pub use rng::{FixedRng, SequenceRng};
pub use store::{FailingRecordStore, RecordingRecordStore};
