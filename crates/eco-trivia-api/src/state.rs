//! Shared application state.

use std::sync::{Arc, Mutex};

use eco_trivia_catalog::application::random_selector::RandomRecordSelector;
use eco_trivia_core::rng::DeterministicRng;
use eco_trivia_core::store::RecordStore;
use eco_trivia_core::trivia::Trivia;

/// Trivia store behind a trait object, so tests can swap in fakes.
pub type TriviaStore = dyn RecordStore<Record = Trivia>;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Random selector over the trivia table.
    pub trivia_selector: RandomRecordSelector<TriviaStore>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        trivia_store: Arc<TriviaStore>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self {
            trivia_selector: RandomRecordSelector::new(trivia_store, rng),
        }
    }
}
