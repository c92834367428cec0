//! Random record selection over a store of unknown size.
//!
//! Selection is a two-step read: count the records, then fetch the one at a
//! uniformly drawn offset. Rows inserted or deleted between the two steps can
//! shift what sits at that offset, or leave nothing there at all. That
//! skew is accepted; no locking or retry is attempted.

use std::sync::{Arc, Mutex};

use eco_trivia_core::error::DomainError;
use eco_trivia_core::rng::DeterministicRng;
use eco_trivia_core::store::RecordStore;
use tracing::{debug, error, instrument};

/// Maps a uniform sample in `[0, 1)` onto an offset in `[0, count)`.
///
/// Computes `floor(sample * count)`. The result is clamped to `count - 1`,
/// so a sample that rounds up (or a provider that returns `1.0`) can never
/// address one past the end. Negative and NaN samples map to `0`.
///
/// `count` must be non-zero.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn offset_for(sample: f64, count: u64) -> u64 {
    debug_assert!(count > 0, "offset_for called with an empty table");
    let offset = (sample * count as f64).floor() as u64;
    offset.min(count.saturating_sub(1))
}

/// Picks one record uniformly at random from a [`RecordStore`].
///
/// Holds no per-call state; any number of selections may run concurrently
/// against the same selector. The RNG mutex is only held for the draw itself.
pub struct RandomRecordSelector<S: ?Sized> {
    store: Arc<S>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl<S: ?Sized> Clone for RandomRecordSelector<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            rng: Arc::clone(&self.rng),
        }
    }
}

impl<S> RandomRecordSelector<S>
where
    S: RecordStore + ?Sized,
{
    /// Creates a selector over `store` drawing samples from `rng`.
    #[must_use]
    pub fn new(store: Arc<S>, rng: Arc<Mutex<dyn DeterministicRng + Send>>) -> Self {
        Self { store, rng }
    }

    /// Returns one record chosen uniformly at random, or `None` if the store
    /// is empty or nothing was found at the drawn offset.
    ///
    /// `fetch_at` is never called when `count` returns zero or fails.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged if `count` or `fetch_at` fails.
    /// Returns `DomainError::Infrastructure` if the RNG mutex is poisoned.
    #[instrument(skip(self), level = "debug")]
    pub async fn select_random(&self) -> Result<Option<S::Record>, DomainError> {
        let count = self.store.count().await.inspect_err(|e| {
            error!(error = %e, "random selection failed: record count");
        })?;

        if count == 0 {
            debug!("store is empty, nothing to select");
            return Ok(None);
        }

        // Lock RNG only for the draw, never across an await.
        let sample = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
            rng.next_f64()
        };

        let offset = offset_for(sample, count);
        debug!(count, offset, "fetching record at random offset");

        let record = self.store.fetch_at(offset).await.inspect_err(|e| {
            error!(error = %e, offset, "random selection failed: record fetch");
        })?;

        if record.is_none() {
            debug!(count, offset, "no record at offset; table shrank since count");
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use eco_trivia_core::error::DomainError;
    use eco_trivia_core::rng::{DeterministicRng, SeededRng};
    use eco_trivia_core::trivia::Trivia;
    use eco_trivia_test_support::{
        FailingRecordStore, FixedRng, RecordingRecordStore, SequenceRng, sample_trivia,
    };

    use super::{RandomRecordSelector, offset_for};

    fn shared_rng(rng: impl DeterministicRng + Send + 'static) -> Arc<Mutex<dyn DeterministicRng + Send>> {
        Arc::new(Mutex::new(rng))
    }

    fn recording_selector(
        store: &Arc<RecordingRecordStore<Trivia>>,
        rng: impl DeterministicRng + Send + 'static,
    ) -> RandomRecordSelector<RecordingRecordStore<Trivia>> {
        RandomRecordSelector::new(Arc::clone(store), shared_rng(rng))
    }

    // --- offset_for ---

    #[test]
    fn test_offset_for_zero_sample_is_first_offset() {
        assert_eq!(offset_for(0.0, 5), 0);
        assert_eq!(offset_for(0.0, 1), 0);
    }

    #[test]
    fn test_offset_for_sample_just_below_one_is_last_offset() {
        let just_below_one = 1.0 - f64::EPSILON / 2.0;
        assert_eq!(offset_for(just_below_one, 5), 4);
        assert_eq!(offset_for(just_below_one, 1), 0);
        assert_eq!(offset_for(just_below_one, 1_000_003), 1_000_002);
    }

    #[test]
    fn test_offset_for_clamps_when_product_reaches_count() {
        // u64::MAX converts to 2^64 as f64, so the product overshoots.
        assert_eq!(offset_for(1.0, u64::MAX), u64::MAX - 1);
        assert_eq!(offset_for(1.0, 5), 4);
    }

    #[test]
    fn test_offset_for_out_of_range_low_samples_map_to_zero() {
        assert_eq!(offset_for(-0.25, 5), 0);
        assert_eq!(offset_for(f64::NAN, 5), 0);
    }

    #[test]
    fn test_offset_for_stays_within_table_for_many_sizes() {
        let samples = [0.0, 0.01, 0.25, 0.5, 0.75, 0.99, 1.0 - f64::EPSILON / 2.0];
        for count in 1..=512_u64 {
            for sample in samples {
                let offset = offset_for(sample, count);
                assert!(
                    offset < count,
                    "offset {offset} out of range for count {count}, sample {sample}"
                );
            }
        }
    }

    // --- select_random ---

    #[tokio::test]
    async fn test_select_random_returns_middle_record_for_half_sample() {
        // Arrange
        let records = sample_trivia();
        let store = Arc::new(RecordingRecordStore::new(records.clone()));
        let selector = recording_selector(&store, FixedRng(0.5));

        // Act
        let result = selector.select_random().await.unwrap();

        // Assert
        assert_eq!(store.count_calls(), 1);
        assert_eq!(store.fetched_offsets(), vec![2]);
        assert_eq!(result, Some(records[2].clone()));
        assert_eq!(result.unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_select_random_small_sample_fetches_first_offset() {
        // Arrange
        let records = sample_trivia();
        let store = Arc::new(RecordingRecordStore::new(records.clone()));
        let selector = recording_selector(&store, FixedRng(0.01));

        // Act
        let result = selector.select_random().await.unwrap();

        // Assert
        assert_eq!(store.fetched_offsets(), vec![0]);
        assert_eq!(result, Some(records[0].clone()));
    }

    #[tokio::test]
    async fn test_select_random_large_sample_fetches_last_offset() {
        // Arrange
        let records = sample_trivia();
        let store = Arc::new(RecordingRecordStore::new(records.clone()));
        let selector = recording_selector(&store, FixedRng(0.99));

        // Act
        let result = selector.select_random().await.unwrap();

        // Assert
        assert_eq!(store.fetched_offsets(), vec![4]);
        assert_eq!(result, Some(records[4].clone()));
    }

    #[tokio::test]
    async fn test_select_random_empty_store_returns_none_without_fetching() {
        // Arrange
        let store = Arc::new(RecordingRecordStore::<Trivia>::new(Vec::new()));
        let selector = recording_selector(&store, FixedRng(0.5));

        // Act
        let result = selector.select_random().await.unwrap();

        // Assert
        assert!(result.is_none());
        assert_eq!(store.count_calls(), 1);
        assert!(store.fetched_offsets().is_empty());
    }

    #[tokio::test]
    async fn test_select_random_propagates_count_failure_without_fetching() {
        // Arrange
        let store = Arc::new(FailingRecordStore::<Trivia>::on_count(
            "Database connection failed",
        ));
        let selector = RandomRecordSelector::new(Arc::clone(&store), shared_rng(FixedRng(0.5)));

        // Act
        let result = selector.select_random().await;

        // Assert
        match result {
            Err(DomainError::Infrastructure(message)) => {
                assert_eq!(message, "Database connection failed");
            }
            other => panic!("expected Infrastructure error, got {other:?}"),
        }
        assert_eq!(store.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_select_random_propagates_fetch_failure() {
        // Arrange
        let store = Arc::new(FailingRecordStore::<Trivia>::on_fetch(5, "query timed out"));
        let selector = RandomRecordSelector::new(Arc::clone(&store), shared_rng(FixedRng(0.5)));

        // Act
        let result = selector.select_random().await;

        // Assert
        match result {
            Err(DomainError::Infrastructure(message)) => assert_eq!(message, "query timed out"),
            other => panic!("expected Infrastructure error, got {other:?}"),
        }
        assert_eq!(store.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_select_random_returns_none_when_fetch_finds_nothing() {
        // Arrange: count reports five rows but every row has since been deleted.
        let store = Arc::new(RecordingRecordStore::<Trivia>::new(Vec::new()).reporting_count(5));
        let selector = recording_selector(&store, FixedRng(0.5));

        // Act
        let result = selector.select_random().await;

        // Assert
        assert!(matches!(result, Ok(None)));
        assert_eq!(store.fetched_offsets(), vec![2]);
    }

    #[tokio::test]
    async fn test_select_random_after_transient_failure_succeeds() {
        // Arrange
        let records = sample_trivia();
        let store = Arc::new(RecordingRecordStore::new(records.clone()));
        let selector = recording_selector(&store, SequenceRng::new(vec![0.5]));
        store.fail_next_count("Database connection failed");

        // Act
        let first = selector.select_random().await;
        let second = selector.select_random().await;

        // Assert
        assert!(first.is_err());
        assert_eq!(second.unwrap(), Some(records[2].clone()));
        assert_eq!(store.count_calls(), 2);
        assert_eq!(store.fetched_offsets(), vec![2]);
    }

    #[tokio::test]
    async fn test_select_random_draws_fresh_sample_per_call() {
        // Arrange
        let records = sample_trivia();
        let store = Arc::new(RecordingRecordStore::new(records));
        let selector = recording_selector(&store, SequenceRng::new(vec![0.0, 0.5, 0.99]));

        // Act
        for _ in 0..3 {
            selector.select_random().await.unwrap();
        }

        // Assert
        assert_eq!(store.fetched_offsets(), vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_select_random_works_through_trait_object() {
        // Arrange
        let records = sample_trivia();
        let store: Arc<dyn eco_trivia_core::store::RecordStore<Record = Trivia>> =
            Arc::new(RecordingRecordStore::new(records.clone()));
        let selector = RandomRecordSelector::new(store, shared_rng(FixedRng(0.2)));

        // Act
        let result = selector.select_random().await.unwrap();

        // Assert
        assert_eq!(result, Some(records[1].clone()));
    }

    #[tokio::test]
    async fn test_concurrent_selections_share_one_selector() {
        // Arrange
        let records = sample_trivia();
        let store = Arc::new(RecordingRecordStore::new(records));
        let selector = recording_selector(&store, SeededRng::from_seed(7));

        // Act
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let selector = selector.clone();
                tokio::spawn(async move { selector.select_random().await })
            })
            .collect();
        let mut selected = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                selected += 1;
            }
        }

        // Assert
        assert_eq!(selected, 32);
        assert_eq!(store.count_calls(), 32);
        assert!(store.fetched_offsets().iter().all(|offset| *offset < 5));
    }

    #[tokio::test]
    async fn test_select_random_covers_every_record_roughly_evenly() {
        // Arrange
        let store = Arc::new(RecordingRecordStore::new(sample_trivia()));
        let selector = recording_selector(&store, SeededRng::from_seed(20_260_115));
        let draws = 10_000_u32;

        // Act
        let mut hits = [0_u32; 5];
        for _ in 0..draws {
            let record = selector.select_random().await.unwrap().unwrap();
            hits[usize::try_from(record.id - 1).unwrap()] += 1;
        }

        // Assert: expected 2000 per record; allow a wide margin.
        for (index, count) in hits.iter().enumerate() {
            assert!(
                (1_700..=2_300).contains(count),
                "record {} selected {count} times out of {draws}",
                index + 1
            );
        }
    }
}
