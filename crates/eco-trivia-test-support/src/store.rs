//! Test stores — in-memory `RecordStore` implementations for tests.

use std::marker::PhantomData;
use std::sync::Mutex;

use async_trait::async_trait;
use eco_trivia_core::error::DomainError;
use eco_trivia_core::store::RecordStore;

/// An in-memory record store that records every `count` and `fetch_at` call.
///
/// By default `count` reports the number of held records. Use
/// [`RecordingRecordStore::reporting_count`] to report a different value and
/// simulate rows being inserted or deleted between the two calls.
#[derive(Debug)]
pub struct RecordingRecordStore<R> {
    records: Vec<R>,
    reported_count: Option<u64>,
    count_calls: Mutex<usize>,
    fetched_offsets: Mutex<Vec<u64>>,
    next_count_failure: Mutex<Option<String>>,
}

impl<R> RecordingRecordStore<R> {
    /// Create a store holding `records` in enumeration order.
    #[must_use]
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            reported_count: None,
            count_calls: Mutex::new(0),
            fetched_offsets: Mutex::new(Vec::new()),
            next_count_failure: Mutex::new(None),
        }
    }

    /// Make `count` return `count` regardless of how many records are held.
    #[must_use]
    pub fn reporting_count(mut self, count: u64) -> Self {
        self.reported_count = Some(count);
        self
    }

    /// Make the next `count` call fail with an infrastructure error carrying
    /// `message`. Later calls succeed again.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fail_next_count(&self, message: &str) {
        *self.next_count_failure.lock().unwrap() = Some(message.to_owned());
    }

    /// Returns how many times `count` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn count_calls(&self) -> usize {
        *self.count_calls.lock().unwrap()
    }

    /// Returns every offset passed to `fetch_at`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fetched_offsets(&self) -> Vec<u64> {
        self.fetched_offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl<R> RecordStore for RecordingRecordStore<R>
where
    R: Clone + Send + Sync,
{
    type Record = R;

    async fn count(&self) -> Result<u64, DomainError> {
        *self.count_calls.lock().unwrap() += 1;
        if let Some(message) = self.next_count_failure.lock().unwrap().take() {
            return Err(DomainError::Infrastructure(message));
        }
        Ok(self
            .reported_count
            .unwrap_or(self.records.len() as u64))
    }

    async fn fetch_at(&self, offset: u64) -> Result<Option<R>, DomainError> {
        self.fetched_offsets.lock().unwrap().push(offset);
        let record = usize::try_from(offset)
            .ok()
            .and_then(|index| self.records.get(index))
            .cloned();
        Ok(record)
    }
}

#[derive(Debug, Clone, Copy)]
enum FailurePoint {
    Count,
    Fetch { count: u64 },
}

/// A record store that always fails, either on `count` or on `fetch_at`.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingRecordStore<R> {
    message: String,
    failure_point: FailurePoint,
    fetch_calls: Mutex<usize>,
    _record: PhantomData<fn() -> R>,
}

impl<R> FailingRecordStore<R> {
    /// A store whose `count` fails with an infrastructure error carrying
    /// `message`.
    #[must_use]
    pub fn on_count(message: &str) -> Self {
        Self::new(message, FailurePoint::Count)
    }

    /// A store whose `count` reports `count` records and whose `fetch_at`
    /// fails with an infrastructure error carrying `message`.
    #[must_use]
    pub fn on_fetch(count: u64, message: &str) -> Self {
        Self::new(message, FailurePoint::Fetch { count })
    }

    fn new(message: &str, failure_point: FailurePoint) -> Self {
        Self {
            message: message.to_owned(),
            failure_point,
            fetch_calls: Mutex::new(0),
            _record: PhantomData,
        }
    }

    /// Returns how many times `fetch_at` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }
}

#[async_trait]
impl<R> RecordStore for FailingRecordStore<R>
where
    R: Send,
{
    type Record = R;

    async fn count(&self) -> Result<u64, DomainError> {
        match self.failure_point {
            FailurePoint::Count => Err(DomainError::Infrastructure(self.message.clone())),
            FailurePoint::Fetch { count } => Ok(count),
        }
    }

    async fn fetch_at(&self, _offset: u64) -> Result<Option<R>, DomainError> {
        *self.fetch_calls.lock().unwrap() += 1;
        Err(DomainError::Infrastructure(self.message.clone()))
    }
}
