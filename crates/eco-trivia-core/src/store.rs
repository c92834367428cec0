//! Record store abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// Positional read access to a table of records.
///
/// Implementations only need to agree on an enumeration order that is stable
/// for the duration of a single call; it does not have to be insertion order.
/// The table may change between calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The record type this store yields.
    type Record: Send;

    /// Returns the current number of records.
    async fn count(&self) -> Result<u64, DomainError>;

    /// Returns the record at zero-based position `offset`, or `None` if
    /// there is no record at that position (for example, because rows were
    /// deleted since the last `count`).
    async fn fetch_at(&self, offset: u64) -> Result<Option<Self::Record>, DomainError>;
}
