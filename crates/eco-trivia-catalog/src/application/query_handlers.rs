//! Query handlers for the trivia catalog.
//!
//! This module turns selected records into the read-only views returned to
//! clients.

use eco_trivia_core::error::DomainError;
use eco_trivia_core::store::RecordStore;
use eco_trivia_core::trivia::{RandomTriviaResponse, Trivia, TriviaDto};

use crate::application::random_selector::RandomRecordSelector;

/// Retrieves one trivia at random and shapes it for clients.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the table is empty or the selected row
/// disappeared before it could be fetched.
/// Returns the store's error unchanged if the store fails.
pub async fn get_random_trivia<S>(
    selector: &RandomRecordSelector<S>,
) -> Result<RandomTriviaResponse, DomainError>
where
    S: RecordStore<Record = Trivia> + ?Sized,
{
    let trivia = selector
        .select_random()
        .await?
        .ok_or_else(|| DomainError::NotFound("no trivia available".to_owned()))?;

    Ok(RandomTriviaResponse {
        trivia: TriviaDto::from(trivia),
    })
}
