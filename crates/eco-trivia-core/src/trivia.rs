//! Trivia record and its public projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `trivia` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    /// Primary key.
    pub id: i64,
    /// The trivia text shown to players.
    pub text: String,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Trivia as exposed to clients. Timestamps are internal and omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaDto {
    /// Primary key.
    pub id: i64,
    /// The trivia text.
    pub text: String,
}

impl From<Trivia> for TriviaDto {
    fn from(trivia: Trivia) -> Self {
        Self {
            id: trivia.id,
            text: trivia.text,
        }
    }
}

impl From<&Trivia> for TriviaDto {
    fn from(trivia: &Trivia) -> Self {
        Self {
            id: trivia.id,
            text: trivia.text.clone(),
        }
    }
}

/// Response body of the random trivia endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomTriviaResponse {
    /// The selected trivia.
    pub trivia: TriviaDto,
}
