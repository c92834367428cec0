//! `PostgreSQL` implementation of the `RecordStore` trait for trivia.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use eco_trivia_core::error::DomainError;
use eco_trivia_core::store::RecordStore;
use eco_trivia_core::trivia::Trivia;

const COUNT_TRIVIA: &str = "SELECT COUNT(*) FROM trivia";

// Ordered by primary key so an offset addresses the same row for as long as
// the table is unchanged.
const FETCH_TRIVIA_AT: &str = r"
SELECT id, text, created_at, updated_at
FROM trivia
ORDER BY id
OFFSET $1
LIMIT 1
";

#[derive(Debug, sqlx::FromRow)]
struct TriviaRow {
    id: i64,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TriviaRow> for Trivia {
    fn from(row: TriviaRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn query_failed(operation: &str, err: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("{operation} failed: {err}"))
}

/// PostgreSQL-backed trivia store.
#[derive(Debug, Clone)]
pub struct PgTriviaStore {
    pool: PgPool,
}

impl PgTriviaStore {
    /// Creates a new `PgTriviaStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgTriviaStore {
    type Record = Trivia;

    #[instrument(skip(self), level = "debug")]
    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(COUNT_TRIVIA)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_failed("trivia count", &e))?;

        u64::try_from(count)
            .map_err(|_| DomainError::Infrastructure(format!("trivia count is negative: {count}")))
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_at(&self, offset: u64) -> Result<Option<Trivia>, DomainError> {
        let offset = i64::try_from(offset).map_err(|_| {
            DomainError::Infrastructure(format!("trivia offset {offset} exceeds BIGINT range"))
        })?;

        let row: Option<TriviaRow> = sqlx::query_as(FETCH_TRIVIA_AT)
            .bind(offset)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("trivia fetch", &e))?;

        Ok(row.map(Trivia::from))
    }
}
