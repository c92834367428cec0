//! Trivia fixtures shared across test suites.

use chrono::{DateTime, TimeZone, Utc};
use eco_trivia_core::trivia::Trivia;

const SAMPLE_TEXTS: [&str; 5] = [
    "Only about 2.5% of the water on Earth is fresh water.",
    "Japan discards roughly 5.2 million tonnes of edible food each year, \
     comparable to the total volume of global food aid.",
    "LED bulbs last about 40 times longer than incandescent bulbs and use far less energy.",
    "Making a can from recycled aluminium saves about 95% of the energy needed for a new one.",
    "The most recycled material in the world is steel, not glass.",
];

/// Fixed timestamp used for every fixture row.
///
/// # Panics
///
/// Panics if the hard-coded date is rejected by `chrono`.
#[must_use]
pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// The five-record trivia table used throughout the selector tests.
/// Record ids are 1-based, so `sample_trivia()[2]` has id 3.
#[must_use]
pub fn sample_trivia() -> Vec<Trivia> {
    let at = fixed_timestamp();
    SAMPLE_TEXTS
        .iter()
        .zip(1_i64..)
        .map(|(text, id)| Trivia {
            id,
            text: (*text).to_owned(),
            created_at: at,
            updated_at: at,
        })
        .collect()
}
