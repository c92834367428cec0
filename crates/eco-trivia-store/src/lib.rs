//! PostgreSQL persistence for the Eco Trivia backend.

pub mod pg_trivia_store;
