//! Application layer of the trivia catalog.

pub mod query_handlers;
pub mod random_selector;
