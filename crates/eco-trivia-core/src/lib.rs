//! Eco Trivia Core — shared abstractions.
//!
//! This crate defines the traits and error types that the catalog, the
//! store, and the API depend on. It contains no infrastructure code.

pub mod error;
pub mod rng;
pub mod store;
pub mod trivia;
