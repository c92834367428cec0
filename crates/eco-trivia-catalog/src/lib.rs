//! Eco Trivia — trivia catalog.
//!
//! Responsible for picking a random record out of a store of unknown,
//! changing size and shaping it into the public read model.

pub mod application;
