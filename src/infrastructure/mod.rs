//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns: the
//! disk-backed key-value store and the PokeAPI catalogue loader.

pub mod persistence;
pub mod pokeapi;

pub use persistence::*;
pub use pokeapi::*;
