//! TUIDEX - Terminal Pokedex & Task Board
//!
//! A multi-page terminal application: a paginated Pokedex backed by the
//! public PokeAPI, a reorderable to-do list persisted to disk, a counter,
//! and a blog placeholder page.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
