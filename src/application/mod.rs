//! Application layer managing state and page workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the current page, input modes, and the two state engines.

pub mod state;

pub use state::*;
