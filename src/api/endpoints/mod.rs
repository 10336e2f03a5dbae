//! API endpoint handlers.
//!
//! Handlers are thin: validate, call the scorer, serialize.

pub mod health;
pub mod ping;
pub mod risk;
