//! Configuration loader and schema types.
//!
//! This module exposes the settings that shape the scene, the pretend
//! player and logging, and helpers to load them from disk and environment.

mod load;
mod schema;

pub use load::*;
pub use schema::*;

#[cfg(test)]
mod tests;
