//! Test helpers shared across crates.
//!
//! Provides environment variable guards and temporary configuration
//! directories.

pub mod env;
pub mod fixtures;
