//! Helper Utilities
//!
//! Common utilities used across the crate.

mod fs;
pub mod paths;

pub use fs::*;
