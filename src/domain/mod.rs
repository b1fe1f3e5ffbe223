//! Domain - Pure Data Structures
//!
//! These types don't depend on any collaborator and represent the launcher's
//! persisted and cached data.

pub mod catalog;
pub mod config;
pub mod resources;
