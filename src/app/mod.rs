//! Application Layer
//!
//! Bootstrap configuration, logging, and wiring of the settings controller.

pub mod application;
pub mod config;
pub mod logging;
