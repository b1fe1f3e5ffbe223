//! Cultivation Settings Library
//!
//! Settings controller for the Cultivation game launcher: persists launcher
//! options, keeps the options screen's view in sync with them, and performs
//! the side effects some options carry (resource cache refresh, background
//! import, and the Grasscutter server's encryption flag).

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod states;
