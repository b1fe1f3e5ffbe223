//! Service Layer
//!
//! Collaborators the settings controller delegates to. Each sits behind a
//! trait where it touches something the controller does not own: the record
//! file, the network, the server's config, or user files.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ServiceHub                            │
//! │  ┌─────────────┐ ┌───────────────┐ ┌──────────────────────┐  │
//! │  │ ConfigStore │ │ ResourceCache │ │ EncryptionFlagClient │  │
//! │  └─────────────┘ └───────────────┘ └──────────────────────┘  │
//! │  ┌─────────────────────────────┐   ┌──────────────────────┐  │
//! │  │ BackgroundImporter + Bridge │   │    OptionCatalog     │  │
//! │  └─────────────────────────────┘   └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ option edits
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 SettingsController (states)                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod background;
mod catalog;
mod config_store;
mod encryption;
mod file_bridge;
mod hub;
mod resource_cache;

pub use background::*;
pub use catalog::*;
pub use config_store::*;
pub use encryption::*;
pub use file_bridge::*;
pub use hub::*;
pub use resource_cache::*;
