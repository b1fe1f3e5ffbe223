//! State Management Layer
//!
//! The settings view and the controller that mutates it. Data flows one way:
//!
//! ```text
//! User Action → Controller → Service Call → Persist → View Update → SettingsEvent → Host Refresh
//! ```

mod controller;
mod policy;
mod ui_event;
mod view;

pub use controller::*;
pub use policy::*;
pub use ui_event::*;
pub use view::*;
