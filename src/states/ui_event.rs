//! UI Events
//!
//! Events emitted from the settings controller to whatever hosts it, for
//! toasts and for re-rendering after state changes.

use crate::domain::config::OptionKey;
use crate::states::view::EncryptionStatus;
use std::sync::Arc;

/// UI events for user feedback
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Display a toast notification
    Toast {
        /// Message to display
        message: Arc<str>,
        /// Whether this is an error (affects styling)
        is_error: bool,
    },

    /// An option was persisted and mirrored into the view
    OptionChanged { key: OptionKey },

    /// The server encryption flag was re-read after a toggle
    EncryptionChanged { status: EncryptionStatus },

    /// The view was rebuilt from the configuration record
    Reinitialized {
        /// Number of rebuilds since the controller started
        generation: u64,
    },
}

impl SettingsEvent {
    pub fn error(message: impl Into<Arc<str>>) -> Self {
        SettingsEvent::Toast {
            message: message.into(),
            is_error: true,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SettingsEvent::Toast { is_error: true, .. })
    }
}
