//! Mutation Policy
//!
//! Per-option rules for how an edit propagates: how it is persisted, what
//! side effect follows, and whether the view must be rebuilt afterwards.
//! Kept as data so the whole policy can be read (and tested) in one place.

use crate::domain::config::OptionKey;

/// How an edit reaches the configuration record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    /// Write the given value
    Write,
    /// Read the persisted flag and write its inverse
    Invert,
    /// Handed to a collaborator that persists on its own
    Delegated,
    /// Not a record field; state lives outside the launcher
    External,
}

/// Work that follows the persist step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    None,
    /// Refresh the resource cache for the new version
    RefreshResources,
    /// Copy a local background into the launcher's asset directory
    ImportBackground,
    /// Flip the flag in the server's own config
    ToggleServerEncryption,
}

/// Descriptor for one editable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionPolicy {
    pub persist: Persist,
    pub side_effect: SideEffect,
    pub reinit: bool,
}

impl OptionPolicy {
    const fn new(persist: Persist, side_effect: SideEffect, reinit: bool) -> Self {
        Self {
            persist,
            side_effect,
            reinit,
        }
    }

    /// Policy for a record option
    pub const fn for_key(key: OptionKey) -> Self {
        use OptionKey::*;
        match key {
            GameInstallPath | GrasscutterJarPath | JavaPath | ExtraToolPath | SwagMode => {
                Self::new(Persist::Write, SideEffect::None, false)
            }
            ClientVersion => Self::new(Persist::Write, SideEffect::RefreshResources, false),
            GrasscutterWithGame => Self::new(Persist::Invert, SideEffect::None, false),
            Language | Theme => Self::new(Persist::Write, SideEffect::None, true),
            CustomBackground => Self::new(Persist::Delegated, SideEffect::ImportBackground, true),
        }
    }

    /// Policy for the server encryption toggle; the view re-reads the flag
    /// instead of reinitializing
    pub const ENCRYPTION_TOGGLE: Self =
        Self::new(Persist::External, SideEffect::ToggleServerEncryption, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_options_are_plain_writes() {
        for key in [
            OptionKey::GameInstallPath,
            OptionKey::GrasscutterJarPath,
            OptionKey::JavaPath,
            OptionKey::ExtraToolPath,
        ] {
            assert_eq!(
                OptionPolicy::for_key(key),
                OptionPolicy::new(Persist::Write, SideEffect::None, false),
                "{key}"
            );
        }
    }

    #[test]
    fn test_only_globally_loaded_resources_reinitialize() {
        let reinit: Vec<OptionKey> = OptionKey::ALL
            .into_iter()
            .filter(|key| OptionPolicy::for_key(*key).reinit)
            .collect();

        assert_eq!(
            reinit,
            vec![OptionKey::Language, OptionKey::CustomBackground, OptionKey::Theme]
        );
        assert!(!OptionPolicy::ENCRYPTION_TOGGLE.reinit);
    }

    #[test]
    fn test_client_version_refreshes_resources() {
        assert_eq!(
            OptionPolicy::for_key(OptionKey::ClientVersion).side_effect,
            SideEffect::RefreshResources
        );
    }

    #[test]
    fn test_with_game_is_inverted() {
        assert_eq!(
            OptionPolicy::for_key(OptionKey::GrasscutterWithGame).persist,
            Persist::Invert
        );
    }
}
