//! # Breakpoint Configuration
//!
//! Per-block mapping from screen name to `{active, settings}`.
//!
//! ## Storage rules
//!
//! - Only explicitly set parameters are stored; defaults are applied by the
//!   deriver, never written back here
//! - Updates merge into existing entries and never replace them wholesale
//! - Every key must name a screen of the [`ScreenRegistry`]
//!
//! ## Example
//!
//! ```rust,ignore
//! let screens = ScreenRegistry::tailwind();
//! let mut store = BreakpointConfigStore::new(&screens);
//!
//! store.merge_settings("lg", [("perRow", SettingValue::Value(6))])?;
//! store.set_active("lg", true)?;
//! ```

use crate::screens::{ScreenRegistry, DEFAULT_SCREEN};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// A write referenced a screen the registry does not know
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown screen: '{0}'")]
pub struct UnknownScreenError(pub String);

/// One parameter of a screen's settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Value(u32),

    /// Suppresses the parameter's tokens on this screen (persisted as `false`)
    Disabled,
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Value(value)
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SettingValue::Value(value) => serializer.serialize_u32(*value),
            SettingValue::Disabled => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SettingVisitor;

        impl<'de> Visitor<'de> for SettingVisitor {
            type Value = SettingValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative integer or `false`")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<SettingValue, E> {
                if value {
                    Err(E::invalid_value(Unexpected::Bool(true), &self))
                } else {
                    Ok(SettingValue::Disabled)
                }
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<SettingValue, E> {
                u32::try_from(value)
                    .map(SettingValue::Value)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<SettingValue, E> {
                u32::try_from(value)
                    .map(SettingValue::Value)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
            }
        }

        deserializer.deserialize_any(SettingVisitor)
    }
}

/// Named numeric parameters for one screen
pub type ScreenSettings = BTreeMap<String, SettingValue>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointEntry {
    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub settings: ScreenSettings,
}

/// Partial update for one screen: optional `active` plus settings to merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakpointPatch {
    pub active: Option<bool>,
    pub settings: ScreenSettings,
}

/// Screen name to entry. Stored sorted so the persisted JSON is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointConfig {
    entries: BTreeMap<String, BreakpointEntry>,
}

impl BreakpointConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for a new block instance: a single active default entry
    pub fn with_default_entry(settings: ScreenSettings) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            DEFAULT_SCREEN.to_string(),
            BreakpointEntry {
                active: true,
                settings,
            },
        );
        Self { entries }
    }

    pub fn get(&self, screen: &str) -> Option<&BreakpointEntry> {
        self.entries.get(screen)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BreakpointEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every key against the registry
    pub fn validate(&self, screens: &ScreenRegistry) -> Result<(), UnknownScreenError> {
        match self.entries.keys().find(|name| !screens.contains(name)) {
            Some(name) => Err(UnknownScreenError(name.clone())),
            None => Ok(()),
        }
    }

    fn entry_mut(&mut self, screen: &str) -> &mut BreakpointEntry {
        self.entries.entry(screen.to_string()).or_default()
    }
}

impl FromIterator<(String, BreakpointEntry)> for BreakpointConfig {
    fn from_iter<I: IntoIterator<Item = (String, BreakpointEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Mutable view over one block instance's breakpoint config
#[derive(Debug, Clone)]
pub struct BreakpointConfigStore<'s> {
    screens: &'s ScreenRegistry,
    config: BreakpointConfig,
}

impl<'s> BreakpointConfigStore<'s> {
    pub fn new(screens: &'s ScreenRegistry) -> Self {
        Self {
            screens,
            config: BreakpointConfig::new(),
        }
    }

    /// Wrap a persisted config, rejecting keys the registry does not know
    pub fn from_config(
        screens: &'s ScreenRegistry,
        config: BreakpointConfig,
    ) -> Result<Self, UnknownScreenError> {
        config.validate(screens)?;
        Ok(Self { screens, config })
    }

    pub fn get(&self, screen: &str) -> Option<&BreakpointEntry> {
        self.config.get(screen)
    }

    /// Flip only the `active` flag, creating an empty entry if needed
    pub fn set_active(&mut self, screen: &str, active: bool) -> Result<(), UnknownScreenError> {
        self.ensure_known(screen)?;
        debug!(screen, active, "Setting breakpoint active flag");
        self.config.entry_mut(screen).active = active;
        Ok(())
    }

    /// Invert the `active` flag and return the new value
    pub fn toggle_active(&mut self, screen: &str) -> Result<bool, UnknownScreenError> {
        self.ensure_known(screen)?;
        let entry = self.config.entry_mut(screen);
        entry.active = !entry.active;
        debug!(screen, active = entry.active, "Toggled breakpoint");
        Ok(entry.active)
    }

    /// Merge parameters into the screen's settings. Keys not given are untouched.
    pub fn merge_settings<I, K>(&mut self, screen: &str, partial: I) -> Result<(), UnknownScreenError>
    where
        I: IntoIterator<Item = (K, SettingValue)>,
        K: Into<String>,
    {
        self.ensure_known(screen)?;
        let entry = self.config.entry_mut(screen);
        for (key, value) in partial {
            let key = key.into();
            debug!(screen, setting = %key, value = ?value, "Merging breakpoint setting");
            entry.settings.insert(key, value);
        }
        Ok(())
    }

    /// Merge a patch that may also carry the `active` flag
    pub fn apply_patch(&mut self, screen: &str, patch: BreakpointPatch) -> Result<(), UnknownScreenError> {
        self.merge_settings(screen, patch.settings)?;
        if let Some(active) = patch.active {
            self.set_active(screen, active)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &BreakpointConfig {
        &self.config
    }

    pub fn into_config(self) -> BreakpointConfig {
        self.config
    }

    fn ensure_known(&self, screen: &str) -> Result<(), UnknownScreenError> {
        if self.screens.contains(screen) {
            Ok(())
        } else {
            warn!(screen, "Rejected write to unknown screen");
            Err(UnknownScreenError(screen.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screens() -> ScreenRegistry {
        ScreenRegistry::from_table([("md", 768), ("lg", 1024)]).unwrap()
    }

    #[test]
    fn test_merge_keeps_existing_keys() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);

        store.merge_settings("md", [("a", SettingValue::Value(1))]).unwrap();
        store.merge_settings("md", [("b", SettingValue::Value(2))]).unwrap();

        let entry = store.get("md").unwrap();
        assert_eq!(entry.settings.get("a"), Some(&SettingValue::Value(1)));
        assert_eq!(entry.settings.get("b"), Some(&SettingValue::Value(2)));
    }

    #[test]
    fn test_merge_creates_inactive_entry() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);
        store.merge_settings("lg", [("perRow", SettingValue::Value(6))]).unwrap();
        assert!(!store.get("lg").unwrap().active);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);
        store.merge_settings("md", [("perRow", SettingValue::Value(2))]).unwrap();
        let once = store.config().clone();
        store.merge_settings("md", [("perRow", SettingValue::Value(2))]).unwrap();
        assert_eq!(store.config(), &once);
    }

    #[test]
    fn test_merge_does_not_touch_other_screens() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);
        store.merge_settings("md", [("perRow", SettingValue::Value(2))]).unwrap();
        store.merge_settings("lg", [("perRow", SettingValue::Value(6))]).unwrap();
        assert_eq!(
            store.get("md").unwrap().settings.get("perRow"),
            Some(&SettingValue::Value(2))
        );
    }

    #[test]
    fn test_set_active_preserves_settings() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);
        store.merge_settings("md", [("perRow", SettingValue::Value(2))]).unwrap();
        store.set_active("md", true).unwrap();
        store.set_active("md", false).unwrap();

        let entry = store.get("md").unwrap();
        assert!(!entry.active);
        assert_eq!(entry.settings.len(), 1);
    }

    #[test]
    fn test_set_active_creates_empty_entry() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);
        store.set_active("Default", true).unwrap();
        let entry = store.get("Default").unwrap();
        assert!(entry.active);
        assert!(entry.settings.is_empty());
    }

    #[test]
    fn test_toggle() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);
        assert!(store.toggle_active("lg").unwrap());
        assert!(!store.toggle_active("lg").unwrap());
    }

    #[test]
    fn test_unknown_screen_rejected_without_side_effects() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);

        let err = store.merge_settings("xl", [("perRow", SettingValue::Value(2))]).unwrap_err();
        assert_eq!(err, UnknownScreenError("xl".to_string()));
        assert!(store.set_active("xl", true).is_err());
        assert!(store.config().is_empty());
    }

    #[test]
    fn test_apply_patch() {
        let screens = screens();
        let mut store = BreakpointConfigStore::new(&screens);
        store.merge_settings("md", [("offset", SettingValue::Value(1))]).unwrap();

        let patch: BreakpointPatch =
            serde_json::from_str(r#"{"active": true, "settings": {"columns": 6}}"#).unwrap();
        store.apply_patch("md", patch).unwrap();

        let entry = store.get("md").unwrap();
        assert!(entry.active);
        assert_eq!(entry.settings.get("columns"), Some(&SettingValue::Value(6)));
        assert_eq!(entry.settings.get("offset"), Some(&SettingValue::Value(1)));
    }

    #[test]
    fn test_from_config_validates() {
        let screens = screens();
        let config: BreakpointConfig =
            serde_json::from_str(r#"{"xl": {"active": true}}"#).unwrap();
        let err = BreakpointConfigStore::from_config(&screens, config).unwrap_err();
        assert_eq!(err.0, "xl");
    }

    #[test]
    fn test_setting_value_json() {
        let settings: ScreenSettings =
            serde_json::from_str(r#"{"perRow": 3, "offset": false}"#).unwrap();
        assert_eq!(settings.get("perRow"), Some(&SettingValue::Value(3)));
        assert_eq!(settings.get("offset"), Some(&SettingValue::Disabled));

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"offset":false,"perRow":3}"#);
    }

    #[test]
    fn test_setting_value_rejects_true_and_negative() {
        assert!(serde_json::from_str::<SettingValue>("true").is_err());
        assert!(serde_json::from_str::<SettingValue>("-1").is_err());
        assert!(serde_json::from_str::<SettingValue>("\"4\"").is_err());
    }

    #[test]
    fn test_entry_defaults_when_fields_missing() {
        let entry: BreakpointEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry, BreakpointEntry::default());
    }
}
