use crate::rules::RuleDefaults;
use crate::screens::{ScreenRegistry, TAILWIND_SCREENS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use starboard_common::{CommonResult, ConfigurationError};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "starboard.config.json";

/// Starboard style configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// Named screens in ascending width order (the default screen is implicit)
    #[serde(default = "default_screens")]
    pub screens: Vec<ScreenEntry>,

    /// Values used when a breakpoint leaves a setting unset
    #[serde(default)]
    pub defaults: RuleDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenEntry {
    pub name: String,
    pub min_width: Width,
}

/// A screen threshold, either a bare pixel count or a CSS length like `"768px"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Width {
    Pixels(u32),
    Css(String),
}

impl Width {
    pub fn to_pixels(&self) -> Option<u32> {
        match self {
            Width::Pixels(px) => Some(*px),
            Width::Css(value) => {
                static PX: OnceLock<Regex> = OnceLock::new();
                let re = PX.get_or_init(|| Regex::new(r"^\s*(\d+)\s*px\s*$").expect("valid pattern"));
                re.captures(value)
                    .and_then(|caps| caps.get(1))
                    .and_then(|digits| digits.as_str().parse().ok())
            }
        }
    }
}

fn default_screens() -> Vec<ScreenEntry> {
    TAILWIND_SCREENS
        .iter()
        .map(|(name, min_width)| ScreenEntry {
            name: name.to_string(),
            min_width: Width::Css(format!("{}px", min_width)),
        })
        .collect()
}

impl StyleConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(cwd: impl AsRef<Path>) -> CommonResult<Self> {
        let config_path = cwd.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading style config");
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            debug!(path = %config_path.display(), "No style config found, using defaults");
            Ok(StyleConfig::default())
        }
    }

    pub fn from_json(json: &str) -> CommonResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build and validate the screen registry described by this config
    pub fn screen_registry(&self) -> Result<ScreenRegistry, ConfigurationError> {
        let mut table = Vec::with_capacity(self.screens.len());
        for entry in &self.screens {
            let min_width = entry.min_width.to_pixels().ok_or_else(|| ConfigurationError::InvalidWidth {
                name: entry.name.clone(),
                value: match &entry.min_width {
                    Width::Pixels(px) => px.to_string(),
                    Width::Css(value) => value.clone(),
                },
            })?;
            table.push((entry.name.clone(), min_width));
        }
        ScreenRegistry::from_table(table)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            screens: default_screens(),
            defaults: RuleDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "screens": [
                { "name": "md", "minWidth": "768px" },
                { "name": "lg", "minWidth": 1024 }
            ],
            "defaults": { "perRow": 3 }
        }"#;

        let config = StyleConfig::from_json(json).unwrap();
        assert_eq!(config.screens.len(), 2);
        assert_eq!(config.defaults.per_row, 3);
        assert_eq!(config.defaults.columns, 12);

        let registry = config.screen_registry().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Default", "md", "lg"]);
        assert_eq!(registry.get("md").unwrap().min_width, Some(768));
    }

    #[test]
    fn test_default_config() {
        let config = StyleConfig::from_json("{}").unwrap();
        assert_eq!(config, StyleConfig::default());
        assert_eq!(config.screen_registry().unwrap(), ScreenRegistry::tailwind());
    }

    #[test]
    fn test_width_parsing() {
        assert_eq!(Width::Pixels(640).to_pixels(), Some(640));
        assert_eq!(Width::Css("640px".to_string()).to_pixels(), Some(640));
        assert_eq!(Width::Css(" 640 px ".to_string()).to_pixels(), Some(640));
        assert_eq!(Width::Css("40rem".to_string()).to_pixels(), None);
    }

    #[test]
    fn test_invalid_width_is_configuration_error() {
        let json = r#"{ "screens": [{ "name": "md", "minWidth": "48em" }] }"#;
        let config = StyleConfig::from_json(json).unwrap();
        let err = config.screen_registry().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidWidth { .. }));
    }

    #[test]
    fn test_unordered_screens_rejected() {
        let json = r#"{ "screens": [
            { "name": "lg", "minWidth": 1024 },
            { "name": "md", "minWidth": 768 }
        ] }"#;
        let config = StyleConfig::from_json(json).unwrap();
        assert!(config.screen_registry().is_err());
    }
}
