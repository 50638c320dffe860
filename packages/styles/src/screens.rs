//! # Screen Registry
//!
//! Static, ordered catalogue of responsive breakpoints.
//!
//! The registry always starts with the reserved [`DEFAULT_SCREEN`], which has
//! no width threshold and contributes unprefixed tokens. Every other screen has
//! a minimum width, and thresholds strictly increase in registry order.

use serde::{Deserialize, Serialize};
use starboard_common::ConfigurationError;
use std::collections::HashSet;

/// Reserved name of the all-sizes baseline screen
pub const DEFAULT_SCREEN: &str = "Default";

/// Screen table of the product theme
pub const TAILWIND_SCREENS: [(&str, u32); 4] = [("sm", 640), ("md", 768), ("lg", 1024), ("xl", 1280)];

/// A single named breakpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub name: String,

    /// Minimum viewport width in pixels (None for the default screen)
    pub min_width: Option<u32>,
}

impl Screen {
    fn baseline() -> Self {
        Self {
            name: DEFAULT_SCREEN.to_string(),
            min_width: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.min_width.is_none()
    }

    /// Token prefix for this screen: empty for the baseline, `"<name>:"` otherwise
    pub fn prefix(&self) -> String {
        if self.is_default() {
            String::new()
        } else {
            format!("{}:", self.name)
        }
    }
}

/// Ordered breakpoint catalogue. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRegistry {
    screens: Vec<Screen>,
}

impl ScreenRegistry {
    /// Build a registry from a `(name, min_width)` table.
    ///
    /// The default screen is prepended automatically and must not appear in
    /// the table.
    pub fn from_table<I, S>(table: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut screens = vec![Screen::baseline()];
        let mut seen = HashSet::new();
        let mut previous: Option<u32> = None;

        for (name, min_width) in table {
            let name = name.into();

            if name == DEFAULT_SCREEN {
                return Err(ConfigurationError::ReservedScreenName(name));
            }
            if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == ':') {
                return Err(ConfigurationError::InvalidScreenName(name));
            }
            if !seen.insert(name.clone()) {
                return Err(ConfigurationError::DuplicateScreen(name));
            }
            if let Some(previous) = previous {
                if min_width <= previous {
                    return Err(ConfigurationError::NonMonotonicThreshold {
                        name,
                        min_width,
                        previous,
                    });
                }
            }

            previous = Some(min_width);
            screens.push(Screen {
                name,
                min_width: Some(min_width),
            });
        }

        Ok(Self { screens })
    }

    /// The product's screens: `sm`, `md`, `lg`, `xl`
    pub fn tailwind() -> Self {
        let mut screens = vec![Screen::baseline()];
        screens.extend(TAILWIND_SCREENS.iter().map(|(name, min_width)| Screen {
            name: name.to_string(),
            min_width: Some(*min_width),
        }));
        Self { screens }
    }

    /// All screens, default first, then ascending width
    pub fn list_screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Screen> {
        self.screens.iter().find(|screen| screen.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.screens.iter().map(|screen| screen.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self::tailwind()
    }
}
