use crate::breakpoints::{BreakpointConfig, SettingValue};
use crate::rules::RuleSet;
use crate::screens::ScreenRegistry;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Ordered utility-class tokens derived from a breakpoint config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleTokens(Vec<String>);

impl StyleTokens {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Space-joined tokens, suitable for a `class` attribute
    pub fn to_class_string(&self) -> String {
        self.0.join(" ")
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for StyleTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_class_string())
    }
}

/// Turns breakpoint configs into tokens for one set of screens and rules.
///
/// Derivation walks the registry, not the config, so the output order never
/// depends on how the config map was built.
#[derive(Debug, Clone)]
pub struct StyleDeriver {
    screens: Arc<ScreenRegistry>,
    rules: Arc<RuleSet>,
}

impl StyleDeriver {
    pub fn new(screens: Arc<ScreenRegistry>, rules: RuleSet) -> Self {
        Self {
            screens,
            rules: Arc::new(rules),
        }
    }

    pub fn screens(&self) -> &ScreenRegistry {
        &self.screens
    }

    /// Shared handle to the screens, for validating breakpoint keys elsewhere
    pub fn shared_screens(&self) -> Arc<ScreenRegistry> {
        self.screens.clone()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn derive(&self, config: &BreakpointConfig) -> StyleTokens {
        let mut tokens = Vec::new();

        for screen in self.screens.iter() {
            // Absent or inactive screens emit nothing; there is no fallback
            // to another screen's settings.
            let entry = match config.get(&screen.name) {
                Some(entry) if entry.active => entry,
                _ => continue,
            };

            let prefix = screen.prefix();
            for rule in self.rules.rules() {
                let value = match entry.settings.get(rule.name()) {
                    Some(SettingValue::Disabled) => continue,
                    Some(SettingValue::Value(value)) => *value,
                    None => rule.default_value(),
                };

                trace!(screen = %screen.name, rule = rule.name(), value, "Emitting tokens");
                tokens.extend(
                    rule.tokens(value)
                        .into_iter()
                        .map(|token| format!("{}{}", prefix, token)),
                );
            }
        }

        StyleTokens(tokens)
    }
}
