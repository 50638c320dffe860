mod columns;
mod offset;
mod per_row;

pub use columns::ColumnsRule;
pub use offset::OffsetRule;
pub use per_row::PerRowRule;

use serde::{Deserialize, Serialize};

/// Trait for turning one breakpoint setting into utility-class tokens
pub trait StyleRule: Send + Sync {
    /// Settings key this rule reads (e.g. `perRow`)
    fn name(&self) -> &'static str;

    /// Value used when a breakpoint does not set this parameter
    fn default_value(&self) -> u32;

    /// Unprefixed tokens for a resolved value
    fn tokens(&self, value: u32) -> Vec<String>;
}

/// Fallback values for rule parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleDefaults {
    pub per_row: u32,
    pub columns: u32,
    pub offset: u32,
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self {
            per_row: 4,
            columns: 12,
            offset: 0,
        }
    }
}

/// Ordered set of rules applied to every active screen
pub struct RuleSet {
    rules: Vec<Box<dyn StyleRule>>,
}

impl RuleSet {
    /// Rules for the stats grid
    pub fn stats(defaults: &RuleDefaults) -> Self {
        Self {
            rules: vec![Box::new(PerRowRule::new(defaults.per_row))],
        }
    }

    /// Rules for a single stats item (width and offset in twelfths)
    pub fn stats_item(defaults: &RuleDefaults) -> Self {
        Self {
            rules: vec![
                Box::new(ColumnsRule::new(defaults.columns)),
                Box::new(OffsetRule::new(defaults.offset)),
            ],
        }
    }

    /// Create an empty rule set
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule; rules emit in insertion order
    pub fn add_rule(&mut self, rule: Box<dyn StyleRule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn StyleRule>] {
        &self.rules
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|rule| rule.name()).collect();
        f.debug_struct("RuleSet").field("rules", &names).finish()
    }
}
