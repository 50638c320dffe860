//! Built-in Starboard blocks and their full schema histories.
//!
//! Container blocks render only their own wrapper; nested blocks are persisted
//! as separate records.

pub mod faq;
pub mod faq_item;
pub mod numbered_features;
pub mod stats;
pub mod stats_item;

use crate::table::BlockTable;
use starboard_common::ConfigurationError;
use starboard_styles::{RuleSet, StyleConfig, StyleDeriver};
use std::sync::Arc;
use tracing::info;

/// Class the host adds to every block's root element
pub(crate) fn block_class(block_name: &str) -> String {
    format!("wp-block-{}", block_name.replace('/', "-"))
}

impl BlockTable {
    /// Table of every built-in block, using the configured screens and defaults
    pub fn builtin(config: &StyleConfig) -> Result<Self, ConfigurationError> {
        let screens = Arc::new(config.screen_registry()?);
        let grid = StyleDeriver::new(screens.clone(), RuleSet::stats(&config.defaults));
        let item = StyleDeriver::new(screens.clone(), RuleSet::stats_item(&config.defaults));

        let mut table = BlockTable::new();
        table.register(screens.clone(), stats::schema(grid)?)?;
        table.register(screens.clone(), stats_item::schema(item)?)?;
        table.register(screens.clone(), faq::schema())?;
        table.register(screens.clone(), faq_item::schema()?)?;
        table.register(screens.clone(), numbered_features::schema()?)?;
        table.register(screens, numbered_features::item_schema())?;

        info!(blocks = table.len(), "Built-in block table ready");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_class() {
        assert_eq!(block_class("starboard/faq-item"), "wp-block-starboard-faq-item");
    }

    #[test]
    fn test_builtin_table_lists_every_block() {
        let table = BlockTable::builtin(&StyleConfig::default()).unwrap();
        let names: Vec<&str> = table.block_names().collect();
        assert_eq!(
            names,
            vec![
                "starboard/faq",
                "starboard/faq-item",
                "starboard/numbered-feature-item",
                "starboard/numbered-features",
                "starboard/stats",
                "starboard/stats-item",
            ]
        );
        assert_eq!(table.get(stats::STATS).unwrap().schema.len(), 3);
    }

    #[test]
    fn test_builtin_table_rejects_bad_screens() {
        let config = StyleConfig::from_json(
            r#"{ "screens": [{ "name": "Default", "minWidth": 0 }] }"#,
        )
        .unwrap();
        assert!(BlockTable::builtin(&config).is_err());
    }
}
