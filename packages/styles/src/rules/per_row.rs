use crate::rules::StyleRule;

/// Grid items per row. Emits both the grid-sizing and the semantic token.
pub struct PerRowRule {
    default: u32,
}

impl PerRowRule {
    pub fn new(default: u32) -> Self {
        Self { default }
    }
}

impl StyleRule for PerRowRule {
    fn name(&self) -> &'static str {
        "perRow"
    }

    fn default_value(&self) -> u32 {
        self.default
    }

    fn tokens(&self, value: u32) -> Vec<String> {
        vec![
            format!("grid-cols-{}", value),
            format!("stats-per-row-{}", value),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_grid_and_semantic_tokens() {
        let rule = PerRowRule::new(4);
        assert_eq!(rule.tokens(3), vec!["grid-cols-3", "stats-per-row-3"]);
    }
}
