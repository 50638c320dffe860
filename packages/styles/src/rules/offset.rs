use crate::rules::StyleRule;

/// Left offset in twelfths of the container
pub struct OffsetRule {
    default: u32,
}

impl OffsetRule {
    pub fn new(default: u32) -> Self {
        Self { default }
    }
}

impl StyleRule for OffsetRule {
    fn name(&self) -> &'static str {
        "offset"
    }

    fn default_value(&self) -> u32 {
        self.default
    }

    fn tokens(&self, value: u32) -> Vec<String> {
        vec![format!("offset-{}/12", value)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_token() {
        let rule = OffsetRule::new(0);
        assert_eq!(rule.default_value(), 0);
        assert_eq!(rule.tokens(1), vec!["offset-1/12"]);
    }
}
