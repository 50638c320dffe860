use crate::rules::StyleRule;

/// Item width in twelfths of the container
pub struct ColumnsRule {
    default: u32,
}

impl ColumnsRule {
    pub fn new(default: u32) -> Self {
        Self { default }
    }
}

impl StyleRule for ColumnsRule {
    fn name(&self) -> &'static str {
        "columns"
    }

    fn default_value(&self) -> u32 {
        self.default
    }

    fn tokens(&self, value: u32) -> Vec<String> {
        vec![format!("w-{}/12", value)]
    }
}
