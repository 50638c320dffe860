use crate::attributes::Attributes;
use serde_json::Value;
use starboard_styles::{BreakpointConfig, ScreenRegistry};
use std::sync::Arc;

/// Expected JSON type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Boolean,
    Integer,
    Object,
    Breakpoints,
}

impl AttributeKind {
    fn accepts(&self, value: &Value, screens: Option<&ScreenRegistry>) -> bool {
        match self {
            AttributeKind::String => value.is_string(),
            AttributeKind::Boolean => value.is_boolean(),
            AttributeKind::Integer => value.is_u64() || value.is_i64(),
            AttributeKind::Object => value.is_object(),
            AttributeKind::Breakpoints => {
                match serde_json::from_value::<BreakpointConfig>(value.clone()) {
                    Ok(config) => screens.map_or(true, |screens| config.validate(screens).is_ok()),
                    Err(_) => false,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub default: Option<Value>,
}

/// The attribute keys one schema version understands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeShape {
    specs: Vec<AttributeSpec>,

    /// Screens that `Breakpoints` values may name
    screens: Option<Arc<ScreenRegistry>>,
}

impl AttributeShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `Breakpoints` attributes to the screens of this registry
    pub fn with_screens(mut self, screens: Arc<ScreenRegistry>) -> Self {
        self.screens = Some(screens);
        self
    }

    pub fn field(mut self, name: &'static str, kind: AttributeKind) -> Self {
        self.specs.push(AttributeSpec {
            name,
            kind,
            default: None,
        });
        self
    }

    pub fn field_with_default(
        mut self,
        name: &'static str,
        kind: AttributeKind,
        default: impl Into<Value>,
    ) -> Self {
        self.specs.push(AttributeSpec {
            name,
            kind,
            default: Some(default.into()),
        });
        self
    }

    pub fn specs(&self) -> &[AttributeSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// First stored key that is undeclared or holds a value of the wrong kind
    pub fn rejected_key<'a>(&self, attributes: &'a Attributes) -> Option<&'a str> {
        let screens = self.screens.as_deref();
        attributes
            .iter()
            .find(|(key, value)| {
                !self
                    .get(key)
                    .map(|spec| spec.kind.accepts(value, screens))
                    .unwrap_or(false)
            })
            .map(|(key, _)| key)
    }

    /// Every stored key is declared and holds a value of the declared kind
    pub fn accepts(&self, attributes: &Attributes) -> bool {
        self.rejected_key(attributes).is_none()
    }

    /// Stored attributes with declared defaults filled in, for rendering only
    pub fn resolved(&self, attributes: &Attributes) -> Attributes {
        let mut resolved = attributes.clone();
        for spec in &self.specs {
            if let Some(default) = &spec.default {
                if !resolved.contains_key(spec.name) {
                    resolved.insert(spec.name, default.clone());
                }
            }
        }
        resolved
    }
}
