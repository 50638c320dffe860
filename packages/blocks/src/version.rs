use crate::attributes::Attributes;
use crate::markup::{render_nodes, MarkupSnapshot, Node};
use crate::shape::AttributeShape;
use serde_json::Value;
use std::fmt;

/// One published serialization rule of a block type.
///
/// A published version must never change what `serialize` produces or what
/// `matches` accepts, otherwise content persisted under it stops resolving.
pub trait SchemaVersion: fmt::Debug + Send + Sync {
    /// Block type this version belongs to (e.g. `starboard/faq-item`)
    fn block_name(&self) -> &str;

    /// Attribute keys this version stores
    fn shape(&self) -> &AttributeShape;

    /// Render the block body for stored attributes
    fn render(&self, attributes: &Attributes) -> String;

    fn serialize(&self, attributes: &Attributes) -> MarkupSnapshot {
        MarkupSnapshot::delimit(self.block_name(), attributes, &self.render(attributes))
    }

    /// Whether this version could have produced `snapshot`.
    ///
    /// The attributes stored in the delimiter must fit this version's shape, and
    /// re-serializing them must reproduce the snapshot byte for byte.
    fn matches(&self, snapshot: &MarkupSnapshot) -> bool {
        let block = match snapshot.parse() {
            Some(block) => block,
            None => return false,
        };

        block.block_name == self.block_name()
            && self.shape().accepts(&block.attributes)
            && self.serialize(&block.attributes) == *snapshot
    }
}

type RenderFn = dyn Fn(&Attributes) -> Vec<Node> + Send + Sync;

/// A schema version backed by a render closure.
///
/// The closure receives the stored attributes with shape defaults filled in.
pub struct MarkupVersion {
    block_name: String,
    shape: AttributeShape,
    render: Box<RenderFn>,
}

impl MarkupVersion {
    pub fn new<F>(block_name: impl Into<String>, shape: AttributeShape, render: F) -> Self
    where
        F: Fn(&Attributes) -> Vec<Node> + Send + Sync + 'static,
    {
        Self {
            block_name: block_name.into(),
            shape,
            render: Box::new(render),
        }
    }
}

impl SchemaVersion for MarkupVersion {
    fn block_name(&self) -> &str {
        &self.block_name
    }

    fn shape(&self) -> &AttributeShape {
        &self.shape
    }

    fn render(&self, attributes: &Attributes) -> String {
        let resolved = self.shape.resolved(attributes);
        render_nodes(&(self.render)(&resolved))
    }
}

impl fmt::Debug for MarkupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.shape.specs().iter().map(|spec| spec.name).collect();
        f.debug_struct("MarkupVersion")
            .field("block_name", &self.block_name)
            .field("attributes", &keys)
            .finish()
    }
}

type MigrateFn = dyn Fn(Attributes) -> Attributes + Send + Sync;

/// Total, deterministic transform from one version's attributes to the next
pub struct MigrationStep {
    description: String,
    apply: Box<MigrateFn>,
}

impl MigrationStep {
    pub fn new<F>(description: impl Into<String>, apply: F) -> Self
    where
        F: Fn(Attributes) -> Attributes + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            apply: Box::new(apply),
        }
    }

    /// Shapes are identical; only the markup changed
    pub fn identity() -> Self {
        Self::new("markup only", |attributes| attributes)
    }

    pub fn rename(from: &'static str, to: &'static str) -> Self {
        Self::new(format!("rename {} to {}", from, to), move |mut attributes| {
            attributes.rename(from, to);
            attributes
        })
    }

    /// Add `key` when absent; an existing value is kept
    pub fn inject(key: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(format!("inject {}", key), move |mut attributes| {
            if !attributes.contains_key(key) {
                attributes.insert(key, value.clone());
            }
            attributes
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn apply(&self, attributes: Attributes) -> Attributes {
        (self.apply)(attributes)
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("description", &self.description)
            .finish()
    }
}
