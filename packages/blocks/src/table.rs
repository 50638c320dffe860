use crate::attributes::Attributes;
use crate::errors::BlockError;
use crate::markup::MarkupSnapshot;
use crate::registry::VersionedSchemaRegistry;
use crate::resolver::resolve;
use crate::version::SchemaVersion;
use serde::{Deserialize, Serialize};
use starboard_common::ConfigurationError;
use starboard_styles::ScreenRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// What the host stores for one block instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBlock {
    pub attributes: Attributes,
    pub markup_snapshot: MarkupSnapshot,
}

/// A loaded block, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBlock {
    /// Index of the version that produced the stored snapshot
    pub version_index: usize,

    /// Attributes in the current version's shape
    pub attributes: Attributes,

    /// The stored snapshot came from an older version
    pub needs_resave: bool,
}

/// Everything known about one block type
#[derive(Debug)]
pub struct BlockType {
    pub screens: Arc<ScreenRegistry>,
    pub schema: VersionedSchemaRegistry,
}

/// Block type name to its screens and schema history. Built once at startup.
#[derive(Debug, Default)]
pub struct BlockTable {
    types: BTreeMap<String, BlockType>,
}

impl BlockTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        screens: Arc<ScreenRegistry>,
        schema: VersionedSchemaRegistry,
    ) -> Result<(), ConfigurationError> {
        let name = schema.block_name().to_string();
        if self.types.contains_key(&name) {
            return Err(ConfigurationError::DuplicateBlockType(name));
        }

        debug!(block = %name, versions = schema.len(), "Registering block type");
        self.types.insert(name, BlockType { screens, schema });
        Ok(())
    }

    pub fn get(&self, block_name: &str) -> Option<&BlockType> {
        self.types.get(block_name)
    }

    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a stored record against its block type's schema history
    #[instrument(skip(self, record))]
    pub fn load(&self, block_name: &str, record: &PersistedBlock) -> Result<ResolvedBlock, BlockError> {
        let block_type = self.lookup(block_name)?;
        let resolution = resolve(&record.markup_snapshot, &record.attributes, &block_type.schema)?;

        Ok(ResolvedBlock {
            version_index: resolution.version_index,
            needs_resave: resolution.is_migrated(),
            attributes: resolution.attributes,
        })
    }

    /// Serialize attributes with the block type's current version.
    ///
    /// Attributes the current version does not accept are refused, since the
    /// resulting snapshot would fail to resolve on the next load.
    #[instrument(skip(self, attributes))]
    pub fn save(&self, block_name: &str, attributes: Attributes) -> Result<PersistedBlock, BlockError> {
        let block_type = self.lookup(block_name)?;
        let current = block_type.schema.current();

        if let Some(key) = current.shape().rejected_key(&attributes) {
            warn!(block = block_name, key, "Refusing to save attribute outside the current shape");
            return Err(BlockError::InvalidAttributes {
                block_name: block_name.to_string(),
                key: key.to_string(),
            });
        }

        let markup_snapshot = current.serialize(&attributes);

        Ok(PersistedBlock {
            attributes,
            markup_snapshot,
        })
    }

    fn lookup(&self, block_name: &str) -> Result<&BlockType, BlockError> {
        self.types
            .get(block_name)
            .ok_or_else(|| BlockError::UnknownBlockType(block_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;
    use crate::shape::{AttributeKind, AttributeShape};
    use crate::version::MarkupVersion;

    fn schema(name: &str) -> VersionedSchemaRegistry {
        VersionedSchemaRegistry::new(MarkupVersion::new(
            name,
            AttributeShape::new().field("text", AttributeKind::String),
            |attrs| vec![Element::new("p").text(attrs.get_str("text").unwrap_or_default()).into()],
        ))
    }

    #[test]
    fn test_duplicate_block_type_rejected() {
        let screens = Arc::new(ScreenRegistry::tailwind());
        let mut table = BlockTable::new();
        table.register(screens.clone(), schema("test/p")).unwrap();

        let err = table.register(screens, schema("test/p")).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateBlockType("test/p".to_string()));
    }

    #[test]
    fn test_save_then_load() {
        let mut table = BlockTable::new();
        table
            .register(Arc::new(ScreenRegistry::tailwind()), schema("test/p"))
            .unwrap();

        let attrs = Attributes::new().with("text", "Hello");
        let record = table.save("test/p", attrs.clone()).unwrap();
        let loaded = table.load("test/p", &record).unwrap();

        assert_eq!(loaded.attributes, attrs);
        assert_eq!(loaded.version_index, 0);
        assert!(!loaded.needs_resave);
    }

    #[test]
    fn test_unknown_block_type() {
        let table = BlockTable::new();
        let err = table.save("test/missing", Attributes::new()).unwrap_err();
        assert_eq!(err, BlockError::UnknownBlockType("test/missing".to_string()));
    }

    #[test]
    fn test_save_refuses_undeclared_attribute() {
        let mut table = BlockTable::new();
        table
            .register(Arc::new(ScreenRegistry::tailwind()), schema("test/p"))
            .unwrap();

        let err = table
            .save("test/p", Attributes::new().with("text", "Hi").with("className", "wide"))
            .unwrap_err();
        assert_eq!(
            err,
            BlockError::InvalidAttributes {
                block_name: "test/p".to_string(),
                key: "className".to_string(),
            }
        );
    }

    #[test]
    fn test_persisted_block_json() {
        let record = PersistedBlock {
            attributes: Attributes::new().with("text", "Hi"),
            markup_snapshot: MarkupSnapshot::new("<p>Hi</p>"),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"attributes":{"text":"Hi"},"markupSnapshot":"<p>Hi</p>"}"#);
    }
}
