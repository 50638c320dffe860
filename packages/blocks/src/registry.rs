//! # Versioned Schema Registry
//!
//! Ordered, append-only list of a block type's serialization rules.
//!
//! ## Design
//!
//! - Index 0 is the first version ever released, the last index is current
//! - Versions are only ever appended, together with the migration step that
//!   lifts the previous version's attributes into the new shape
//! - There is no API to replace, reorder or remove a published version

use crate::attributes::Attributes;
use crate::markup::MarkupSnapshot;
use crate::version::{MigrationStep, SchemaVersion};
use starboard_common::ConfigurationError;
use tracing::debug;

#[derive(Debug)]
pub struct VersionedSchemaRegistry {
    block_name: String,
    versions: Vec<Box<dyn SchemaVersion>>,

    /// `migrations[i]` lifts version `i` attributes to version `i + 1`
    migrations: Vec<MigrationStep>,
}

impl VersionedSchemaRegistry {
    /// Start a registry from the first released version
    pub fn new(initial: impl SchemaVersion + 'static) -> Self {
        Self {
            block_name: initial.block_name().to_string(),
            versions: vec![Box::new(initial)],
            migrations: Vec::new(),
        }
    }

    /// Publish a new current version
    pub fn append(
        &mut self,
        migration: MigrationStep,
        version: impl SchemaVersion + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        if version.block_name() != self.block_name {
            return Err(ConfigurationError::BlockTypeMismatch {
                expected: self.block_name.clone(),
                found: version.block_name().to_string(),
            });
        }

        debug!(
            block = %self.block_name,
            index = self.versions.len(),
            migration = migration.description(),
            "Appending schema version"
        );
        self.versions.push(Box::new(version));
        self.migrations.push(migration);
        Ok(self)
    }

    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    /// The authoritative version new content is saved with
    pub fn current(&self) -> &dyn SchemaVersion {
        self.versions[self.current_index()].as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.versions.len() - 1
    }

    pub fn version(&self, index: usize) -> Option<&dyn SchemaVersion> {
        self.versions.get(index).map(|version| version.as_ref())
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn migration(&self, from_index: usize) -> Option<&MigrationStep> {
        self.migrations.get(from_index)
    }

    /// Run every step from `from_index` up to the current version
    pub fn migrate(&self, from_index: usize, attributes: Attributes) -> Attributes {
        self.migrations
            .iter()
            .skip(from_index)
            .fold(attributes, |attributes, step| step.apply(attributes))
    }

    /// Indices of every version whose `matches` accepts the snapshot, oldest first
    pub fn matching_versions(&self, snapshot: &MarkupSnapshot) -> Vec<usize> {
        self.versions
            .iter()
            .enumerate()
            .filter(|(_, version)| version.matches(snapshot))
            .map(|(index, _)| index)
            .collect()
    }
}
