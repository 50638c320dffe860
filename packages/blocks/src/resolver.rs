//! # Compatibility Resolver
//!
//! Finds the schema version that produced a persisted snapshot and migrates
//! the declared attributes forward to the current shape.
//!
//! Versions are tried newest first, so current content resolves on the first
//! check. When more than one version matches, the newest one wins. With
//! byte-exact matching that only happens when both versions render identical
//! markup for the same stored attributes, so nothing is lost either way.

use crate::attributes::Attributes;
use crate::markup::MarkupSnapshot;
use crate::registry::VersionedSchemaRegistry;
use crate::version::SchemaVersion;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// A successfully resolved snapshot
#[derive(Debug)]
pub struct Resolution<'r> {
    /// The version whose output matched the snapshot
    pub version: &'r dyn SchemaVersion,
    pub version_index: usize,

    /// Declared attributes, migrated to the current version's shape
    pub attributes: Attributes,

    current_index: usize,
}

impl Resolution<'_> {
    /// Whether the snapshot came from an older version
    pub fn is_migrated(&self) -> bool {
        self.version_index != self.current_index
    }
}

/// No registered version produced this snapshot.
///
/// Carries the untouched snapshot and attributes so the host can fall back to
/// rendering the raw markup.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("No schema version of '{block_name}' matches the persisted markup")]
pub struct ResolutionFailure {
    pub block_name: String,
    pub snapshot: MarkupSnapshot,
    pub attributes: Attributes,
}

#[instrument(skip_all, fields(block = %registry.block_name(), versions = registry.len()))]
pub fn resolve<'r>(
    snapshot: &MarkupSnapshot,
    declared: &Attributes,
    registry: &'r VersionedSchemaRegistry,
) -> Result<Resolution<'r>, ResolutionFailure> {
    let current_index = registry.current_index();

    for index in (0..registry.len()).rev() {
        let version = match registry.version(index) {
            Some(version) => version,
            None => continue,
        };

        if !version.matches(snapshot) {
            continue;
        }

        let attributes = if index == current_index {
            debug!(index, "Snapshot matches current version");
            declared.clone()
        } else {
            info!(
                from = index,
                to = current_index,
                "Migrating attributes from older schema version"
            );
            registry.migrate(index, declared.clone())
        };

        return Ok(Resolution {
            version,
            version_index: index,
            attributes,
            current_index,
        });
    }

    warn!(len = snapshot.as_str().len(), "No schema version matches snapshot");
    Err(ResolutionFailure {
        block_name: registry.block_name().to_string(),
        snapshot: snapshot.clone(),
        attributes: declared.clone(),
    })
}
