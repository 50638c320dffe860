//! # Starboard Blocks
//!
//! Versioned serialization for Starboard blocks.
//!
//! Every block type keeps the full, append-only history of how it has ever
//! rendered. Loading a persisted block finds the version that produced its
//! markup and migrates the stored attributes forward:
//!
//! ```text
//! PersistedBlock ─► resolve(snapshot, attributes, registry)
//!                     │  newest version first, byte-exact match
//!                     ├─► Resolution { version_index, migrated attributes }
//!                     └─► ResolutionFailure { raw snapshot, attributes }
//! ```

mod attributes;
mod errors;
pub mod library;
mod markup;
mod registry;
mod resolver;
mod shape;
mod table;
mod version;

pub use attributes::Attributes;
pub use errors::BlockError;
pub use markup::{escape_html, render_nodes, DelimitedBlock, Element, MarkupSnapshot, Node};
pub use registry::VersionedSchemaRegistry;
pub use resolver::{resolve, Resolution, ResolutionFailure};
pub use shape::{AttributeKind, AttributeShape, AttributeSpec};
pub use table::{BlockTable, BlockType, PersistedBlock, ResolvedBlock};
pub use version::{MarkupVersion, MigrationStep, SchemaVersion};
