//! Error types for loading and saving blocks

use crate::resolver::ResolutionFailure;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Unknown block type: '{0}'")]
    UnknownBlockType(String),

    /// Saving would write a snapshot no version can read back
    #[error("Attribute '{key}' is not valid for block '{block_name}'")]
    InvalidAttributes { block_name: String, key: String },

    #[error("Invalid block content: {0}")]
    Unresolvable(#[from] ResolutionFailure),
}
