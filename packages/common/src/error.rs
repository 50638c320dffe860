use thiserror::Error;

/// Startup-time misconfiguration of the screen table or a block schema.
///
/// These are fatal: the block table cannot be built until the table that
/// produced the error is fixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Screen name '{0}' is reserved for the unprefixed baseline")]
    ReservedScreenName(String),

    #[error("Invalid screen name: '{0}'")]
    InvalidScreenName(String),

    #[error("Duplicate screen name: '{0}'")]
    DuplicateScreen(String),

    #[error("Screen '{name}' starts at {min_width}px, which does not exceed the previous threshold of {previous}px")]
    NonMonotonicThreshold {
        name: String,
        min_width: u32,
        previous: u32,
    },

    #[error("Invalid width '{value}' for screen '{name}'")]
    InvalidWidth { name: String, value: String },

    #[error("Schema version for '{found}' appended to the '{expected}' registry")]
    BlockTypeMismatch { expected: String, found: String },

    #[error("Block type '{0}' is registered twice")]
    DuplicateBlockType(String),
}

/// Common error type that can hold any starboard error
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}
