//! Configuration errors.

use thiserror::Error;

/// Configuration errors.
///
/// Resolution stops at the first one encountered.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required field
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Boolean variable that is neither `true` nor `false`
    #[error("Invalid boolean for {name}: {value:?}")]
    InvalidBoolean {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
    },

    /// Integer variable that does not parse
    #[error("Invalid integer for {name}: {value:?} ({reason})")]
    InvalidInteger {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
        /// Parser message
        reason: String,
    },

    /// Tag outside the accepted set
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
        /// Parser message
        reason: String,
    },

    /// Invalid URL format
    #[error("Invalid URL for {name}: {reason}")]
    InvalidUrl {
        /// Variable name
        name: String,
        /// Parser message
        reason: String,
    },

    /// Domains file could not be read
    #[error("Failed to read domains file {path}: {source}")]
    DomainsFileUnreadable {
        /// File path
        path: String,
        /// I/O cause
        #[source]
        source: std::io::Error,
    },

    /// Domains file is not a YAML list of strings
    #[error("Failed to parse domains file {path}: {source}")]
    DomainsFileMalformed {
        /// File path
        path: String,
        /// YAML cause
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    /// The environment variable at fault, for validation errors.
    #[must_use]
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::MissingRequired(name)
            | Self::InvalidBoolean { name, .. }
            | Self::InvalidInteger { name, .. }
            | Self::InvalidValue { name, .. }
            | Self::InvalidUrl { name, .. } => Some(name),
            Self::DomainsFileUnreadable { .. } | Self::DomainsFileMalformed { .. } => None,
        }
    }

    /// Whether this is a domains-file error rather than a validation error.
    #[must_use]
    pub const fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::DomainsFileUnreadable { .. } | Self::DomainsFileMalformed { .. }
        )
    }
}
