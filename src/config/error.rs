use std::path::PathBuf;
use thiserror::Error;

use crate::core::parser::ParseError;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bindings file does not exist.
    #[error("Bindings file not found: {0}")]
    NotFound(PathBuf),
    /// Bindings file is syntactically invalid.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A descriptor was rejected by strict parsing.
    #[error("Invalid descriptor on line {line}: {source}")]
    InvalidDescriptor {
        line: usize,
        #[source]
        source: ParseError,
    },
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
