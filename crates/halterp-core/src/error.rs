//! Error types for the halterp core library
//!
//! Interpretation fails only for a handful of reasons: a single-valued link
//! that does not resolve to exactly one target, a malformed pointer, a
//! declaration that cannot be frozen, a sink that rejects the extracted
//! attributes, or an error raised by caller-supplied getters and coercions.

use thiserror::Error;

/// Main error type for halterp operations
#[derive(Error, Debug)]
pub enum Error {
    /// A single-valued link relation resolved to zero or several targets
    #[error("Cardinality error for '{attribute}' (rel '{rel}'): expected {expected}, found {actual}")]
    Cardinality {
        attribute: String,
        rel: String,
        expected: usize,
        actual: usize,
    },

    /// Failure raised by a caller-supplied value getter or coercion
    #[error("Lookup failed: {message}")]
    Lookup {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A built-in coercion could not convert the extracted value
    #[error("Coercion failed: {message} (value: {value})")]
    Coercion {
        message: String,
        value: String,
    },

    /// A location that is not a JSON Pointer
    #[error("Invalid JSON pointer '{pointer}': {message}")]
    InvalidPointer {
        pointer: String,
        message: String,
    },

    /// The declaration could not be frozen into an interpreter
    #[error("Declaration error: {message}")]
    Declaration {
        message: String,
    },

    /// The bound item class rejected the extracted attributes
    #[error("Failed to build {item_class}: {message}")]
    Instantiation {
        item_class: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a lookup error for use inside value getters and coercions
    pub fn lookup(message: impl Into<String>) -> Self {
        Error::Lookup {
            message: message.into(),
            source: None,
        }
    }

    /// Create a coercion error for the offending value
    pub fn coercion(message: impl Into<String>, value: &serde_json::Value) -> Self {
        Error::Coercion {
            message: message.into(),
            value: value.to_string(),
        }
    }

    /// Create a declaration error
    pub fn declaration(message: impl Into<String>) -> Self {
        Error::Declaration {
            message: message.into(),
        }
    }

    /// Expected and actual counts when this is a cardinality error
    pub fn cardinality_counts(&self) -> Option<(usize, usize)> {
        match self {
            Error::Cardinality { expected, actual, .. } => Some((*expected, *actual)),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
