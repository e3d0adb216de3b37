//! Unified error system for the registry
//!
//! A single error type shared by every layer. The `Display` text of each
//! variant is exactly what the response envelope carries back to the caller,
//! so constructors take the final human-readable message.

use serde::{Deserialize, Serialize};

/// Unified error type for all registry operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RegistryError {
    /// Wrong number of positional arguments for an operation
    #[error("Incorrect number of arguments. Expecting {expected}")]
    Arity {
        /// Operation whose arity was violated
        operation: String,
        /// Arity declared by the operation table
        expected: usize,
        /// Number of arguments actually supplied
        actual: usize,
    },

    /// Operation name not present in the operation table.
    ///
    /// The caller-facing text does not echo the name back.
    #[error("Invalid Smart Contract function name.")]
    UnknownOperation {
        /// The unrecognised operation name
        name: String,
    },

    /// Key absent where existence is required
    #[error("{message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Underlying substrate I/O failure, message passed through
    #[error("{message}")]
    Storage {
        /// Error message from the substrate
        message: String,
    },

    /// Access-control gate refused the caller
    #[error("Permission denied. {message}")]
    PermissionDenied {
        /// Error message describing the denial
        message: String,
    },

    /// The caller's organization could not be resolved
    #[error("{message}")]
    IdentityUnavailable {
        /// Error message from the identity service
        message: String,
    },

    /// JSON encode/decode failure
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },
}

/// Discriminant of [`RegistryError`] for callers that need structured matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`RegistryError::Arity`]
    Arity,
    /// See [`RegistryError::UnknownOperation`]
    UnknownOperation,
    /// See [`RegistryError::NotFound`]
    NotFound,
    /// See [`RegistryError::Storage`]
    Storage,
    /// See [`RegistryError::PermissionDenied`]
    PermissionDenied,
    /// See [`RegistryError::IdentityUnavailable`]
    IdentityUnavailable,
    /// See [`RegistryError::Serialization`]
    Serialization,
    /// See [`RegistryError::Invalid`]
    Invalid,
}

impl RegistryError {
    /// Create an arity error
    pub fn arity(operation: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::Arity {
            operation: operation.into(),
            expected,
            actual,
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create an identity unavailable error
    pub fn identity_unavailable(message: impl Into<String>) -> Self {
        Self::IdentityUnavailable {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Structured kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Arity { .. } => ErrorKind::Arity,
            Self::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::IdentityUnavailable { .. } => ErrorKind::IdentityUnavailable,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Invalid { .. } => ErrorKind::Invalid,
        }
    }

    /// Prefix the message of a storage error with call-site context.
    ///
    /// Other variants are returned unchanged.
    pub fn with_storage_context(self, context: &str) -> Self {
        match self {
            Self::Storage { message } => Self::Storage {
                message: format!("{context}: {message}"),
            },
            other => other,
        }
    }
}

/// Standard Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RegistryError {
    fn from(err: toml::de::Error) -> Self {
        Self::invalid(format!("Invalid TOML: {err}"))
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(err.to_string()),
            _ => Self::storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message_matches_contract_text() {
        let err = RegistryError::arity("createPerson", 5, 4);
        assert_eq!(err.to_string(), "Incorrect number of arguments. Expecting 5");
        assert_eq!(err.kind(), ErrorKind::Arity);
    }

    #[test]
    fn test_storage_message_is_verbatim() {
        let err = RegistryError::storage("disk on fire");
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_storage_context_only_touches_storage() {
        let err = RegistryError::storage("timeout").with_storage_context("Failed to get person");
        assert_eq!(err.to_string(), "Failed to get person: timeout");

        let err = RegistryError::not_found("Person not found").with_storage_context("ignored");
        assert_eq!(err.to_string(), "Person not found");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RegistryError::from(io_err);
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }
}
