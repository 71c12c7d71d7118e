//! Error types for KREG

use thiserror::Error;

/// Main error type for kreg-core operations
#[derive(Error, Debug)]
pub enum KregError {
    /// The registry container could not be created
    #[error("failed to start {name}: {status}")]
    StartFailed { name: String, status: String, output: String },

    /// The registry container started but could not join the network
    #[error("failed to add {name} to the {network} network: {status}")]
    NetworkAttachFailed {
        name: String,
        network: String,
        status: String,
        output: String,
    },

    /// The container runtime could not be spawned (e.g., docker not installed)
    #[error("Runtime not available: {0}")]
    RuntimeNotAvailable(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl KregError {
    /// Combined stdout/stderr captured from the failing runtime invocation, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            KregError::StartFailed { output, .. }
            | KregError::NetworkAttachFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Validation errors for container and network names
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name length is invalid (must be 2-128 characters)
    #[error("Name must be 2-128 characters, got {0}")]
    InvalidNameLength(usize),

    /// Name contains invalid characters
    #[error("Name must start with a letter or digit and contain only alphanumeric characters, underscores, periods, and hyphens")]
    InvalidNameCharacters,

    /// Input contains null byte
    #[error("Input contains null byte")]
    NullByteInInput,

    /// Empty input where non-empty is required
    #[error("Input cannot be empty")]
    EmptyInput,
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDirectory,

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Unknown key passed to a config setter
    #[error("Unknown config key: {0}. Valid keys: name, network, runtime")]
    UnknownKey(String),

    /// Config IO error
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for kreg-core operations
pub type Result<T> = std::result::Result<T, KregError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KregError::StartFailed {
            name: "docker-image-reg".to_string(),
            status: "exit status: 125".to_string(),
            output: "Conflict. The container name is already in use".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to start docker-image-reg: exit status: 125"
        );
        assert!(err.output().unwrap().contains("already in use"));

        let err = KregError::NetworkAttachFailed {
            name: "docker-image-reg".to_string(),
            network: "kind".to_string(),
            status: "exit status: 1".to_string(),
            output: String::new(),
        };
        assert!(err.to_string().contains("the kind network"));

        let err = KregError::Validation(ValidationError::InvalidNameCharacters);
        assert!(err.to_string().contains("alphanumeric"));
        assert!(err.output().is_none());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidNameLength(200);
        assert!(err.to_string().contains("2-128"));

        let err = ValidationError::NullByteInInput;
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn test_from_config_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: KregError = ConfigError::from(io_err).into();
        assert!(matches!(err, KregError::Config(ConfigError::Io(_))));
    }
}
