//! KREG Core Library
//!
//! This crate provides the core functionality for KREG, which runs a local
//! image registry container and joins it to a kind cluster's network:
//! registry specs, the container runtime boundary, the start/remove
//! lifecycle, name validation, and configuration management.
//!
//! # Example
//!
//! ```no_run
//! use kreg_core::{ConfigManager, DockerCli, Registry};
//!
//! let config = ConfigManager::with_defaults().unwrap().load().unwrap();
//! let spec = config.registry.spec().unwrap();
//!
//! let registry = Registry::new(DockerCli::new(&config.registry.runtime), spec);
//! registry.start().unwrap();
//!
//! let report = registry.remove();
//! assert!(report.is_clean());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod runtime;
pub mod validation;

// Re-export commonly used types
pub use config::ConfigManager;
pub use error::{ConfigError, KregError, Result, ValidationError};
pub use models::{
    AppConfig, PortMapping, RegistrySettings, RegistrySpec, DEFAULT_NETWORK,
    DEFAULT_REGISTRY_NAME, DEFAULT_RUNTIME, PULL_POLICY, REGISTRY_IMAGE, RESTART_POLICY,
};
pub use registry::{Registry, RemoveReport};
pub use runtime::{CommandOutput, ContainerRuntime, DockerCli};
pub use validation::{validate_name, validate_not_empty};
