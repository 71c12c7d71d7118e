//! Data models for KREG
//!
//! The registry container itself is owned by the container runtime. The
//! only in-process model is the [`RegistrySpec`] describing which container
//! to create and which network to join, plus the persisted [`AppConfig`].

use crate::error::{ConfigError, Result};
use crate::validation::{validate_name, validate_not_empty};
use serde::{Deserialize, Serialize};

/// Current config version for migrations
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Default name of the registry container
pub const DEFAULT_REGISTRY_NAME: &str = "docker-image-reg";

/// Default network the registry joins (the network kind creates)
pub const DEFAULT_NETWORK: &str = "kind";

/// Default container runtime CLI
pub const DEFAULT_RUNTIME: &str = "docker";

/// Image run for the registry
pub const REGISTRY_IMAGE: &str = "registry:2";

/// A published port, rendered as `host:container`
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl PortMapping {
    /// The only mapping the registry is ever published on
    pub const REGISTRY: PortMapping = PortMapping {
        host: 5000,
        container: 5000,
    };

    /// The `-p` flag in the compact form the runtime accepts
    pub fn publish_arg(&self) -> String {
        format!("-p{}", self)
    }
}

impl std::fmt::Display for PortMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

/// Restart policy passed to `run --restart`
pub const RESTART_POLICY: &str = "always";

/// Image pull policy passed to `run --pull`
pub const PULL_POLICY: &str = "missing";

/// Everything needed to create, attach, and tear down one registry container.
///
/// Only `name` and `network` vary; image and port are fixed for every
/// instance, as are [`RESTART_POLICY`] and [`PULL_POLICY`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegistrySpec {
    pub name: String,
    pub network: String,
    image: &'static str,
    port: PortMapping,
}

impl RegistrySpec {
    /// Build a spec for the given container name and network, validating both
    pub fn new(name: impl Into<String>, network: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let network = network.into();

        validate_name(&name)?;
        validate_name(&network)?;

        Ok(Self {
            name,
            network,
            image: REGISTRY_IMAGE,
            port: PortMapping::REGISTRY,
        })
    }

    pub fn image(&self) -> &str {
        self.image
    }

    pub fn port(&self) -> PortMapping {
        self.port
    }

    /// `run -d -p5000:5000 --pull=missing --name=<name> --restart=always registry:2`
    pub fn run_args(&self) -> Vec<String> {
        vec![
            "run".to_string(),
            "-d".to_string(),
            self.port.publish_arg(),
            format!("--pull={}", PULL_POLICY),
            format!("--name={}", self.name),
            format!("--restart={}", RESTART_POLICY),
            self.image.to_string(),
        ]
    }

    /// `network connect <network> <name>`
    pub fn connect_args(&self) -> Vec<String> {
        vec![
            "network".to_string(),
            "connect".to_string(),
            self.network.clone(),
            self.name.clone(),
        ]
    }

    /// `stop <name>`
    pub fn stop_args(&self) -> Vec<String> {
        vec!["stop".to_string(), self.name.clone()]
    }

    /// `rm <name>`
    pub fn rm_args(&self) -> Vec<String> {
        vec!["rm".to_string(), self.name.clone()]
    }
}

impl Default for RegistrySpec {
    fn default() -> Self {
        Self {
            name: DEFAULT_REGISTRY_NAME.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            image: REGISTRY_IMAGE,
            port: PortMapping::REGISTRY,
        }
    }
}

fn default_name() -> String {
    DEFAULT_REGISTRY_NAME.to_string()
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_runtime() -> String {
    DEFAULT_RUNTIME.to_string()
}

/// Persisted registry settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrySettings {
    /// Container name
    #[serde(default = "default_name")]
    pub name: String,
    /// Network to attach the container to
    #[serde(default = "default_network")]
    pub network: String,
    /// Container runtime CLI program
    #[serde(default = "default_runtime")]
    pub runtime: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            network: default_network(),
            runtime: default_runtime(),
        }
    }
}

impl RegistrySettings {
    /// Set a single setting by key, validating the value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "name" => {
                validate_name(value)?;
                self.name = value.to_string();
            }
            "network" => {
                validate_name(value)?;
                self.network = value.to_string();
            }
            "runtime" => {
                validate_not_empty(value)?;
                self.runtime = value.trim().to_string();
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        Ok(())
    }

    /// Build the registry spec these settings describe
    pub fn spec(&self) -> Result<RegistrySpec> {
        RegistrySpec::new(&self.name, &self.network)
    }
}

fn default_config_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

/// The main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Config version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,
    /// Registry settings
    #[serde(default)]
    pub registry: RegistrySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION,
            registry: RegistrySettings::default(),
        }
    }
}
