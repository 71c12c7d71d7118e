//! Registry container lifecycle
//!
//! [`Registry::start`] is fail-fast: the first failing runtime call ends the
//! operation and the attach step only runs after a successful create.
//! [`Registry::remove`] is best-effort: stop and rm are both always
//! attempted and failures are only logged.

use crate::error::{KregError, Result};
use crate::models::RegistrySpec;
use crate::runtime::{CommandOutput, ContainerRuntime};
use serde::Serialize;

/// A registry container driven through a container runtime
#[derive(Debug)]
pub struct Registry<R> {
    runtime: R,
    spec: RegistrySpec,
}

/// Outcome of a best-effort teardown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveReport {
    pub name: String,
    pub stopped: bool,
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_error: Option<String>,
}

impl RemoveReport {
    /// Whether both teardown steps succeeded
    pub fn is_clean(&self) -> bool {
        self.stopped && self.removed
    }
}

impl<R: ContainerRuntime> Registry<R> {
    pub fn new(runtime: R, spec: RegistrySpec) -> Self {
        Self { runtime, spec }
    }

    pub fn spec(&self) -> &RegistrySpec {
        &self.spec
    }

    /// Create the registry container, then attach it to the network.
    ///
    /// No pre-existence check is made: if a container with the same name
    /// already exists the create step fails and attach is never attempted.
    /// An attach failure leaves the created container running.
    pub fn start(&self) -> Result<()> {
        let name = &self.spec.name;
        tracing::info!("Starting {}", name);

        let out = self.runtime.exec(&self.spec.run_args())?;
        if !out.success {
            tracing::info!("{}", out.output.trim_end());
            return Err(KregError::StartFailed {
                name: name.clone(),
                status: out.status_text(),
                output: out.output,
            });
        }

        let out = self.runtime.exec(&self.spec.connect_args())?;
        if !out.success {
            tracing::info!("{}", out.output.trim_end());
            return Err(KregError::NetworkAttachFailed {
                name: name.clone(),
                network: self.spec.network.clone(),
                status: out.status_text(),
                output: out.output,
            });
        }

        tracing::info!("attached {} to {} network", name, self.spec.network);
        Ok(())
    }

    /// Stop, then remove, the registry container.
    ///
    /// Never fails: each step's error is logged and recorded in the report.
    pub fn remove(&self) -> RemoveReport {
        let name = &self.spec.name;
        let program = self.runtime.program();
        tracing::info!("Removing container {} from {}", name, program);

        let stop_error = self.attempt(&self.spec.stop_args()).err();
        if let Some(err) = &stop_error {
            tracing::info!("container \"{}\" failed to stop: {}", name, err);
        }

        let remove_error = self.attempt(&self.spec.rm_args()).err();
        if let Some(err) = &remove_error {
            tracing::info!("container \"{}\" failed to be removed: {}", name, err);
        }

        tracing::info!("{} removed from {}", name, program);

        RemoveReport {
            name: name.clone(),
            stopped: stop_error.is_none(),
            removed: remove_error.is_none(),
            stop_error,
            remove_error,
        }
    }

    /// Run one teardown step, flattening spawn errors and non-zero exits
    /// into a single message.
    fn attempt(&self, args: &[String]) -> std::result::Result<CommandOutput, String> {
        match self.runtime.exec(args) {
            Ok(out) if out.success => Ok(out),
            Ok(out) => {
                let detail = out.output.trim();
                if detail.is_empty() {
                    Err(out.status_text())
                } else {
                    Err(format!("{}: {}", out.status_text(), detail))
                }
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
