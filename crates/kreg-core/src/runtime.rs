//! Container runtime boundary for KREG
//!
//! Everything the registry lifecycle does goes through [`ContainerRuntime::exec`],
//! one blocking invocation of the runtime CLI per call. [`DockerCli`] is the
//! real implementation; tests swap in a fake that records argv.

use crate::error::{KregError, Result};
use crate::models::DEFAULT_RUNTIME;
use std::process::Command;

/// Exit status and combined output of one runtime invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    /// Stdout followed by stderr, lossily decoded.
    ///
    /// The two streams are captured separately, so lines are grouped by
    /// stream rather than kept in the order the runtime wrote them.
    pub output: String,
}

impl CommandOutput {
    /// A successful invocation with the given output
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            success: true,
            output: output.into(),
        }
    }

    /// A failed invocation with the given exit code and output
    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            success: false,
            output: output.into(),
        }
    }

    /// Human-readable exit status, e.g. `exit status: 125`
    pub fn status_text(&self) -> String {
        match self.status {
            Some(code) => format!("exit status: {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(out: std::process::Output) -> Self {
        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));

        Self {
            status: out.status.code(),
            success: out.status.success(),
            output,
        }
    }
}

/// Trait for container runtimes the registry lifecycle shells out to
pub trait ContainerRuntime {
    /// Run the runtime CLI with `args` and wait for it to exit.
    ///
    /// A non-zero exit is `Ok` with `success == false`; `Err` means the
    /// process could not be spawned at all.
    fn exec(&self, args: &[String]) -> Result<CommandOutput>;

    /// Name of the runtime program, used in log messages
    fn program(&self) -> &str;
}

impl<R: ContainerRuntime + ?Sized> ContainerRuntime for &R {
    fn exec(&self, args: &[String]) -> Result<CommandOutput> {
        (**self).exec(args)
    }

    fn program(&self) -> &str {
        (**self).program()
    }
}

/// Runtime backed by a docker-compatible CLI on `PATH`
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    /// Create a runtime invoking the given program (e.g. `docker`, `podman`)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check if the runtime program can be invoked
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Get the runtime version string
    pub fn version(&self) -> Option<String> {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

impl ContainerRuntime for DockerCli {
    fn exec(&self, args: &[String]) -> Result<CommandOutput> {
        tracing::debug!("exec: {} {}", self.program, args.join(" "));

        let out = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| {
                KregError::RuntimeNotAvailable(format!("failed to run {}: {}", self.program, e))
            })?;

        Ok(out.into())
    }

    fn program(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(CommandOutput::ok("").status_text(), "exit status: 0");
        assert_eq!(CommandOutput::failed(125, "").status_text(), "exit status: 125");

        let killed = CommandOutput {
            status: None,
            success: false,
            output: String::new(),
        };
        assert_eq!(killed.status_text(), "terminated by signal");
    }

    #[test]
    fn test_missing_program_is_not_available() {
        let runtime = DockerCli::new("kreg-definitely-not-a-real-runtime");

        assert!(!runtime.is_available());
        assert!(runtime.version().is_none());

        let result = runtime.exec(&["ps".to_string()]);
        assert!(matches!(result, Err(KregError::RuntimeNotAvailable(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_combines_stdout_and_stderr() {
        let runtime = DockerCli::new("sh");
        let args = vec![
            "-c".to_string(),
            "echo out; echo err >&2; exit 3".to_string(),
        ];

        let out = runtime.exec(&args).unwrap();

        assert!(!out.success);
        assert_eq!(out.status, Some(3));
        assert_eq!(out.output, "out\nerr\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_groups_output_by_stream() {
        let runtime = DockerCli::new("sh");
        let args = vec!["-c".to_string(), "echo first >&2; echo second".to_string()];

        let out = runtime.exec(&args).unwrap();

        assert!(out.success);
        assert_eq!(out.output, "second\nfirst\n");
    }

    #[test]
    fn test_default_program() {
        assert_eq!(DockerCli::default().program(), "docker");
    }

    // Integration tests that require docker are marked with #[ignore]
    // Run with: cargo test -- --ignored

    #[test]
    #[ignore]
    fn test_docker_version() {
        let runtime = DockerCli::default();
        assert!(runtime.is_available());
        assert!(runtime.version().unwrap().to_lowercase().contains("version"));
    }
}
