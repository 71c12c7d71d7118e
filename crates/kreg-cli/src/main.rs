//! KREG CLI - local image registry for kind clusters

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use kreg_core::{ConfigError, ConfigManager, KregError, RegistrySettings};

mod commands;
mod output;

use commands::*;

/// Exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    UsageError = 2,
    RuntimeUnavailable = 20,
    StartFailed = 21,
    AttachFailed = 22,
    ConfigError = 30,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Pick the exit code for an error bubbled up from a command
    fn for_error(err: &anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<KregError>() {
            return match err {
                KregError::StartFailed { .. } => ExitCode::StartFailed,
                KregError::NetworkAttachFailed { .. } => ExitCode::AttachFailed,
                KregError::RuntimeNotAvailable(_) => ExitCode::RuntimeUnavailable,
                KregError::Validation(_) => ExitCode::UsageError,
                KregError::Config(_) => ExitCode::ConfigError,
            };
        }

        if err.downcast_ref::<ConfigError>().is_some() {
            return ExitCode::ConfigError;
        }

        ExitCode::GeneralError
    }
}

/// KREG - run a local image registry on the kind network
#[derive(Parser)]
#[command(name = "kreg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also honors NO_COLOR)
    #[arg(long, global = true)]
    no_color: bool,

    /// Container runtime CLI to invoke (overrides config)
    #[arg(long, global = true, env = "KREG_RUNTIME")]
    runtime: Option<String>,

    /// Registry container name (overrides config)
    #[arg(long, global = true)]
    name: Option<String>,

    /// Network to attach the registry to (overrides config)
    #[arg(long, global = true)]
    network: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the registry container and attach it to the network
    Start,

    /// Stop and remove the registry container
    Remove,

    /// Show or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check system requirements
    Doctor,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (name, network, runtime)
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Command-line overrides layered on top of the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub runtime: Option<String>,
    pub name: Option<String>,
    pub network: Option<String>,
}

impl Overrides {
    /// Load the persisted settings and apply the overrides, validating each
    pub fn resolve(&self, config: &ConfigManager) -> Result<RegistrySettings> {
        let mut settings = config.load()?.registry;

        if let Some(runtime) = &self.runtime {
            settings.set("runtime", runtime)?;
        }
        if let Some(name) = &self.name {
            settings.set("name", name)?;
        }
        if let Some(network) = &self.network {
            settings.set("network", network)?;
        }

        Ok(settings)
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let ctx = output::OutputContext::new(cli.json, cli.no_color, cli.quiet);
    let overrides = Overrides {
        runtime: cli.runtime,
        name: cli.name,
        network: cli.network,
    };

    let result = run_command(cli.command, &overrides, &ctx);

    match result {
        Ok(code) => std::process::exit(code.into()),
        Err(e) => {
            ctx.error(&format!("{:#}", e));
            std::process::exit(ExitCode::for_error(&e).into());
        }
    }
}

fn run_command(
    command: Commands,
    overrides: &Overrides,
    ctx: &output::OutputContext,
) -> Result<ExitCode> {
    let config = ConfigManager::with_defaults()?;

    match command {
        Commands::Start => start::run(&config, overrides, ctx),

        Commands::Remove => remove::run(&config, overrides, ctx),

        Commands::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(&config, ctx),
            ConfigAction::Set { key, value } => config_cmd::set(&config, &key, &value, ctx),
        },

        Commands::Doctor => doctor::run(&config, overrides, ctx),

        Commands::Completions { shell } => {
            completions::run(shell);
            Ok(ExitCode::Success)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kreg_core::ValidationError;
    use tempfile::TempDir;

    #[test]
    fn test_exit_code_for_errors() {
        let err: anyhow::Error = KregError::StartFailed {
            name: "docker-image-reg".to_string(),
            status: "exit status: 125".to_string(),
            output: String::new(),
        }
        .into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::StartFailed);

        let err: anyhow::Error = KregError::Validation(ValidationError::EmptyInput).into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::UsageError);

        let err: anyhow::Error = ConfigError::NoConfigDirectory.into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);

        let err = anyhow::anyhow!("something else");
        assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    }

    #[test]
    fn test_overrides_win_over_config() {
        let temp = TempDir::new().unwrap();
        let config = ConfigManager::new(temp.path().to_path_buf());
        config
            .update(|c| c.registry.set("network", "from-file"))
            .unwrap();

        let overrides = Overrides {
            runtime: Some("podman".to_string()),
            name: None,
            network: Some("from-flag".to_string()),
        };
        let settings = overrides.resolve(&config).unwrap();

        assert_eq!(settings.runtime, "podman");
        assert_eq!(settings.name, "docker-image-reg");
        assert_eq!(settings.network, "from-flag");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let temp = TempDir::new().unwrap();
        let config = ConfigManager::new(temp.path().to_path_buf());

        let overrides = Overrides {
            name: Some("bad;name".to_string()),
            ..Default::default()
        };

        assert!(overrides.resolve(&config).is_err());
    }
}
