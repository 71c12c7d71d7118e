//! Doctor command implementation

use anyhow::Result;
use comfy_table::Cell;
use kreg_core::{ConfigManager, ContainerRuntime, DockerCli, RegistrySettings};
use serde::Serialize;

use crate::output::{OutputContext, TableBuilder};
use crate::{ExitCode, Overrides};

#[derive(Serialize)]
struct Check {
    name: String,
    passed: bool,
    message: String,
    required: bool,
}

impl Check {
    fn new(name: &str, passed: bool, message: String, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed,
            message,
            required,
        }
    }
}

pub fn run(config: &ConfigManager, overrides: &Overrides, ctx: &OutputContext) -> Result<ExitCode> {
    let settings = overrides.resolve(config)?;
    let runtime = DockerCli::new(&settings.runtime);

    let runtime_check = check_runtime(&runtime);
    let network_check = if runtime_check.passed {
        check_network(&runtime, &settings)
    } else {
        Check::new(
            "network",
            false,
            format!("'{}' not checked", settings.network),
            false,
        )
    };

    let checks = vec![runtime_check, network_check, check_config_dir(config)];
    let all_required_passed = checks.iter().all(|c| c.passed || !c.required);

    if ctx.json {
        ctx.json(&serde_json::json!({
            "checks": checks,
            "all_passed": all_required_passed
        }))?;
    } else {
        println!("System Diagnostics");
        println!("==================");

        let mut table = TableBuilder::new(vec!["Check", "Status", "Details"]);
        for check in &checks {
            let label = if check.required {
                check.name.clone()
            } else {
                format!("{} (optional)", check.name)
            };
            table.add_row(vec![
                Cell::new(label),
                ctx.check_cell(check.passed, check.required),
                Cell::new(&check.message),
            ]);
        }
        println!("{}", table.build());

        if all_required_passed {
            ctx.success("All required checks passed");
        } else {
            ctx.error("Some required checks failed");
        }
    }

    if all_required_passed {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::GeneralError)
    }
}

fn check_runtime(runtime: &DockerCli) -> Check {
    match runtime.version() {
        Some(version) => Check::new("runtime", true, version, true),
        None => Check::new(
            "runtime",
            false,
            format!("{} not found in PATH", runtime.program()),
            true,
        ),
    }
}

/// The network only exists while a kind cluster is up, so a miss is not fatal.
fn check_network(runtime: &DockerCli, settings: &RegistrySettings) -> Check {
    let args = vec![
        "network".to_string(),
        "inspect".to_string(),
        settings.network.clone(),
    ];

    match runtime.exec(&args) {
        Ok(out) if out.success => Check::new(
            "network",
            true,
            format!("'{}' exists", settings.network),
            false,
        ),
        _ => Check::new(
            "network",
            false,
            format!("'{}' not found (is the kind cluster running?)", settings.network),
            false,
        ),
    }
}

fn check_config_dir(config: &ConfigManager) -> Check {
    if config.is_config_dir_writable() {
        Check::new(
            "config_dir",
            true,
            format!("{} (writable)", config.config_dir().display()),
            true,
        )
    } else {
        Check::new(
            "config_dir",
            false,
            format!("{} (not writable)", config.config_dir().display()),
            true,
        )
    }
}
