//! Remove command implementation

use anyhow::Result;
use kreg_core::{ConfigManager, DockerCli, Registry};

use crate::output::OutputContext;
use crate::{ExitCode, Overrides};

/// Teardown is best-effort: step failures become warnings and the exit code
/// stays successful.
pub fn run(config: &ConfigManager, overrides: &Overrides, ctx: &OutputContext) -> Result<ExitCode> {
    let settings = overrides.resolve(config)?;
    let registry = Registry::new(DockerCli::new(&settings.runtime), settings.spec()?);

    let report = registry.remove();

    if ctx.json {
        ctx.json(&report)?;
        return Ok(ExitCode::Success);
    }

    if let Some(err) = &report.stop_error {
        ctx.warn(&format!("Container '{}' failed to stop: {}", report.name, err));
    }
    if let Some(err) = &report.remove_error {
        ctx.warn(&format!("Container '{}' failed to be removed: {}", report.name, err));
    }

    if report.is_clean() {
        ctx.success(&format!("Removed registry '{}'", report.name));
    } else {
        ctx.info(&format!("Finished removing registry '{}'", report.name));
    }

    Ok(ExitCode::Success)
}
