//! Start command implementation

use anyhow::Result;
use kreg_core::{ConfigManager, DockerCli, Registry};

use crate::output::OutputContext;
use crate::{ExitCode, Overrides};

pub fn run(config: &ConfigManager, overrides: &Overrides, ctx: &OutputContext) -> Result<ExitCode> {
    let settings = overrides.resolve(config)?;
    let spec = settings.spec()?;
    let registry = Registry::new(DockerCli::new(&settings.runtime), spec);

    if let Err(err) = registry.start() {
        if ctx.json {
            ctx.json(&serde_json::json!({
                "status": "failed",
                "name": registry.spec().name,
                "error": err.to_string(),
                "output": err.output(),
            }))?;
        } else if let Some(output) = err.output() {
            ctx.runtime_output(output);
        }
        return Err(err.into());
    }

    let spec = registry.spec();
    if ctx.json {
        ctx.json(&serde_json::json!({
            "status": "started",
            "name": spec.name,
            "network": spec.network,
            "image": spec.image(),
            "port": spec.port().to_string(),
        }))?;
    } else {
        ctx.success(&format!(
            "Started registry '{}' on port {} and attached it to the '{}' network",
            spec.name,
            spec.port().host,
            spec.network
        ));
    }

    Ok(ExitCode::Success)
}
