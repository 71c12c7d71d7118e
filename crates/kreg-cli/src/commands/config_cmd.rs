//! Config command implementation

use anyhow::Result;
use comfy_table::Cell;
use kreg_core::{ConfigManager, PortMapping, REGISTRY_IMAGE};

use crate::output::{OutputContext, TableBuilder};
use crate::ExitCode;

pub fn show(config: &ConfigManager, ctx: &OutputContext) -> Result<ExitCode> {
    let app_config = config.load()?;

    if ctx.json {
        ctx.json(&app_config)?;
        return Ok(ExitCode::Success);
    }

    println!("Configuration:");
    println!("  Config file: {}", config.config_path().display());
    println!();

    let registry = &app_config.registry;
    let mut table = TableBuilder::new(vec!["Setting", "Value"]);
    for (key, value) in [
        ("name", registry.name.as_str()),
        ("network", registry.network.as_str()),
        ("runtime", registry.runtime.as_str()),
    ] {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    println!("{}", table.build());

    println!("Fixed:");
    println!("  image: {}", REGISTRY_IMAGE);
    println!("  port: {}", PortMapping::REGISTRY);

    Ok(ExitCode::Success)
}

pub fn set(config: &ConfigManager, key: &str, value: &str, ctx: &OutputContext) -> Result<ExitCode> {
    config.update(|c| c.registry.set(key, value))?;

    if ctx.json {
        ctx.json(&serde_json::json!({
            "status": "updated",
            "key": key,
            "value": value
        }))?;
    } else {
        ctx.success(&format!("Set {} = {}", key, value));
    }

    Ok(ExitCode::Success)
}
