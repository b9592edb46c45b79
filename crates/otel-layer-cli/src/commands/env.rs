//! Show the variables injected into a single function

use std::path::Path;

use colored::Colorize;
use otel_layer_core::{OtelLayerPlugin, PluginConfig, ServiceDescription, environment_for};

use crate::error::{CliError, Result};

/// Print the generated environment for `function` in the service at `file`.
pub fn run_env(file: &Path, function: &str, json: bool, overrides: PluginConfig) -> Result<()> {
    let service = ServiceDescription::load(file)?;

    if !service.functions.contains_key(function) {
        let known: Vec<&str> = service.functions.keys().map(String::as_str).collect();
        return Err(CliError::user(format!(
            "Unknown function '{}'. Declared functions: {}",
            function,
            if known.is_empty() {
                "(none)".to_string()
            } else {
                known.join(", ")
            }
        )));
    }

    let resolved = OtelLayerPlugin::with_overrides(overrides).resolved_config(&service)?;
    let vars = environment_for(function, &resolved);

    if json {
        println!("{}", serde_json::to_string_pretty(&vars)?);
        return Ok(());
    }

    for (key, value) in &vars {
        println!("{}={}", key.cyan(), value.as_str().unwrap_or_default());
    }

    Ok(())
}
