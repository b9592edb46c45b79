//! Show the resolved plugin configuration

use std::path::Path;

use colored::Colorize;
use otel_layer_core::{OtelLayerPlugin, PluginConfig, ResolvedConfig, ServiceDescription};

use crate::error::Result;

/// Print the configuration the hook would apply to the service at `file`.
///
/// The token is masked in both text and JSON output.
pub fn run_show_config(file: &Path, json: bool, overrides: PluginConfig) -> Result<()> {
    let service = ServiceDescription::load(file)?;
    let resolved = masked(
        OtelLayerPlugin::with_overrides(overrides).resolved_config(&service)?,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!("{}", "Resolved otelLayerPlugin configuration".bold());
    if let Some(name) = service.name() {
        println!("  {:<10} {}", "Service:".dimmed(), name);
    }
    println!();
    println!("  {:<10} {}", "Tenant:".dimmed(), resolved.tenant);
    if resolved.token.is_empty() {
        println!("  {:<10} {}", "Token:".dimmed(), "(empty)".dimmed());
    } else {
        println!("  {:<10} {}", "Token:".dimmed(), resolved.token);
    }
    println!("  {:<10} {}", "Endpoint:".dimmed(), resolved.endpoint);
    println!("  {:<10} {}", "Env:".dimmed(), resolved.env);
    println!("  {:<10} {}", "Region:".dimmed(), resolved.region);

    if resolved.layers.is_empty() {
        println!("  {:<10} {}", "Layers:".dimmed(), "(none)".dimmed());
    } else {
        println!("  {}:", "Layers".dimmed());
        for layer in &resolved.layers {
            println!("    {} {}", "+".green(), layer);
        }
    }

    Ok(())
}

/// Hide a secret, keeping whether it is set visible.
fn mask(token: &str) -> String {
    if token.is_empty() {
        String::new()
    } else {
        "*".repeat(8)
    }
}

fn masked(mut resolved: ResolvedConfig) -> ResolvedConfig {
    resolved.token = mask(&resolved.token);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mask() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("abc"), "********");
    }

    #[test]
    fn test_masked_hides_token_only() {
        let resolved = PluginConfig::new().with_token("super-secret").resolve();
        let shown = masked(resolved.clone());

        assert_eq!(shown.token, "********");
        assert_eq!(shown.tenant, resolved.tenant);
        assert_eq!(shown.layers, resolved.layers);
        assert!(!serde_json::to_string(&shown).unwrap().contains("super-secret"));
    }

    #[test]
    fn test_show_config_runs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("serverless.yml");
        fs::write(&path, "service: demo\n").unwrap();

        assert!(run_show_config(&path, false, PluginConfig::default()).is_ok());
        assert!(run_show_config(&path, true, PluginConfig::default()).is_ok());
    }
}
