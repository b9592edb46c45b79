//! Apply command: fire the packaging hook against a service file

use std::path::Path;

use colored::Colorize;
use otel_layer_core::{HookOutcome, LifecycleEvent, OtelLayerPlugin, PluginConfig, ServiceDescription};
use similar::{ChangeTag, TextDiff};

use crate::error::Result;

/// Augment the service at `file` and write it to `output` (or back in place).
///
/// With `dry_run`, prints a unified diff of what would change instead.
pub fn run_apply(
    file: &Path,
    output: Option<&Path>,
    dry_run: bool,
    overrides: PluginConfig,
) -> Result<()> {
    let target = output.unwrap_or(file);
    let mut service = ServiceDescription::load(file)?;
    let original = service.render(target)?;

    let plugin = OtelLayerPlugin::with_overrides(overrides);
    let outcome = plugin.run_hook(LifecycleEvent::BeforePackageInitialize, &mut service)?;
    tracing::debug!(file = %file.display(), ?outcome, "Hook finished");

    if dry_run {
        let updated = service.render(target)?;
        print_diff(&original, &updated, target);
        return Ok(());
    }

    service.save(target)?;

    if let HookOutcome::Applied { functions, layers } = outcome {
        println!(
            "{} Augmented {} function(s) with {} layer(s) -> {}",
            "OK".green().bold(),
            functions,
            layers,
            target.display().to_string().cyan()
        );
    }

    Ok(())
}

fn print_diff(old: &str, new: &str, path: &Path) {
    if old == new {
        println!("{} No changes.", "OK".green().bold());
        return;
    }

    let name = path.display().to_string();
    println!("{}", format!("--- {name}").red());
    println!("{}", format!("+++ {name}").green());

    let diff = TextDiff::from_lines(old, new);
    for group in diff.grouped_ops(3) {
        for op in group {
            for change in diff.iter_changes(&op) {
                let line = change.to_string_lossy();
                let line = line.trim_end_matches('\n');
                match change.tag() {
                    ChangeTag::Delete => println!("{}", format!("-{line}").red()),
                    ChangeTag::Insert => println!("{}", format!("+{line}").green()),
                    ChangeTag::Equal => println!(" {line}"),
                }
            }
        }
        println!("{}", "...".dimmed());
    }
}
