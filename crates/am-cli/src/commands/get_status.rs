//! Get-status command implementation

use am_core::FarmVersion;
use am_resolve::{read_status, resolve_targets, StatusRow, TargetKind, Warnings};
use am_session::ManagementSession;
use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::{GetStatusArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{new_table, print_json, summarize_warnings};
use crate::context::CommandContext;

/// Asset status of one resolved root and its dependencies
#[derive(Debug, Serialize)]
struct RootStatus {
    root: String,
    version: Option<FarmVersion>,
    objects: Vec<StatusRow>,
    warnings: Vec<String>,
}

/// Execute the get-status command
pub async fn execute(args: &GetStatusArgs, global: &GlobalArgs) -> Result<()> {
    let cmd = CommandContext::load(global)?;
    let ctx = cmd.resolve();
    let kind = TargetKind::from(args.kind);

    let resolutions = resolve_targets(ctx, kind, args.name.as_deref(), &cmd.chooser())
        .await
        .with_context(|| format!("Failed to resolve {}", kind))?;

    let mut results = Vec::with_capacity(resolutions.len());
    let mut all_warnings = Warnings::default();
    for mut resolution in resolutions {
        let objects = read_status(ctx, &resolution.targets, &mut resolution.warnings)
            .await
            .with_context(|| {
                format!("Failed to read status of '{}'", resolution.root.display_name)
            })?;
        results.push(RootStatus {
            root: resolution.root.display_name.clone(),
            version: resolution.version,
            objects,
            warnings: resolution.warnings.iter().map(|w| w.to_string()).collect(),
        });
        all_warnings.append(resolution.warnings);
    }

    match args.output {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Table => {
            if results.is_empty() {
                println!(
                    "No {} found on management server '{}'.",
                    kind,
                    cmd.session.server_name()
                );
            } else {
                print_table(&results);
            }
        }
    }
    summarize_warnings(&all_warnings);
    Ok(())
}

fn print_table(results: &[RootStatus]) {
    let mut table = new_table(&["ROOT", "OBJECT", "CLASS", "STATUS"]);
    for result in results {
        for row in &result.objects {
            let status = if row.status.is_empty() {
                "-"
            } else {
                row.status.as_str()
            };
            table.add_row(vec![
                result.root.as_str(),
                row.display_name.as_str(),
                row.class_name.as_str(),
                status,
            ]);
        }
    }
    println!("{}", table);
}
