//! Set-status command implementation

use am_resolve::{apply_status, resolve_targets, TargetKind, Warnings};
use am_session::ManagementSession;
use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, SetStatusArgs};
use crate::commands::common::{new_table, summarize_warnings, ExitCode};
use crate::context::CommandContext;

/// Execute the set-status command
pub async fn execute(args: &SetStatusArgs, global: &GlobalArgs) -> Result<()> {
    let cmd = CommandContext::load(global)?;
    let ctx = cmd.resolve();
    let kind = TargetKind::from(args.kind);

    let resolutions = resolve_targets(ctx, kind, args.name.as_deref(), &cmd.chooser())
        .await
        .with_context(|| format!("Failed to resolve {}", kind))?;
    if resolutions.is_empty() {
        println!(
            "No {} found on management server '{}'.",
            kind,
            cmd.session.server_name()
        );
        return Ok(());
    }

    let mut table = new_table(&["ROOT", "OBJECTS", "UPDATED", "SKIPPED", "FAILED", "WARNINGS"]);
    let mut all_warnings = Warnings::default();
    let mut failed = 0;

    for mut resolution in resolutions {
        let report = apply_status(ctx, &resolution.targets, args.status, &mut resolution.warnings)
            .await
            .with_context(|| {
                format!("Failed to set {} on '{}'", args.status, resolution.root.display_name)
            })?;

        failed += report.failed.len();
        table.add_row(vec![
            resolution.root.display_name.clone(),
            resolution.targets.len().to_string(),
            report.updated.len().to_string(),
            report.skipped.len().to_string(),
            report.failed.len().to_string(),
            resolution.warnings.len().to_string(),
        ]);
        all_warnings.append(resolution.warnings);
    }

    println!("Asset status set to {}", args.status);
    println!("{}", table);
    summarize_warnings(&all_warnings);

    if failed > 0 {
        eprintln!("{} object(s) could not be updated", failed);
        return Err(ExitCode(1).into());
    }
    Ok(())
}
