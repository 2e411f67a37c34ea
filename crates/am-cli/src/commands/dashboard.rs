//! Dashboard command implementation

use am_core::ClassName;
use am_resolve::{dashboard_rows, DashboardRow};
use anyhow::{Context, Result};

use crate::cli::{DashboardArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{new_table, print_json};
use crate::context::CommandContext;

/// Execute the dashboard command
pub async fn execute(args: &DashboardArgs, global: &GlobalArgs) -> Result<()> {
    let class = ClassName::try_new(args.class.trim()).context("--class cannot be empty")?;
    let cmd = CommandContext::load(global)?;

    let rows = dashboard_rows(cmd.resolve(), &class, args.name.as_deref())
        .await
        .with_context(|| format!("Failed to build dashboard for class '{}'", class))?;

    match args.output {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Table => print_table(&class, &rows),
    }
    Ok(())
}

fn print_table(class: &ClassName, rows: &[DashboardRow]) {
    if rows.is_empty() {
        println!("No instances of {}.", class);
        return;
    }

    let mut table = new_table(&["HEALTH", "OBJECT", "MONITOR", "SINCE", "ASSET STATUS"]);
    for row in rows {
        table.add_row(vec![
            row.health.to_string(),
            row.object.clone(),
            row.monitor.clone(),
            row.since
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
            row.asset_status.clone(),
        ]);
    }
    println!("{}", table);
}
