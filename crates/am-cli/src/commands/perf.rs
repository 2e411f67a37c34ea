//! Perf command implementation

use am_core::{CounterPath, TimeWindow};
use am_resolve::{performance_statistics, PerfStatistics, ResolveError, Warnings};
use am_session::ManagementSession;
use anyhow::{Context, Result};
use chrono::Utc;

use crate::cli::{GlobalArgs, OutputFormat, PerfArgs};
use crate::commands::common::{new_table, print_json, summarize_warnings};
use crate::context::CommandContext;

/// Execute the perf command
pub async fn execute(args: &PerfArgs, global: &GlobalArgs) -> Result<()> {
    let cmd = CommandContext::load(global)?;
    let ctx = cmd.resolve();

    let objects = ctx
        .session
        .instances_by_display_name(&[args.name.as_str()])
        .await
        .context("Failed to look up object")?;
    if objects.is_empty() {
        return Err(ResolveError::NotFound {
            kind: "object".to_string(),
            name: args.name.clone(),
        }
        .into());
    }

    let counter = CounterPath {
        object: args.object.clone(),
        counter: args.counter.clone(),
        instance: args.instance.clone(),
    };
    let window = TimeWindow::last_hours(Utc::now(), args.hours);

    let mut warnings = Warnings::default();
    let mut stats = Vec::new();
    for object in &objects {
        if let Some(s) = performance_statistics(ctx, object, &counter, &window, &mut warnings)
            .await
            .with_context(|| format!("Failed to read samples of '{}'", object.display_name))?
        {
            stats.push(s);
        }
    }

    match args.output {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Table => print_table(&counter, args.hours, &stats),
    }
    summarize_warnings(&warnings);
    Ok(())
}

fn print_table(counter: &CounterPath, hours: u32, stats: &[PerfStatistics]) {
    if stats.is_empty() {
        println!("No samples of {} in the last {} hour(s).", counter, hours);
        return;
    }

    let mut table = new_table(&["OBJECT", "SAMPLES", "MIN", "MAX", "AVG", "LATEST", "AT"]);
    for s in stats {
        table.add_row(vec![
            s.object.clone(),
            s.samples.to_string(),
            format!("{:.2}", s.min),
            format!("{:.2}", s.max),
            format!("{:.2}", s.average),
            format!("{:.2}", s.latest),
            s.latest_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    println!("{} over the last {} hour(s)", counter, hours);
    println!("{}", table);
}
