//! Shared utilities for CLI commands

use am_resolve::{FarmCandidate, FarmChooser, Warnings};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Select;
use serde::Serialize;
use std::fmt;
use std::io::IsTerminal;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run and the session is closed properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs exits with the code without printing.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Asks the operator to pick one of several farms sharing a display name.
///
/// Never prompts when input is disabled or stdin is not a terminal, so
/// unattended runs fail with a no-selection error instead of hanging.
pub(crate) struct PromptChooser {
    interactive: bool,
}

impl PromptChooser {
    pub(crate) fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl FarmChooser for PromptChooser {
    fn choose(&self, name: &str, candidates: &[FarmCandidate]) -> Option<usize> {
        if !self.interactive || !std::io::stdin().is_terminal() {
            log::debug!("Not prompting for farm '{}': input disabled", name);
            return None;
        }

        let items: Vec<String> = candidates.iter().map(candidate_label).collect();
        match Select::new()
            .with_prompt(format!("{} farms are named '{}', pick one", candidates.len(), name))
            .items(&items)
            .default(0)
            .interact_opt()
        {
            Ok(choice) => choice,
            Err(e) => {
                log::warn!("Farm selection failed: {}", e);
                None
            }
        }
    }
}

pub(crate) fn candidate_label(candidate: &FarmCandidate) -> String {
    format!(
        "{} (SharePoint {}, {})",
        candidate.display_name, candidate.version, candidate.id
    )
}

/// Table with the shared preset
pub(crate) fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header.to_vec());
    table
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// One-line warning summary on stderr; the warnings themselves were logged
/// as they were recorded.
pub(crate) fn summarize_warnings(warnings: &Warnings) {
    if !warnings.is_empty() {
        eprintln!("{} warning(s), see log output for details", warnings.len());
    }
}
