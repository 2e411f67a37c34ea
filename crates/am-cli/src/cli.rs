//! CLI argument definitions using clap derive API

use am_core::AssetStatus;
use am_resolve::TargetKind;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// assetmon - track which infrastructure is in production, staged or retired
#[derive(Parser, Debug)]
#[command(name = "am")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Management server to connect to (name from assetmon.yml or snapshot path)
    #[arg(short, long, global = true, env = "AM_MANAGEMENT_SERVER")]
    pub management_server: Option<String>,

    /// Never prompt; ambiguous farm names fail instead
    #[arg(long, global = true)]
    pub no_input: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set the asset status of an object and everything it depends on
    SetStatus(SetStatusArgs),

    /// Show the asset status of an object and everything it depends on
    GetStatus(GetStatusArgs),

    /// Show monitor health and asset status for every instance of a class
    Dashboard(DashboardArgs),

    /// Summarize a performance counter over a recent time window
    Perf(PerfArgs),
}

/// Kind of object to resolve
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// SharePoint farm, with servers, web applications, database and cluster
    Farm,
    /// Single Windows computer
    Computer,
    /// SQL Server database engine with its hosts and cluster
    Database,
    /// Failover cluster with its nodes
    Cluster,
}

impl From<KindArg> for TargetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Farm => TargetKind::Farm,
            KindArg::Computer => TargetKind::Computer,
            KindArg::Database => TargetKind::Database,
            KindArg::Cluster => TargetKind::Cluster,
        }
    }
}

/// Arguments for the set-status command
#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Kind of object to update
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Display name of the object (default: every object of this kind)
    #[arg(short, long)]
    pub name: Option<String>,

    /// New asset status
    #[arg(short, long, value_parser = parse_status)]
    pub status: AssetStatus,
}

/// Arguments for the get-status command
#[derive(Args, Debug)]
pub struct GetStatusArgs {
    /// Kind of object to inspect
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Display name of the object (default: every object of this kind)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the dashboard command
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Class whose instances are listed
    #[arg(long)]
    pub class: String,

    /// Only objects whose display name contains this text
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the perf command
#[derive(Args, Debug)]
pub struct PerfArgs {
    /// Display name of the monitored object
    #[arg(short, long)]
    pub name: String,

    /// Performance object, e.g. "Processor"
    #[arg(long)]
    pub object: String,

    /// Counter name, e.g. "% Processor Time"
    #[arg(long)]
    pub counter: String,

    /// Counter instance, e.g. "_Total" (default: every instance)
    #[arg(long)]
    pub instance: Option<String>,

    /// Window length in hours, ending now
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..))]
    pub hours: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON output
    Json,
}

fn parse_status(s: &str) -> Result<AssetStatus, String> {
    s.parse::<AssetStatus>().map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
