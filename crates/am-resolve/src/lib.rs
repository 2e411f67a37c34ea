//! am-resolve - Infrastructure resolution for assetmon
//!
//! Resolves the objects an asset status operation targets. For a farm the
//! stages run strictly in order:
//!
//! 1. [`locator`] finds the farm by display name
//! 2. [`topology`] expands it to hosting computers and web applications
//! 3. [`database`] finds the database engine behind the configuration database
//! 4. [`cluster`] expands database hosts to their failover cluster and nodes
//! 5. [`status`] writes or reads the asset status of every collected object
//!
//! [`pipeline`] wires the stages together for each target kind. [`dashboard`]
//! and [`perf`] report monitor state and counter statistics.

pub mod chooser;
pub mod cluster;
pub mod context;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod locator;
pub(crate) mod lookup;
pub mod perf;
pub mod pipeline;
pub mod status;
pub mod topology;
pub mod warning;

#[cfg(test)]
pub(crate) mod test_utils;

pub use chooser::{FarmCandidate, FarmChooser, NonInteractive};
pub use context::ResolveContext;
pub use dashboard::{dashboard_rows, DashboardRow};
pub use error::{ResolveError, ResolveResult};
pub use locator::{locate_by_display_name, locate_farms, LocatedFarm};
pub use perf::{performance_statistics, summarize, PerfStatistics};
pub use pipeline::{resolve_farm, resolve_targets, Resolution, TargetKind};
pub use status::{apply_status, read_status, ApplyReport, StatusRow};
pub use warning::{ResolveWarning, Stage, Warnings};
