//! CLI command implementations

pub(crate) mod common;
pub(crate) mod dashboard;
pub(crate) mod get_status;
pub(crate) mod perf;
pub(crate) mod set_status;
