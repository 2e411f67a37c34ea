//! Explicit session and configuration handle passed to every stage

use am_core::Config;
use am_session::ManagementSession;

/// Everything a resolution stage needs from its caller.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Session bound to one management server
    pub session: &'a dyn ManagementSession,

    /// Class names, property keys and mapping tables
    pub config: &'a Config,
}

impl<'a> ResolveContext<'a> {
    pub fn new(session: &'a dyn ManagementSession, config: &'a Config) -> Self {
        Self { session, config }
    }
}
