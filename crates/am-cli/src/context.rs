//! Runtime context for CLI commands

use anyhow::{Context, Result};
use am_core::Config;
use am_resolve::ResolveContext;
use am_session::{DuckDbSession, ManagementSession};
use std::path::Path;

use crate::cli::GlobalArgs;
use crate::commands::common::PromptChooser;

/// Runtime context containing the loaded config and management server session
pub(crate) struct CommandContext {
    /// Loaded configuration
    pub config: Config,

    /// Session with the management server
    pub session: DuckDbSession,

    /// Prompting allowed
    pub interactive: bool,
}

impl CommandContext {
    /// Load the config and connect to the management server
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let project_path = Path::new(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(project_path).context("Failed to load project configuration")?
        };

        let session = connect(&config, args.management_server.as_deref(), project_path)?;
        log::debug!("Connected to management server '{}'", session.server_name());

        Ok(Self {
            config,
            session,
            interactive: !args.no_input,
        })
    }

    pub fn resolve(&self) -> ResolveContext<'_> {
        ResolveContext::new(&self.session, &self.config)
    }

    pub fn chooser(&self) -> PromptChooser {
        PromptChooser::new(self.interactive)
    }
}

/// Open the snapshot of the requested (or default) management server.
///
/// Relative snapshot paths are taken from the project directory.
fn connect(config: &Config, requested: Option<&str>, project_path: &Path) -> Result<DuckDbSession> {
    let (name, server) = config.resolve_server(requested).context(
        "No management server selected. Pass --management-server or set default_server in assetmon.yml",
    )?;

    let snapshot = if server.snapshot == ":memory:" {
        server.snapshot.clone()
    } else {
        project_path.join(&server.snapshot).display().to_string()
    };

    DuckDbSession::new(name, &snapshot).with_context(|| {
        format!(
            "Could not connect to management server '{}'. Reconnect, or pick another server with --management-server",
            name
        )
    })
}
