//! Configuration types and parsing for assetmon.yml

use crate::error::{CoreError, CoreResult};
use crate::{ClassFamilyTable, ClassName, SqlFarmMapping};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// File names searched for in a project directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["assetmon.yml", "assetmon.yaml"];

/// Main configuration from assetmon.yml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Management server used when none is given on the command line
    #[serde(default)]
    pub default_server: Option<String>,

    /// Known management servers and where their snapshots live
    #[serde(default)]
    pub servers: HashMap<String, ServerConfig>,

    /// Asset status enumeration and property
    #[serde(default)]
    pub status: StatusConfig,

    /// Value property keys read during resolution
    #[serde(default)]
    pub properties: PropertyKeys,

    /// Schema class names
    #[serde(default)]
    pub classes: ClassesConfig,

    /// Supported (SQL major version, farm version) pairs
    #[serde(default)]
    pub sql_farm_mapping: SqlFarmMapping,
}

/// Connection settings for one management server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Path of the DuckDB snapshot exported from the management group
    pub snapshot: String,
}

/// Where the asset status lives and how its values are named
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    /// Management pack that defines the enumeration
    #[serde(default = "default_management_pack")]
    pub management_pack: String,

    /// Enumeration path prefix; a value path is `<prefix>.<Status>`
    #[serde(default = "default_enumeration_prefix")]
    pub enumeration_prefix: String,

    /// Property key holding the status
    #[serde(default = "default_status_property")]
    pub property: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            management_pack: default_management_pack(),
            enumeration_prefix: default_enumeration_prefix(),
            property: default_status_property(),
        }
    }
}

/// Value property keys
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyKeys {
    /// Database server name on the farm configuration object
    #[serde(default = "default_server_name_key")]
    pub server_name: String,

    /// Product version on a database engine
    #[serde(default = "default_version_key")]
    pub version: String,

    /// Cluster name on a cluster shared volume
    #[serde(default = "default_cluster_name_key")]
    pub cluster_name: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self {
            server_name: default_server_name_key(),
            version: default_version_key(),
            cluster_name: default_cluster_name_key(),
        }
    }
}

/// Schema class names used by the resolution stages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassesConfig {
    #[serde(default = "default_windows_computer")]
    pub windows_computer: ClassName,

    /// Database engine classes, one per schema generation
    #[serde(default = "default_database_engines")]
    pub database_engines: Vec<ClassName>,

    /// Database classes, one per schema generation
    #[serde(default = "default_databases")]
    pub databases: Vec<ClassName>,

    #[serde(default = "default_cluster")]
    pub cluster: ClassName,

    #[serde(default = "default_cluster_shared_volume")]
    pub cluster_shared_volume: ClassName,

    /// Full-name prefix of web application objects
    #[serde(default = "default_web_application_prefix")]
    pub web_application_prefix: String,

    /// Farm class families
    #[serde(default)]
    pub families: ClassFamilyTable,
}

impl Default for ClassesConfig {
    fn default() -> Self {
        Self {
            windows_computer: default_windows_computer(),
            database_engines: default_database_engines(),
            databases: default_databases(),
            cluster: default_cluster(),
            cluster_shared_volume: default_cluster_shared_volume(),
            web_application_prefix: default_web_application_prefix(),
            families: ClassFamilyTable::default(),
        }
    }
}

fn default_management_pack() -> String {
    "System.Library".to_string()
}

fn default_enumeration_prefix() -> String {
    "System.AssetStatus".to_string()
}

fn default_status_property() -> String {
    "AssetStatus".to_string()
}

fn default_server_name_key() -> String {
    "Server".to_string()
}

fn default_version_key() -> String {
    "Version".to_string()
}

fn default_cluster_name_key() -> String {
    "ClusterName".to_string()
}

fn default_windows_computer() -> ClassName {
    ClassName::new("Microsoft.Windows.Computer")
}

fn default_database_engines() -> Vec<ClassName> {
    vec![
        ClassName::new("Microsoft.SQLServer.DBEngine"),
        ClassName::new("Microsoft.SQLServer.Windows.DBEngine"),
    ]
}

fn default_databases() -> Vec<ClassName> {
    vec![
        ClassName::new("Microsoft.SQLServer.Database"),
        ClassName::new("Microsoft.SQLServer.Windows.Database"),
    ]
}

fn default_cluster() -> ClassName {
    ClassName::new("Microsoft.Windows.Cluster")
}

fn default_cluster_shared_volume() -> ClassName {
    ClassName::new("Microsoft.Windows.Server.ClusterSharedVolumeMonitoring.ClusterSharedVolume")
}

fn default_web_application_prefix() -> String {
    "WebApplication_".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory.
    ///
    /// Looks for assetmon.yml or assetmon.yaml and falls back to the built-in
    /// defaults when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!(
            "No {} in {}, using built-in defaults",
            CONFIG_FILE_NAMES[0],
            dir.display()
        );
        Ok(Self::default())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.classes.database_engines.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "classes.database_engines must list at least one class".to_string(),
            });
        }

        if self.classes.families.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "classes.families must list at least one farm class family".to_string(),
            });
        }

        if let Some(name) = &self.default_server {
            if !self.servers.contains_key(name) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "default_server '{}' is not listed under servers",
                        name
                    ),
                });
            }
        }

        for (name, server) in &self.servers {
            if server.snapshot.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("servers.{}.snapshot cannot be empty", name),
                });
            }
        }

        Ok(())
    }

    /// Resolve which management server to connect to.
    ///
    /// `requested` wins over `default_server`. A name that is not configured
    /// is taken as a snapshot path. Returns `None` when neither is available.
    pub fn resolve_server<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Option<(&'a str, Cow<'a, ServerConfig>)> {
        let name = requested.or(self.default_server.as_deref())?;
        match self.servers.get(name) {
            Some(server) => Some((name, Cow::Borrowed(server))),
            None => Some((
                name,
                Cow::Owned(ServerConfig {
                    snapshot: name.to_string(),
                }),
            )),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
