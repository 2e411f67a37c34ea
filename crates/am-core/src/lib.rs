//! am-core - Core library for assetmon
//!
//! This crate provides the shared object-model types, the asset status
//! enumeration, farm version detection, the SQL-to-farm version mapping,
//! the class family table and configuration parsing used across all
//! assetmon components.

pub mod class_name;
pub mod config;
pub mod error;
pub mod family;
pub mod mapping;
mod newtype_string;
pub mod object;
pub mod status;
pub mod target_set;
pub mod telemetry;
pub mod version;

pub use class_name::ClassName;
pub use config::{ClassesConfig, Config, PropertyKeys, ServerConfig, StatusConfig};
pub use error::{CoreError, CoreResult};
pub use family::{ClassFamily, ClassFamilyTable};
pub use mapping::{MappingRow, SqlFarmMapping};
pub use object::{
    ClassDescriptor, EnumerationValue, InfrastructureObject, ObjectId, PropertyValue, Traversal,
};
pub use status::AssetStatus;
pub use target_set::TargetSet;
pub use telemetry::{CounterPath, HealthState, MonitorState, PerfSample, TimeWindow};
pub use version::FarmVersion;
