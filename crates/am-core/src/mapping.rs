//! SQL Server major version to farm version compatibility table

use crate::FarmVersion;
use serde::{Deserialize, Serialize};

/// One supported (SQL major version, farm version) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingRow {
    /// SQL Server major version, e.g. 12 for SQL Server 2014
    pub sql_version: u32,

    /// Farm version that supports that engine
    pub farm_version: FarmVersion,
}

/// Ordered compatibility table.
///
/// The table is not injective: a SQL major version supports several farm
/// versions and vice versa, so a lookup always tests the *pair*.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqlFarmMapping {
    rows: Vec<MappingRow>,
}

impl SqlFarmMapping {
    /// Build a table from explicit rows.
    pub fn new(rows: Vec<MappingRow>) -> Self {
        Self { rows }
    }

    /// The rows in lookup order.
    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    /// First row matching both observed values.
    pub fn find(&self, sql_version: u32, farm_version: FarmVersion) -> Option<&MappingRow> {
        self.rows
            .iter()
            .find(|row| row.sql_version == sql_version && row.farm_version == farm_version)
    }

    /// True when `(sql_version, farm_version)` is a supported pair.
    pub fn matches(&self, sql_version: u32, farm_version: FarmVersion) -> bool {
        self.find(sql_version, farm_version).is_some()
    }
}

impl Default for SqlFarmMapping {
    fn default() -> Self {
        use FarmVersion::*;
        let pairs = [
            (10, V2010),
            (11, V2010),
            (10, V2013),
            (11, V2013),
            (12, V2013),
            (12, V2016),
            (13, V2016),
            (14, V2016),
            (13, V2019),
            (14, V2019),
            (15, V2019),
        ];
        Self::new(
            pairs
                .into_iter()
                .map(|(sql_version, farm_version)| MappingRow {
                    sql_version,
                    farm_version,
                })
                .collect(),
        )
    }
}

/// Extract the major version from a product version string such as
/// `12.0.6024.0`. Returns `None` when the text before the first `.` is not a
/// number.
pub fn sql_major_version(version: &str) -> Option<u32> {
    version.split('.').next()?.trim().parse().ok()
}
