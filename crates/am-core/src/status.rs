//! Asset status enumeration

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a piece of infrastructure.
///
/// Stored as one enumeration value per object in the asset status property.
/// Set by an operator action, never implicitly cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    Deployed,
    DeploymentRequested,
    Disposed,
    Purchased,
    PurchaseRequested,
    Retired,
    Undefined,
}

impl AssetStatus {
    /// Every status in declaration order.
    pub const ALL: [AssetStatus; 7] = [
        AssetStatus::Deployed,
        AssetStatus::DeploymentRequested,
        AssetStatus::Disposed,
        AssetStatus::Purchased,
        AssetStatus::PurchaseRequested,
        AssetStatus::Retired,
        AssetStatus::Undefined,
    ];

    /// Enumeration member name as it appears in the management pack.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Deployed => "Deployed",
            AssetStatus::DeploymentRequested => "DeploymentRequested",
            AssetStatus::Disposed => "Disposed",
            AssetStatus::Purchased => "Purchased",
            AssetStatus::PurchaseRequested => "PurchaseRequested",
            AssetStatus::Retired => "Retired",
            AssetStatus::Undefined => "Undefined",
        }
    }

    /// Full enumeration path under `prefix`, e.g. `System.AssetStatus.Deployed`.
    pub fn enumeration_path(&self, prefix: &str) -> String {
        format!("{}.{}", prefix, self.as_str())
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        AssetStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::InvalidStatus {
                name: s.to_string(),
                expected: AssetStatus::ALL
                    .iter()
                    .map(AssetStatus::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
