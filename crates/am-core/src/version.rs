//! Farm version detection

use crate::error::CoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Product version of an application farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FarmVersion {
    V2010,
    V2013,
    V2016,
    V2019,
    /// A version year outside the supported set
    Unknown,
}

static FARM_CLASS_RE: OnceLock<Regex> = OnceLock::new();

impl FarmVersion {
    /// Map a release year to a version.
    pub fn from_year(year: u16) -> Self {
        match year {
            2010 => FarmVersion::V2010,
            2013 => FarmVersion::V2013,
            2016 => FarmVersion::V2016,
            2019 => FarmVersion::V2019,
            _ => FarmVersion::Unknown,
        }
    }

    /// Release year, `None` for [`FarmVersion::Unknown`].
    pub fn year(&self) -> Option<u16> {
        match self {
            FarmVersion::V2010 => Some(2010),
            FarmVersion::V2013 => Some(2013),
            FarmVersion::V2016 => Some(2016),
            FarmVersion::V2019 => Some(2019),
            FarmVersion::Unknown => None,
        }
    }

    /// Derive the version from a farm class display name such as
    /// `SharePoint 2013 Farm`.
    ///
    /// Display names that do not follow the pattern fall back to the oldest
    /// version, 2010. A well-formed name carrying an unsupported year yields
    /// [`FarmVersion::Unknown`].
    pub fn from_class_display_name(display_name: &str) -> Self {
        let re = FARM_CLASS_RE
            .get_or_init(|| Regex::new(r"SharePoint (\d{4}) Farm").expect("valid regex literal"));
        re.captures(display_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u16>().ok())
            .map(FarmVersion::from_year)
            .unwrap_or(FarmVersion::V2010)
    }
}

impl fmt::Display for FarmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year() {
            Some(year) => write!(f, "{}", year),
            None => write!(f, "unknown"),
        }
    }
}

impl TryFrom<u16> for FarmVersion {
    type Error = CoreError;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        match FarmVersion::from_year(year) {
            FarmVersion::Unknown => Err(CoreError::InvalidFarmVersion {
                value: year.to_string(),
            }),
            v => Ok(v),
        }
    }
}

impl From<FarmVersion> for u16 {
    fn from(v: FarmVersion) -> u16 {
        v.year().unwrap_or(0)
    }
}
