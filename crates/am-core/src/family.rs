//! Farm class families
//!
//! Every farm schema generation ships a farm class together with sibling
//! classes for its application servers and its configuration database. The
//! siblings are listed explicitly here instead of being derived from the farm
//! class name, so supporting a new schema generation is a config change.

use crate::ClassName;
use serde::{Deserialize, Serialize};

/// Farm class and its sibling classes from one schema generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassFamily {
    /// Farm class
    pub farm: ClassName,

    /// Application server class related to the farm
    pub server: ClassName,

    /// Configuration database class related to the farm
    pub configuration: ClassName,
}

impl ClassFamily {
    pub fn new(farm: &str, server: &str, configuration: &str) -> Self {
        Self {
            farm: ClassName::new(farm),
            server: ClassName::new(server),
            configuration: ClassName::new(configuration),
        }
    }
}

/// Lookup table of class families keyed by farm class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassFamilyTable {
    families: Vec<ClassFamily>,
}

impl ClassFamilyTable {
    /// Build a table from explicit families.
    pub fn new(families: Vec<ClassFamily>) -> Self {
        Self { families }
    }

    /// Every known farm class, in table order.
    pub fn farm_classes(&self) -> Vec<ClassName> {
        self.families.iter().map(|f| f.farm.clone()).collect()
    }

    /// Family whose farm class is `farm_class`.
    pub fn for_farm(&self, farm_class: &ClassName) -> Option<&ClassFamily> {
        self.families
            .iter()
            .find(|f| f.farm.eq_ignore_case(farm_class))
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl Default for ClassFamilyTable {
    fn default() -> Self {
        Self::new(vec![
            ClassFamily::new(
                "Microsoft.SharePoint.Foundation.2010.SPFarm",
                "Microsoft.SharePoint.Foundation.2010.SPServer",
                "Microsoft.SharePoint.Foundation.2010.SPConfigurationDatabase",
            ),
            ClassFamily::new(
                "Microsoft.SharePoint.Foundation.2013.SPFarm",
                "Microsoft.SharePoint.Foundation.2013.SPServer",
                "Microsoft.SharePoint.Foundation.2013.SPConfigurationDatabase",
            ),
            ClassFamily::new(
                "Microsoft.SharePoint.Server.SPFarm",
                "Microsoft.SharePoint.Server.SPServer",
                "Microsoft.SharePoint.Server.SPConfigurationDatabase",
            ),
        ])
    }
}
