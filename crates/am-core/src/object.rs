//! Object model types shared by every session backend

use crate::ClassName;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of an object in the management group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Wrap an existing identifier.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated text form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Return the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transient reference to a monitored object owned by the management group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureObject {
    /// Object identity
    pub id: ObjectId,

    /// Most-derived class of the object
    pub class_name: ClassName,

    /// Display name shown in the console
    pub display_name: String,

    /// Fully-qualified name (class-qualified key path)
    pub full_name: String,
}

impl InfrastructureObject {
    /// True when the object's most-derived class is `class`.
    pub fn is_a(&self, class: &ClassName) -> bool {
        self.class_name.eq_ignore_case(class)
    }

    /// True when the object's most-derived class is any of `classes`.
    pub fn is_any_of(&self, classes: &[ClassName]) -> bool {
        classes.iter().any(|c| self.is_a(c))
    }
}

/// A class in the management group schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Class identity
    pub id: Uuid,

    /// Schema name
    pub name: ClassName,

    /// Human readable name, e.g. `SharePoint 2013 Farm`
    pub display_name: String,
}

/// Relationship traversal depth for related object queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Direct children only
    Direct,
    /// Transitive closure of the relationship
    Recursive,
}

/// A value of an enumeration defined in a management pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationValue {
    /// Management pack that defines the enumeration
    pub management_pack: String,

    /// Dotted path of the value, e.g. `System.AssetStatus.Deployed`
    pub path: String,

    /// Human readable label
    pub display_name: String,
}

/// The value of a declared property on an object.
///
/// A property that the object's class does not declare is represented by
/// `None` at the session boundary, never by a `PropertyValue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    /// Declared but never set
    Unset,
    /// Plain text value
    Text(String),
    /// Enumeration value
    Enumeration(EnumerationValue),
}

impl PropertyValue {
    /// Text content of the value, if it has any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Human readable label: enumeration display name, text, or empty.
    pub fn label(&self) -> &str {
        match self {
            PropertyValue::Unset => "",
            PropertyValue::Text(s) => s,
            PropertyValue::Enumeration(e) => &e.display_name,
        }
    }
}
