//! Strongly-typed management pack class name.

use crate::newtype_string::define_schema_name;

define_schema_name! {
    /// Name of a class in the management group schema, e.g.
    /// `Microsoft.Windows.Computer`.
    ///
    /// Prevents accidental mixing of class names with display names or
    /// property keys.
    pub struct ClassName;
}
