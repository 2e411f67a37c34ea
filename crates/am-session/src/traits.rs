//! Session trait definition

use crate::error::SessionResult;
use am_core::{
    ClassDescriptor, ClassName, CounterPath, EnumerationValue, InfrastructureObject,
    MonitorState, PerfSample, PropertyValue, TimeWindow, Traversal,
};
use async_trait::async_trait;

/// Narrow view of a management group's object model.
///
/// Every resolution stage receives the session explicitly; there is no
/// process-wide current connection. Implementations must be Send + Sync for
/// async operation, but callers await one call at a time.
#[async_trait]
pub trait ManagementSession: Send + Sync {
    /// Name of the management server this session is bound to
    fn server_name(&self) -> &str;

    /// Look up classes by schema name. Unknown names are omitted.
    async fn classes_by_name(&self, names: &[ClassName]) -> SessionResult<Vec<ClassDescriptor>>;

    /// Instances whose most-derived class is `class`, in enumeration order
    async fn instances_of_class(
        &self,
        class: &ClassDescriptor,
    ) -> SessionResult<Vec<InfrastructureObject>>;

    /// Instances whose display name equals one of `names`
    async fn instances_by_display_name(
        &self,
        names: &[&str],
    ) -> SessionResult<Vec<InfrastructureObject>>;

    /// Objects related to `object`, optionally restricted to one class
    async fn related_objects(
        &self,
        object: &InfrastructureObject,
        class: Option<&ClassDescriptor>,
        traversal: Traversal,
    ) -> SessionResult<Vec<InfrastructureObject>>;

    /// Objects that `object` is directly related to (hosts, containers)
    async fn parent_objects(
        &self,
        object: &InfrastructureObject,
    ) -> SessionResult<Vec<InfrastructureObject>>;

    /// Read a property. `None` when the object does not declare it.
    async fn read_property(
        &self,
        object: &InfrastructureObject,
        key: &str,
    ) -> SessionResult<Option<PropertyValue>>;

    /// Overwrite a declared property and commit the change
    async fn write_property(
        &self,
        object: &InfrastructureObject,
        key: &str,
        value: PropertyValue,
    ) -> SessionResult<()>;

    /// Find an enumeration value defined by a management pack
    async fn lookup_enumeration(
        &self,
        management_pack: &str,
        path: &str,
    ) -> SessionResult<Option<EnumerationValue>>;

    /// Current state of every monitor targeting `object`
    async fn monitor_states(&self, object: &InfrastructureObject)
        -> SessionResult<Vec<MonitorState>>;

    /// Samples of one counter collected inside `window`, oldest first
    async fn performance_samples(
        &self,
        object: &InfrastructureObject,
        counter: &CounterPath,
        window: &TimeWindow,
    ) -> SessionResult<Vec<PerfSample>>;
}
