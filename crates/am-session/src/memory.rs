//! In-memory object graph for tests
//!
//! Objects enumerate in insertion order, which stands in for the
//! management server's unspecified enumeration order. Writes can be made to
//! fail per object to exercise partial-failure handling.

use crate::error::{SessionError, SessionResult};
use crate::traits::ManagementSession;
use crate::traversal;
use am_core::{
    ClassDescriptor, ClassName, CounterPath, EnumerationValue, InfrastructureObject,
    MonitorState, ObjectId, PerfSample, PropertyValue, TimeWindow, Traversal,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct GraphState {
    classes: Vec<ClassDescriptor>,
    objects: Vec<InfrastructureObject>,
    edges: Vec<(ObjectId, ObjectId)>,
    properties: HashMap<(ObjectId, String), PropertyValue>,
    enumerations: Vec<EnumerationValue>,
    monitors: HashMap<ObjectId, Vec<MonitorState>>,
    samples: Vec<(ObjectId, CounterPath, PerfSample)>,
    failing_writes: HashSet<ObjectId>,
    writes: usize,
}

impl GraphState {
    fn object(&self, id: ObjectId) -> Option<&InfrastructureObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn children(&self, id: ObjectId) -> Vec<InfrastructureObject> {
        self.edges
            .iter()
            .filter(|(source, _)| *source == id)
            .filter_map(|(_, target)| self.object(*target).cloned())
            .collect()
    }
}

/// In-memory management group
pub struct MemoryGraph {
    server_name: String,
    state: Mutex<GraphState>,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl MemoryGraph {
    pub fn new(server_name: &str) -> Self {
        Self {
            server_name: server_name.to_string(),
            state: Mutex::new(GraphState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, GraphState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn try_state(&self) -> SessionResult<MutexGuard<'_, GraphState>> {
        self.state
            .lock()
            .map_err(|e| SessionError::MutexPoisoned(e.to_string()))
    }

    /// Register a class
    pub fn add_class(&self, name: &str, display_name: &str) -> ClassDescriptor {
        let class = ClassDescriptor {
            id: Uuid::new_v4(),
            name: ClassName::new(name),
            display_name: display_name.to_string(),
        };
        self.state().classes.push(class.clone());
        class
    }

    /// Add an object with a random identity
    pub fn add_object(&self, class: &str, display_name: &str) -> InfrastructureObject {
        self.add_object_with_id(ObjectId::random(), class, display_name, display_name)
    }

    /// Add an object with an explicit identity and full name
    pub fn add_object_with_id(
        &self,
        id: ObjectId,
        class: &str,
        display_name: &str,
        full_name: &str,
    ) -> InfrastructureObject {
        let object = InfrastructureObject {
            id,
            class_name: ClassName::new(class),
            display_name: display_name.to_string(),
            full_name: full_name.to_string(),
        };
        self.state().objects.push(object.clone());
        object
    }

    /// Record that `source` hosts or contains `target`
    pub fn relate(&self, source: &InfrastructureObject, target: &InfrastructureObject) {
        self.state().edges.push((source.id, target.id));
    }

    /// Declare a property with an initial value
    pub fn set_property(&self, object: &InfrastructureObject, key: &str, value: PropertyValue) {
        self.state()
            .properties
            .insert((object.id, key.to_ascii_lowercase()), value);
    }

    pub fn add_enumeration(&self, management_pack: &str, path: &str, display_name: &str) {
        self.state().enumerations.push(EnumerationValue {
            management_pack: management_pack.to_string(),
            path: path.to_string(),
            display_name: display_name.to_string(),
        });
    }

    pub fn add_monitor_state(&self, object: &InfrastructureObject, state: MonitorState) {
        self.state().monitors.entry(object.id).or_default().push(state);
    }

    pub fn add_perf_sample(
        &self,
        object: &InfrastructureObject,
        counter: &CounterPath,
        sample: PerfSample,
    ) {
        self.state()
            .samples
            .push((object.id, counter.clone(), sample));
    }

    /// Make every write to `object` fail
    pub fn fail_writes_to(&self, object: &InfrastructureObject) {
        self.state().failing_writes.insert(object.id);
    }

    /// Number of successful property writes so far
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    /// Current value of a property, bypassing the session API
    pub fn property(&self, object: &InfrastructureObject, key: &str) -> Option<PropertyValue> {
        self.state()
            .properties
            .get(&(object.id, key.to_ascii_lowercase()))
            .cloned()
    }
}

#[async_trait]
impl ManagementSession for MemoryGraph {
    fn server_name(&self) -> &str {
        &self.server_name
    }

    async fn classes_by_name(&self, names: &[ClassName]) -> SessionResult<Vec<ClassDescriptor>> {
        let state = self.try_state()?;
        Ok(names
            .iter()
            .filter_map(|n| state.classes.iter().find(|c| c.name.eq_ignore_case(n)))
            .cloned()
            .collect())
    }

    async fn instances_of_class(
        &self,
        class: &ClassDescriptor,
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let state = self.try_state()?;
        Ok(state
            .objects
            .iter()
            .filter(|o| o.is_a(&class.name))
            .cloned()
            .collect())
    }

    async fn instances_by_display_name(
        &self,
        names: &[&str],
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let state = self.try_state()?;
        let objects = &state.objects;
        Ok(names
            .iter()
            .flat_map(|n| objects.iter().filter(move |o| o.display_name == *n))
            .cloned()
            .collect())
    }

    async fn related_objects(
        &self,
        object: &InfrastructureObject,
        class: Option<&ClassDescriptor>,
        traversal: Traversal,
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let state = self.try_state()?;
        traversal::walk(object, class, traversal, |id| Ok(state.children(id)))
    }

    async fn parent_objects(
        &self,
        object: &InfrastructureObject,
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let state = self.try_state()?;
        Ok(state
            .edges
            .iter()
            .filter(|(_, target)| *target == object.id)
            .filter_map(|(source, _)| state.object(*source).cloned())
            .collect())
    }

    async fn read_property(
        &self,
        object: &InfrastructureObject,
        key: &str,
    ) -> SessionResult<Option<PropertyValue>> {
        let state = self.try_state()?;
        Ok(state
            .properties
            .get(&(object.id, key.to_ascii_lowercase()))
            .cloned())
    }

    async fn write_property(
        &self,
        object: &InfrastructureObject,
        key: &str,
        value: PropertyValue,
    ) -> SessionResult<()> {
        let mut state = self.try_state()?;
        if state.failing_writes.contains(&object.id) {
            return Err(SessionError::WriteRejected {
                object: object.display_name.clone(),
                reason: "injected failure".to_string(),
            });
        }
        let slot = state
            .properties
            .get_mut(&(object.id, key.to_ascii_lowercase()))
            .ok_or_else(|| SessionError::PropertyNotDeclared {
                object: object.display_name.clone(),
                key: key.to_string(),
            })?;
        *slot = value;
        state.writes += 1;
        Ok(())
    }

    async fn lookup_enumeration(
        &self,
        management_pack: &str,
        path: &str,
    ) -> SessionResult<Option<EnumerationValue>> {
        let state = self.try_state()?;
        Ok(state
            .enumerations
            .iter()
            .find(|e| e.management_pack == management_pack && e.path == path)
            .cloned())
    }

    async fn monitor_states(
        &self,
        object: &InfrastructureObject,
    ) -> SessionResult<Vec<MonitorState>> {
        let state = self.try_state()?;
        Ok(state.monitors.get(&object.id).cloned().unwrap_or_default())
    }

    async fn performance_samples(
        &self,
        object: &InfrastructureObject,
        counter: &CounterPath,
        window: &TimeWindow,
    ) -> SessionResult<Vec<PerfSample>> {
        let state = self.try_state()?;
        let mut samples: Vec<PerfSample> = state
            .samples
            .iter()
            .filter(|(id, path, sample)| {
                *id == object.id
                    && path.object == counter.object
                    && path.counter == counter.counter
                    && (counter.instance.is_none() || path.instance == counter.instance)
                    && window.contains(sample.timestamp)
            })
            .map(|(_, _, sample)| *sample)
            .collect();
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }
}
