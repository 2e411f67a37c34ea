//! Ordered set of objects a status operation reads or writes

use crate::{InfrastructureObject, ObjectId};
use std::collections::HashSet;

/// Objects accumulated across the resolution stages.
///
/// Insertion order is preserved. Re-inserting an object that is already
/// present (by identity) is accepted and ignored.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    objects: Vec<InfrastructureObject>,
    seen: HashSet<ObjectId>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning `true` if it was not present yet.
    pub fn insert(&mut self, object: InfrastructureObject) -> bool {
        if !self.seen.insert(object.id) {
            return false;
        }
        self.objects.push(object);
        true
    }

    /// Add several objects, returning how many were new.
    pub fn extend<I>(&mut self, objects: I) -> usize
    where
        I: IntoIterator<Item = InfrastructureObject>,
    {
        objects
            .into_iter()
            .map(|o| self.insert(o))
            .filter(|added| *added)
            .count()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InfrastructureObject> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[InfrastructureObject] {
        &self.objects
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a InfrastructureObject;
    type IntoIter = std::slice::Iter<'a, InfrastructureObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
