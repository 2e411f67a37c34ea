//! Relationship traversal shared by the backends

use crate::error::SessionResult;
use am_core::{ClassDescriptor, InfrastructureObject, ObjectId, Traversal};
use std::collections::{HashSet, VecDeque};

/// Expand `start` through `children`, breadth first.
///
/// `Direct` returns the children of `start`; `Recursive` returns every
/// object reachable from it. Each object is returned once, `start` never.
/// Cycles in the relationship data terminate.
pub(crate) fn walk<F>(
    start: &InfrastructureObject,
    class: Option<&ClassDescriptor>,
    traversal: Traversal,
    mut children: F,
) -> SessionResult<Vec<InfrastructureObject>>
where
    F: FnMut(ObjectId) -> SessionResult<Vec<InfrastructureObject>>,
{
    let mut seen: HashSet<ObjectId> = HashSet::from([start.id]);
    let mut queue: VecDeque<ObjectId> = VecDeque::from([start.id]);
    let mut found = Vec::new();

    while let Some(id) = queue.pop_front() {
        for child in children(id)? {
            if !seen.insert(child.id) {
                continue;
            }
            if traversal == Traversal::Recursive {
                queue.push_back(child.id);
            }
            found.push(child);
        }
    }

    if let Some(class) = class {
        found.retain(|o| o.is_a(&class.name));
    }
    Ok(found)
}
