//! Session queries shared by several stages

use crate::context::ResolveContext;
use crate::error::ResolveResult;
use am_core::{ClassDescriptor, ClassName, InfrastructureObject};

/// Descriptors of the classes the schema knows, in request order
pub(crate) async fn class_descriptors(
    ctx: ResolveContext<'_>,
    names: &[ClassName],
) -> ResolveResult<Vec<ClassDescriptor>> {
    let classes = ctx.session.classes_by_name(names).await?;
    if classes.len() < names.len() {
        log::debug!(
            "{} of {} classes not in the management group schema: {:?}",
            names.len() - classes.len(),
            names.len(),
            names
        );
    }
    Ok(classes)
}

/// Single class descriptor, `None` when the schema lacks it
pub(crate) async fn class_descriptor(
    ctx: ResolveContext<'_>,
    name: &ClassName,
) -> ResolveResult<Option<ClassDescriptor>> {
    Ok(class_descriptors(ctx, std::slice::from_ref(name))
        .await?
        .into_iter()
        .next())
}

/// Instances of every class in `names`, class by class
pub(crate) async fn instances_of(
    ctx: ResolveContext<'_>,
    names: &[ClassName],
) -> ResolveResult<Vec<InfrastructureObject>> {
    let mut instances = Vec::new();
    for class in class_descriptors(ctx, names).await? {
        instances.extend(ctx.session.instances_of_class(&class).await?);
    }
    Ok(instances)
}

/// Windows computers hosting `object`
pub(crate) async fn hosting_computers(
    ctx: ResolveContext<'_>,
    object: &InfrastructureObject,
) -> ResolveResult<Vec<InfrastructureObject>> {
    let computer = &ctx.config.classes.windows_computer;
    Ok(ctx
        .session
        .parent_objects(object)
        .await?
        .into_iter()
        .filter(|parent| parent.is_a(computer))
        .collect())
}

/// Case-insensitive substring test
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
