//! Farm and object lookup by display name

use crate::chooser::{FarmCandidate, FarmChooser};
use crate::context::ResolveContext;
use crate::error::{ResolveError, ResolveResult};
use crate::lookup::{class_descriptors, instances_of};
use am_core::{ClassDescriptor, ClassName, FarmVersion, InfrastructureObject};

/// A farm instance together with its most-derived class
#[derive(Debug, Clone)]
pub struct LocatedFarm {
    pub object: InfrastructureObject,
    pub class: ClassDescriptor,
    pub version: FarmVersion,
}

impl LocatedFarm {
    fn candidate(&self) -> FarmCandidate {
        FarmCandidate {
            display_name: self.object.display_name.clone(),
            version: self.version,
            id: self.object.id,
        }
    }
}

/// Find farms across every known farm class.
///
/// With no name (or a blank one) every farm is returned. With a name, the
/// farms whose display name equals it: none is [`ResolveError::NotFound`],
/// several are handed to `chooser`, and an empty choice is
/// [`ResolveError::NoSelection`].
pub async fn locate_farms(
    ctx: ResolveContext<'_>,
    name: Option<&str>,
    chooser: &dyn FarmChooser,
) -> ResolveResult<Vec<LocatedFarm>> {
    let farm_classes = ctx.config.classes.families.farm_classes();
    let mut farms = Vec::new();
    for class in class_descriptors(ctx, &farm_classes).await? {
        let version = FarmVersion::from_class_display_name(&class.display_name);
        for object in ctx.session.instances_of_class(&class).await? {
            farms.push(LocatedFarm {
                object,
                class: class.clone(),
                version,
            });
        }
    }

    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        if farms.is_empty() {
            log::warn!(
                "No farms found on management server '{}'",
                ctx.session.server_name()
            );
        }
        return Ok(farms);
    };

    farms.retain(|f| f.object.display_name.eq_ignore_ascii_case(name));
    match farms.len() {
        0 => Err(ResolveError::NotFound {
            kind: "farm".to_string(),
            name: name.to_string(),
        }),
        1 => Ok(farms),
        count => {
            let candidates: Vec<FarmCandidate> = farms.iter().map(LocatedFarm::candidate).collect();
            match chooser.choose(name, &candidates) {
                Some(index) if index < count => {
                    log::debug!("Selected farm {} for '{}'", candidates[index].id, name);
                    Ok(vec![farms.swap_remove(index)])
                }
                _ => Err(ResolveError::NoSelection {
                    name: name.to_string(),
                    count,
                }),
            }
        }
    }
}

/// Find instances of `classes` by display name.
///
/// With no name every instance is returned; with a name, zero matches is
/// [`ResolveError::NotFound`] and every match is returned.
pub async fn locate_by_display_name(
    ctx: ResolveContext<'_>,
    kind: &str,
    classes: &[ClassName],
    name: Option<&str>,
) -> ResolveResult<Vec<InfrastructureObject>> {
    let mut objects = instances_of(ctx, classes).await?;
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(objects);
    };

    objects.retain(|o| o.display_name.eq_ignore_ascii_case(name));
    if objects.is_empty() {
        return Err(ResolveError::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        });
    }
    Ok(objects)
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
