//! Farm → application servers → hosting computers → web applications

use crate::context::ResolveContext;
use crate::error::ResolveResult;
use crate::locator::LocatedFarm;
use crate::lookup::{class_descriptor, hosting_computers};
use crate::warning::{Stage, Warnings};
use am_core::{ClassFamily, InfrastructureObject, TargetSet, Traversal};
use std::collections::HashSet;

/// Expand a farm to the computers hosting its servers and the web
/// applications on those computers, adding both to `targets`.
///
/// Returns the hosting computers, deduplicated by display name.
pub async fn walk_topology(
    ctx: ResolveContext<'_>,
    farm: &LocatedFarm,
    family: &ClassFamily,
    targets: &mut TargetSet,
    warnings: &mut Warnings,
) -> ResolveResult<Vec<InfrastructureObject>> {
    let Some(server_class) = class_descriptor(ctx, &family.server).await? else {
        warnings.unresolved(
            Stage::Topology,
            format!("server class '{}' is not in the schema", family.server),
        );
        return Ok(Vec::new());
    };

    let servers = ctx
        .session
        .related_objects(&farm.object, Some(&server_class), Traversal::Recursive)
        .await?;
    log::debug!(
        "Farm '{}' has {} server(s)",
        farm.object.display_name,
        servers.len()
    );

    let mut seen_names = HashSet::new();
    let mut computers = Vec::new();
    for server in &servers {
        for computer in hosting_computers(ctx, server).await? {
            if seen_names.insert(computer.display_name.to_lowercase()) {
                computers.push(computer);
            }
        }
    }
    targets.extend(computers.iter().cloned());

    let prefix = &ctx.config.classes.web_application_prefix;
    for computer in &computers {
        let web_apps: Vec<_> = ctx
            .session
            .related_objects(computer, None, Traversal::Direct)
            .await?
            .into_iter()
            .filter(|o| o.full_name.starts_with(prefix.as_str()))
            .collect();
        log::debug!(
            "Computer '{}' hosts {} web application(s)",
            computer.display_name,
            web_apps.len()
        );
        targets.extend(web_apps);
    }

    Ok(computers)
}

#[cfg(test)]
#[path = "topology_test.rs"]
mod tests;
