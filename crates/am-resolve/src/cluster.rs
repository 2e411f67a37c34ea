//! Failover cluster expansion for database hosts

use crate::context::ResolveContext;
use crate::error::ResolveResult;
use crate::lookup::{class_descriptor, contains_ignore_case, instances_of};
use crate::warning::{Stage, Warnings};
use am_core::{InfrastructureObject, TargetSet, Traversal};

/// Add the failover cluster, and every node of it, for each host that has a
/// cluster shared volume. Hosts without one are left alone.
///
/// Only ever adds to `targets`, so running it twice yields the same set.
pub async fn expand_clusters(
    ctx: ResolveContext<'_>,
    hosts: &[InfrastructureObject],
    targets: &mut TargetSet,
    warnings: &mut Warnings,
) -> ResolveResult<()> {
    let Some(volume_class) = class_descriptor(ctx, &ctx.config.classes.cluster_shared_volume).await?
    else {
        log::debug!("Cluster shared volume class not in schema, no cluster expansion");
        return Ok(());
    };
    let key = &ctx.config.properties.cluster_name;

    for host in hosts {
        let volumes = ctx
            .session
            .related_objects(host, Some(&volume_class), Traversal::Direct)
            .await?;
        let Some(volume) = volumes.first() else {
            continue;
        };

        let cluster_name = ctx
            .session
            .read_property(volume, key)
            .await?
            .and_then(|v| v.as_text().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty());
        let Some(cluster_name) = cluster_name else {
            warnings.unresolved(
                Stage::Cluster,
                format!(
                    "cluster shared volume on '{}' has no '{}' value",
                    host.display_name, key
                ),
            );
            continue;
        };

        expand_cluster_by_name(ctx, &cluster_name, targets, warnings).await?;
    }
    Ok(())
}

/// Add everything belonging to the cluster called `cluster_name`: the
/// Windows computer objects whose display name contains the name, the
/// cluster object itself and all its Windows computer nodes.
///
/// Matching computers by containment rather than equality picks up the
/// fully-qualified cluster computer name (e.g. `SQLCL01.contoso.com` for
/// cluster `SQLCL01`).
pub async fn expand_cluster_by_name(
    ctx: ResolveContext<'_>,
    cluster_name: &str,
    targets: &mut TargetSet,
    warnings: &mut Warnings,
) -> ResolveResult<()> {
    let classes = &ctx.config.classes;

    let cluster_computers: Vec<_> = instances_of(ctx, std::slice::from_ref(&classes.windows_computer))
        .await?
        .into_iter()
        .filter(|c| contains_ignore_case(&c.display_name, cluster_name))
        .collect();
    targets.extend(cluster_computers);

    let clusters: Vec<_> = instances_of(ctx, std::slice::from_ref(&classes.cluster))
        .await?
        .into_iter()
        .filter(|o| o.display_name.eq_ignore_ascii_case(cluster_name))
        .collect();
    if clusters.is_empty() {
        warnings.unresolved(
            Stage::Cluster,
            format!("cluster object '{}' not found", cluster_name),
        );
        return Ok(());
    }

    for cluster in clusters {
        let nodes: Vec<_> = ctx
            .session
            .related_objects(&cluster, None, Traversal::Recursive)
            .await?
            .into_iter()
            .filter(|o| o.is_a(&classes.windows_computer))
            .collect();
        log::debug!("Cluster '{}' has {} node(s)", cluster.display_name, nodes.len());
        targets.insert(cluster);
        targets.extend(nodes);
    }
    Ok(())
}

#[cfg(test)]
#[path = "cluster_test.rs"]
mod tests;
