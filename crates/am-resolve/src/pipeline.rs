//! Target resolution per kind of root object

use crate::chooser::FarmChooser;
use crate::cluster::{expand_cluster_by_name, expand_clusters};
use crate::context::ResolveContext;
use crate::database::resolve_database_hosts;
use crate::error::ResolveResult;
use crate::locator::{locate_by_display_name, locate_farms, LocatedFarm};
use crate::lookup::hosting_computers;
use crate::topology::walk_topology;
use crate::warning::{Stage, Warnings};
use am_core::{FarmVersion, InfrastructureObject, TargetSet};
use std::fmt;

/// What kind of object the operator named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Farm,
    Computer,
    Database,
    Cluster,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Farm => write!(f, "farm"),
            TargetKind::Computer => write!(f, "computer"),
            TargetKind::Database => write!(f, "database engine"),
            TargetKind::Cluster => write!(f, "cluster"),
        }
    }
}

/// Everything resolved for one root object
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The object the operator named
    pub root: InfrastructureObject,

    /// Farm version, for farm roots
    pub version: Option<FarmVersion>,

    /// Objects to read or write, root first
    pub targets: TargetSet,

    pub warnings: Warnings,
}

impl Resolution {
    fn new(root: InfrastructureObject) -> Self {
        let mut targets = TargetSet::new();
        targets.insert(root.clone());
        Self {
            root,
            version: None,
            targets,
            warnings: Warnings::default(),
        }
    }
}

/// Resolve a farm to its full target set: the farm, its servers' hosting
/// computers, their web applications, the database host(s) and any
/// failover cluster behind them.
pub async fn resolve_farm(ctx: ResolveContext<'_>, farm: &LocatedFarm) -> ResolveResult<Resolution> {
    let mut resolution = Resolution::new(farm.object.clone());
    resolution.version = Some(farm.version);
    let Resolution {
        targets, warnings, ..
    } = &mut resolution;

    let Some(family) = ctx.config.classes.families.for_farm(&farm.class.name) else {
        warnings.unresolved(
            Stage::Farm,
            format!("no class family configured for farm class '{}'", farm.class.name),
        );
        return Ok(resolution);
    };

    walk_topology(ctx, farm, family, targets, warnings).await?;
    let db_hosts = resolve_database_hosts(ctx, farm, family, warnings).await?;
    targets.extend(db_hosts.iter().cloned());
    expand_clusters(ctx, &db_hosts, targets, warnings).await?;

    log::debug!(
        "Farm '{}' resolved to {} object(s)",
        farm.object.display_name,
        targets.len()
    );
    Ok(resolution)
}

/// Resolve every root object of `kind` named `name` (all of them when no
/// name is given), each with fresh state.
pub async fn resolve_targets(
    ctx: ResolveContext<'_>,
    kind: TargetKind,
    name: Option<&str>,
    chooser: &dyn FarmChooser,
) -> ResolveResult<Vec<Resolution>> {
    let classes = &ctx.config.classes;
    let mut resolutions = Vec::new();

    match kind {
        TargetKind::Farm => {
            for farm in locate_farms(ctx, name, chooser).await? {
                resolutions.push(resolve_farm(ctx, &farm).await?);
            }
        }
        TargetKind::Computer => {
            let computers = locate_by_display_name(
                ctx,
                "computer",
                std::slice::from_ref(&classes.windows_computer),
                name,
            )
            .await?;
            resolutions.extend(computers.into_iter().map(Resolution::new));
        }
        TargetKind::Database => {
            let engines =
                locate_by_display_name(ctx, "database engine", &classes.database_engines, name)
                    .await?;
            for engine in engines {
                let mut resolution = Resolution::new(engine);
                let hosts = hosting_computers(ctx, &resolution.root).await?;
                if hosts.is_empty() {
                    resolution.warnings.unresolved(
                        Stage::Database,
                        format!(
                            "database engine '{}' has no hosting computer",
                            resolution.root.display_name
                        ),
                    );
                }
                resolution.targets.extend(hosts.iter().cloned());
                expand_clusters(ctx, &hosts, &mut resolution.targets, &mut resolution.warnings)
                    .await?;
                resolutions.push(resolution);
            }
        }
        TargetKind::Cluster => {
            let clusters =
                locate_by_display_name(ctx, "cluster", std::slice::from_ref(&classes.cluster), name)
                    .await?;
            for cluster in clusters {
                let mut resolution = Resolution::new(cluster);
                let cluster_name = resolution.root.display_name.clone();
                expand_cluster_by_name(
                    ctx,
                    &cluster_name,
                    &mut resolution.targets,
                    &mut resolution.warnings,
                )
                .await?;
                resolutions.push(resolution);
            }
        }
    }

    Ok(resolutions)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
