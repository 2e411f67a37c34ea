//! Locate the database engine behind a farm's configuration database
//!
//! The configuration object names its database server. An engine whose
//! display name contains that server name is accepted as is. Failing that,
//! databases named after the farm are walked up to their engines and the
//! first engine whose SQL major version is supported by the farm version
//! wins. Candidates are visited in object id order so the outcome does not
//! depend on the order the management server enumerates them in.

use crate::context::ResolveContext;
use crate::error::ResolveResult;
use crate::locator::LocatedFarm;
use crate::lookup::{class_descriptor, contains_ignore_case, hosting_computers, instances_of};
use crate::warning::{Stage, Warnings};
use am_core::mapping::sql_major_version;
use am_core::{ClassFamily, InfrastructureObject, TargetSet, Traversal};

/// Resolve the database engine(s) of a farm and return the Windows
/// computers hosting them, deduplicated by identity.
///
/// Returns an empty list with an [`UnresolvedDependency`] warning when no
/// engine can be found by either path.
///
/// [`UnresolvedDependency`]: crate::ResolveWarning::UnresolvedDependency
pub async fn resolve_database_hosts(
    ctx: ResolveContext<'_>,
    farm: &LocatedFarm,
    family: &ClassFamily,
    warnings: &mut Warnings,
) -> ResolveResult<Vec<InfrastructureObject>> {
    let mut engines = match configured_server_name(ctx, farm, family).await? {
        Some(server) => engines_by_server_name(ctx, &server).await?,
        None => Vec::new(),
    };

    if engines.is_empty() {
        engines.extend(engine_by_version(ctx, farm).await?);
    }

    if engines.is_empty() {
        warnings.unresolved(
            Stage::Database,
            format!(
                "no database engine found for farm '{}'",
                farm.object.display_name
            ),
        );
        return Ok(Vec::new());
    }

    let mut hosts = TargetSet::new();
    for engine in &engines {
        let computers = hosting_computers(ctx, engine).await?;
        if computers.is_empty() {
            warnings.unresolved(
                Stage::Database,
                format!("database engine '{}' has no hosting computer", engine.display_name),
            );
        }
        hosts.extend(computers);
    }
    Ok(hosts.as_slice().to_vec())
}

/// Server name recorded on the farm's configuration database object
async fn configured_server_name(
    ctx: ResolveContext<'_>,
    farm: &LocatedFarm,
    family: &ClassFamily,
) -> ResolveResult<Option<String>> {
    let Some(config_class) = class_descriptor(ctx, &family.configuration).await? else {
        return Ok(None);
    };
    let Some(config_object) = ctx
        .session
        .related_objects(&farm.object, Some(&config_class), Traversal::Recursive)
        .await?
        .into_iter()
        .next()
    else {
        log::debug!(
            "Farm '{}' has no configuration database object",
            farm.object.display_name
        );
        return Ok(None);
    };

    let key = &ctx.config.properties.server_name;
    let server = ctx
        .session
        .read_property(&config_object, key)
        .await?
        .and_then(|v| v.as_text().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());
    if server.is_none() {
        log::debug!(
            "Configuration object '{}' has no '{}' value",
            config_object.display_name,
            key
        );
    }
    Ok(server)
}

/// Engines whose display name contains `server`
async fn engines_by_server_name(
    ctx: ResolveContext<'_>,
    server: &str,
) -> ResolveResult<Vec<InfrastructureObject>> {
    let engines: Vec<_> = instances_of(ctx, &ctx.config.classes.database_engines)
        .await?
        .into_iter()
        .filter(|e| contains_ignore_case(&e.display_name, server))
        .collect();
    log::debug!(
        "{} database engine(s) match server name '{}'",
        engines.len(),
        server
    );
    Ok(engines)
}

/// First engine hosting a database named after the farm whose SQL major
/// version is supported by the farm version
async fn engine_by_version(
    ctx: ResolveContext<'_>,
    farm: &LocatedFarm,
) -> ResolveResult<Option<InfrastructureObject>> {
    let classes = &ctx.config.classes;
    let mapping = &ctx.config.sql_farm_mapping;
    let version_key = &ctx.config.properties.version;

    let mut databases: Vec<_> = instances_of(ctx, &classes.databases)
        .await?
        .into_iter()
        .filter(|db| db.display_name.eq_ignore_ascii_case(&farm.object.display_name))
        .collect();
    databases.sort_by_key(|db| db.id);

    for database in &databases {
        let mut engines: Vec<_> = ctx
            .session
            .parent_objects(database)
            .await?
            .into_iter()
            .filter(|p| p.is_any_of(&classes.database_engines))
            .collect();
        engines.sort_by_key(|e| e.id);

        for engine in engines {
            let version = ctx.session.read_property(&engine, version_key).await?;
            let Some(sql_version) = version
                .as_ref()
                .and_then(|v| v.as_text())
                .and_then(sql_major_version)
            else {
                log::debug!("Engine '{}' has no usable version", engine.display_name);
                continue;
            };

            if mapping.matches(sql_version, farm.version) {
                log::debug!(
                    "Engine '{}' (SQL {}) matches farm version {}",
                    engine.display_name,
                    sql_version,
                    farm.version
                );
                return Ok(Some(engine));
            }
            log::debug!(
                "Engine '{}' (SQL {}) does not support farm version {}",
                engine.display_name,
                sql_version,
                farm.version
            );
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "database_test.rs"]
mod tests;
