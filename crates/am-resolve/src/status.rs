//! Apply or read the asset status of a target set

use crate::context::ResolveContext;
use crate::error::{ResolveError, ResolveResult};
use crate::warning::{ResolveWarning, Warnings};
use am_core::{AssetStatus, InfrastructureObject, ObjectId, PropertyValue, TargetSet};
use serde::Serialize;

/// Outcome of one apply run
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub status: AssetStatus,
    pub updated: Vec<InfrastructureObject>,
    pub skipped: Vec<InfrastructureObject>,
    pub failed: Vec<InfrastructureObject>,
}

/// Asset status of one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub id: ObjectId,
    pub display_name: String,
    pub class_name: String,
    pub status: String,
}

/// Write `status` to every object in `targets` that declares the asset
/// status property.
///
/// Each object is written and committed on its own. Objects without the
/// property are skipped and a failed write does not stop the rest; both are
/// reported as warnings. Nothing is rolled back.
pub async fn apply_status(
    ctx: ResolveContext<'_>,
    targets: &TargetSet,
    status: AssetStatus,
    warnings: &mut Warnings,
) -> ResolveResult<ApplyReport> {
    let status_config = &ctx.config.status;
    let path = status.enumeration_path(&status_config.enumeration_prefix);
    let value = ctx
        .session
        .lookup_enumeration(&status_config.management_pack, &path)
        .await?
        .ok_or_else(|| ResolveError::UnknownEnumeration {
            management_pack: status_config.management_pack.clone(),
            path: path.clone(),
        })?;

    let key = &status_config.property;
    let mut report = ApplyReport {
        status,
        updated: Vec::new(),
        skipped: Vec::new(),
        failed: Vec::new(),
    };

    for object in targets {
        match ctx.session.read_property(object, key).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warnings.push(ResolveWarning::MissingProperty {
                    object: object.display_name.clone(),
                    property: key.clone(),
                });
                report.skipped.push(object.clone());
                continue;
            }
            Err(e) => {
                warnings.push(ResolveWarning::WriteFailed {
                    object: object.display_name.clone(),
                    reason: e.to_string(),
                });
                report.failed.push(object.clone());
                continue;
            }
        }

        match ctx
            .session
            .write_property(object, key, PropertyValue::Enumeration(value.clone()))
            .await
        {
            Ok(()) => {
                log::info!("Set {} on '{}'", status, object.display_name);
                report.updated.push(object.clone());
            }
            Err(e) => {
                warnings.push(ResolveWarning::WriteFailed {
                    object: object.display_name.clone(),
                    reason: e.to_string(),
                });
                report.failed.push(object.clone());
            }
        }
    }

    Ok(report)
}

/// Read the asset status of every object in `targets` that declares it.
pub async fn read_status(
    ctx: ResolveContext<'_>,
    targets: &TargetSet,
    warnings: &mut Warnings,
) -> ResolveResult<Vec<StatusRow>> {
    let key = &ctx.config.status.property;
    let mut rows = Vec::with_capacity(targets.len());

    for object in targets {
        match ctx.session.read_property(object, key).await? {
            Some(value) => rows.push(StatusRow {
                id: object.id,
                display_name: object.display_name.clone(),
                class_name: object.class_name.to_string(),
                status: value.label().to_string(),
            }),
            None => warnings.push(ResolveWarning::MissingProperty {
                object: object.display_name.clone(),
                property: key.clone(),
            }),
        }
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
