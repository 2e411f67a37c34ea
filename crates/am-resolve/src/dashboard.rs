//! Monitor state rows for a dashboard widget

use crate::context::ResolveContext;
use crate::error::ResolveResult;
use crate::lookup::{contains_ignore_case, instances_of};
use am_core::{ClassName, HealthState, ObjectId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;

/// One monitor of one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRow {
    pub object_id: ObjectId,
    pub object: String,
    pub monitor: String,
    pub health: HealthState,
    /// When the health last changed; `None` for objects without monitors
    pub since: Option<DateTime<Utc>>,
    pub asset_status: String,
}

/// Build dashboard rows for every instance of `class`, optionally only
/// those whose display name contains `name_filter`.
///
/// Rows are ordered worst health first, then by object and monitor name.
/// An object without monitor states still gets one `Uninitialized` row.
pub async fn dashboard_rows(
    ctx: ResolveContext<'_>,
    class: &ClassName,
    name_filter: Option<&str>,
) -> ResolveResult<Vec<DashboardRow>> {
    let key = &ctx.config.status.property;
    let objects = instances_of(ctx, std::slice::from_ref(class)).await?;

    let mut rows = Vec::new();
    for object in objects {
        if let Some(filter) = name_filter {
            if !contains_ignore_case(&object.display_name, filter) {
                continue;
            }
        }

        let asset_status = ctx
            .session
            .read_property(&object, key)
            .await?
            .map(|v| v.label().to_string())
            .unwrap_or_default();

        let states = ctx.session.monitor_states(&object).await?;
        if states.is_empty() {
            rows.push(DashboardRow {
                object_id: object.id,
                object: object.display_name.clone(),
                monitor: String::new(),
                health: HealthState::Uninitialized,
                since: None,
                asset_status,
            });
            continue;
        }

        for state in states {
            rows.push(DashboardRow {
                object_id: object.id,
                object: object.display_name.clone(),
                monitor: state.monitor,
                health: state.health,
                since: Some(state.last_modified),
                asset_status: asset_status.clone(),
            });
        }
    }

    rows.sort_by(|a, b| {
        (Reverse(a.health), &a.object, &a.monitor).cmp(&(Reverse(b.health), &b.object, &b.monitor))
    });
    Ok(rows)
}
