//! Time-windowed performance counter statistics

use crate::context::ResolveContext;
use crate::error::ResolveResult;
use crate::warning::{ResolveWarning, Warnings};
use am_core::{CounterPath, InfrastructureObject, ObjectId, PerfSample, TimeWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of one counter on one object over a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerfStatistics {
    pub object_id: ObjectId,
    pub object: String,
    pub counter: String,
    pub window: TimeWindow,
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub latest: f64,
    pub latest_at: DateTime<Utc>,
}

/// Aggregates of a sample list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub latest: PerfSample,
}

/// Count, min, max, mean and most recent sample. `None` for no samples.
pub fn summarize(samples: &[PerfSample]) -> Option<Summary> {
    let first = samples.first()?;
    let mut summary = Summary {
        count: 0,
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        average: 0.0,
        latest: *first,
    };
    let mut total = 0.0;
    for sample in samples {
        summary.count += 1;
        summary.min = summary.min.min(sample.value);
        summary.max = summary.max.max(sample.value);
        total += sample.value;
        if sample.timestamp >= summary.latest.timestamp {
            summary.latest = *sample;
        }
    }
    summary.average = total / summary.count as f64;
    Some(summary)
}

/// Statistics of `counter` on `object` inside `window`.
///
/// No samples is a warning, not an error, and yields `None`.
pub async fn performance_statistics(
    ctx: ResolveContext<'_>,
    object: &InfrastructureObject,
    counter: &CounterPath,
    window: &TimeWindow,
    warnings: &mut Warnings,
) -> ResolveResult<Option<PerfStatistics>> {
    let samples = ctx
        .session
        .performance_samples(object, counter, window)
        .await?;

    let Some(summary) = summarize(&samples) else {
        warnings.push(ResolveWarning::NoSamples {
            object: object.display_name.clone(),
            counter: counter.to_string(),
        });
        return Ok(None);
    };

    Ok(Some(PerfStatistics {
        object_id: object.id,
        object: object.display_name.clone(),
        counter: counter.to_string(),
        window: *window,
        samples: summary.count,
        min: summary.min,
        max: summary.max,
        average: summary.average,
        latest: summary.latest.value,
        latest_at: summary.latest.timestamp,
    }))
}
