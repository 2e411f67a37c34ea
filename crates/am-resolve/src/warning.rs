//! Recoverable conditions surfaced to the operator

use std::fmt;

/// Resolution stage that raised a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Farm,
    Topology,
    Database,
    Cluster,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Farm => write!(f, "farm"),
            Stage::Topology => write!(f, "topology"),
            Stage::Database => write!(f, "database"),
            Stage::Cluster => write!(f, "cluster"),
        }
    }
}

/// A condition that was logged and skipped rather than aborting the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// W001: The object does not declare the asset status property
    MissingProperty { object: String, property: String },

    /// W002: A stage could not resolve its dependency and was skipped
    UnresolvedDependency { stage: Stage, detail: String },

    /// W003: Reading or writing one object failed; the rest continue
    WriteFailed { object: String, reason: String },

    /// W004: A counter had no samples in the requested window
    NoSamples { object: String, counter: String },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::MissingProperty { object, property } => write!(
                f,
                "[W001] '{}' has no '{}' property, skipped",
                object, property
            ),
            ResolveWarning::UnresolvedDependency { stage, detail } => {
                write!(f, "[W002] {} stage skipped: {}", stage, detail)
            }
            ResolveWarning::WriteFailed { object, reason } => {
                write!(f, "[W003] Could not update '{}': {}", object, reason)
            }
            ResolveWarning::NoSamples { object, counter } => write!(
                f,
                "[W004] No samples of {} on '{}' in the requested window",
                counter, object
            ),
        }
    }
}

/// Warnings collected during one resolution.
///
/// Every warning is logged at `warn` level as it is recorded.
#[derive(Debug, Clone, Default)]
pub struct Warnings(Vec<ResolveWarning>);

impl Warnings {
    pub fn push(&mut self, warning: ResolveWarning) {
        log::warn!("{}", warning);
        self.0.push(warning);
    }

    pub fn unresolved(&mut self, stage: Stage, detail: impl Into<String>) {
        self.push(ResolveWarning::UnresolvedDependency {
            stage,
            detail: detail.into(),
        });
    }

    pub fn append(&mut self, other: Warnings) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolveWarning> {
        self.0.iter()
    }

    /// True when a stage was skipped for an unresolved dependency
    pub fn skipped(&self, stage: Stage) -> bool {
        self.0.iter().any(|w| {
            matches!(w, ResolveWarning::UnresolvedDependency { stage: s, .. } if *s == stage)
        })
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a ResolveWarning;
    type IntoIter = std::slice::Iter<'a, ResolveWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
