//! Disambiguation of farms that share a display name

use am_core::{FarmVersion, ObjectId};

/// One farm offered for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmCandidate {
    pub display_name: String,
    pub version: FarmVersion,
    pub id: ObjectId,
}

/// Picks one farm out of several with the same display name.
///
/// Returns the index of the chosen candidate, or `None` when nothing was
/// chosen.
pub trait FarmChooser {
    fn choose(&self, name: &str, candidates: &[FarmCandidate]) -> Option<usize>;
}

/// Chooser for unattended runs: never selects anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl FarmChooser for NonInteractive {
    fn choose(&self, _name: &str, _candidates: &[FarmCandidate]) -> Option<usize> {
        None
    }
}
