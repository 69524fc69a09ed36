use gridsearch_core::Topology;

use crate::state::SearchState;

/// Result of a single expansion step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// More steps remain.
    Running,
    /// The target was reached; the state's path is populated.
    Found,
    /// The search space ran out without reaching the target.
    Exhausted,
}

impl Progress {
    /// Whether the run is over.
    #[inline]
    pub fn is_done(self) -> bool {
        self != Self::Running
    }

    /// The terminal outcome, if any.
    #[inline]
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Running => None,
            Self::Found => Some(Outcome::Found),
            Self::Exhausted => Some(Outcome::Exhausted),
        }
    }
}

/// How a finished run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found,
    Exhausted,
}

/// A resumable search: every call to [`step`](Search::step) performs one
/// expansion and leaves `state` consistent for an observer.
///
/// Once a search reports [`Progress::Found`] or [`Progress::Exhausted`],
/// further calls return the same value without touching `state`.
pub trait Search {
    /// Perform one expansion step.
    fn step(&mut self, topology: &Topology, state: &mut SearchState) -> Progress;

    /// Depth bound currently in force, for the depth-limited searches.
    fn limit(&self) -> Option<u32> {
        None
    }
}

/// Step `search` until it finishes, calling `on_step` after every step.
pub fn run_to_completion<S: Search + ?Sized>(
    search: &mut S,
    topology: &Topology,
    state: &mut SearchState,
    mut on_step: impl FnMut(&SearchState),
) -> Outcome {
    loop {
        let progress = search.step(topology, state);
        on_step(state);
        if let Some(outcome) = progress.outcome() {
            return outcome;
        }
    }
}
