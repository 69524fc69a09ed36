//! The search session: start / target placement, algorithm dispatch and the
//! per-step snapshot handed to a host.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use gridsearch_core::{Cell, ConfigError, SearchConfig, Topology, validate_depth_limit};
use thiserror::Error;

use crate::bfs::Bfs;
use crate::bidir::Bidirectional;
use crate::dfs::Dfs;
use crate::dls::Dls;
use crate::iddfs::Iddfs;
use crate::state::SearchState;
use crate::traits::{Outcome, Progress, Search};
use crate::ucs::Ucs;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The six search strategies the engine can dispatch to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    Bidirectional,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Dls,
        Algorithm::Iddfs,
        Algorithm::Bidirectional,
    ];

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Ucs => "UCS",
            Algorithm::Dls => "DLS",
            Algorithm::Iddfs => "IDDFS",
            Algorithm::Bidirectional => "Bidirectional",
        }
    }

    /// Menu key, `'1'` to `'6'`.
    pub fn digit(self) -> char {
        match self {
            Algorithm::Bfs => '1',
            Algorithm::Dfs => '2',
            Algorithm::Ucs => '3',
            Algorithm::Dls => '4',
            Algorithm::Iddfs => '5',
            Algorithm::Bidirectional => '6',
        }
    }

    /// Inverse of [`digit`](Self::digit).
    pub fn from_digit(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.digit() == c)
    }

    /// Whether a depth bound applies to this algorithm.
    pub fn is_depth_limited(self) -> bool {
        matches!(self, Algorithm::Dls | Algorithm::Iddfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}` (expected bfs, dfs, ucs, dls, iddfs or bidir)")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "1" => Ok(Algorithm::Bfs),
            "dfs" | "2" => Ok(Algorithm::Dfs),
            "ucs" | "3" => Ok(Algorithm::Ucs),
            "dls" | "4" => Ok(Algorithm::Dls),
            "iddfs" | "5" => Ok(Algorithm::Iddfs),
            "bidir" | "bidirectional" | "6" => Ok(Algorithm::Bidirectional),
            _ => Err(ParseAlgorithmError(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Run parameters and status
// ---------------------------------------------------------------------------

/// Per-run options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunParams {
    limit: Option<u32>,
}

impl RunParams {
    /// Depth limit for depth-limited search. Zero is rejected.
    pub fn with_limit(limit: u32) -> Result<Self, ConfigError> {
        validate_depth_limit(limit)?;
        Ok(Self { limit: Some(limit) })
    }

    /// The explicit limit, if one was given.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
}

/// What the engine is doing, as shown to the user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No run in progress or finished since the last reset.
    #[default]
    Idle,
    Running {
        algorithm: Algorithm,
        limit: Option<u32>,
    },
    Found {
        algorithm: Algorithm,
    },
    NoPath {
        algorithm: Algorithm,
    },
}

impl Status {
    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::Idle => f.write_str("1st Click: Start | 2nd Click: Target"),
            Status::Running {
                algorithm,
                limit: Some(limit),
            } if algorithm.is_depth_limited() => {
                write!(f, "Search: {algorithm} (Limit: {limit}) (Running...)")
            }
            Status::Running { algorithm, .. } => write!(f, "Search: {algorithm} (Running...)"),
            Status::Found {
                algorithm: Algorithm::Bidirectional,
            } => f.write_str("Bidirectional Connected"),
            Status::Found { .. } => f.write_str("Search Complete: Path Found"),
            Status::NoPath { .. } => f.write_str("Search Complete: No Path Found"),
        }
    }
}

/// Result of a point placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Start,
    Target,
    Ignored,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// How a single cell should be drawn. Earlier variants take precedence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    Start,
    Target,
    Wall,
    Path,
    Frontier,
    Explored,
    Empty,
}

/// Borrowed view of the engine after a step.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<'a> {
    pub start: Option<Cell>,
    pub target: Option<Cell>,
    pub frontier: &'a [Cell],
    pub explored: &'a HashSet<Cell>,
    pub path: &'a [Cell],
    pub status: Status,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub topology: &'a Topology,
}

impl Snapshot<'_> {
    /// Classify `c` for rendering.
    pub fn classify(&self, c: Cell) -> CellKind {
        if self.start == Some(c) {
            CellKind::Start
        } else if self.target == Some(c) {
            CellKind::Target
        } else if self.topology.is_wall(c) {
            CellKind::Wall
        } else if self.path.contains(&c) {
            CellKind::Path
        } else if self.frontier.contains(&c) {
            CellKind::Frontier
        } else if self.explored.contains(&c) {
            CellKind::Explored
        } else {
            CellKind::Empty
        }
    }

    /// The status line.
    pub fn label(&self) -> String {
        self.status.to_string()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

struct ActiveRun {
    algorithm: Algorithm,
    search: Box<dyn Search>,
}

impl fmt::Debug for ActiveRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveRun")
            .field("algorithm", &self.algorithm)
            .field("limit", &self.search.limit())
            .finish_non_exhaustive()
    }
}

/// A search session over one grid.
///
/// Points are placed with [`place_point`](Self::place_point), then a run is
/// started with [`begin`](Self::begin) and advanced with
/// [`step`](Self::step), or driven to the end with [`run`](Self::run).
/// Starting a run discards the previous one.
#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    topology: Topology,
    start: Option<Cell>,
    target: Option<Cell>,
    state: SearchState,
    active: Option<ActiveRun>,
    status: Status,
}

impl SearchEngine {
    /// Create an engine with an open grid built from `config`.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            topology: Topology::from(&config),
            start: None,
            target: None,
            state: SearchState::new(),
            active: None,
            status: Status::Idle,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Both points are placed.
    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.target.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// First call places the start, second call places the target. Anything
    /// else (a repeat of the start, a wall, an out-of-bounds cell, a third
    /// click, a click during a run) is ignored.
    pub fn place_point(&mut self, c: Cell) -> Placement {
        if self.is_running() || !self.topology.is_open(c) {
            return Placement::Ignored;
        }
        match (self.start, self.target) {
            (None, _) => {
                self.start = Some(c);
                Placement::Start
            }
            (Some(start), None) if start != c => {
                self.target = Some(c);
                Placement::Target
            }
            _ => Placement::Ignored,
        }
    }

    /// Place the start directly. Returns false if `c` is not open, is the
    /// current target, or a run is active.
    pub fn set_start(&mut self, c: Cell) -> bool {
        if self.is_running() || !self.topology.is_open(c) || self.target == Some(c) {
            return false;
        }
        self.start = Some(c);
        self.discard_results();
        true
    }

    /// Place the target directly. Returns false if `c` is not open, is the
    /// current start, or a run is active.
    pub fn set_target(&mut self, c: Cell) -> bool {
        if self.is_running() || !self.topology.is_open(c) || self.start == Some(c) {
            return false;
        }
        self.target = Some(c);
        self.discard_results();
        true
    }

    /// Clear both points, any run and its results. Walls stay.
    pub fn reset(&mut self) {
        self.start = None;
        self.target = None;
        self.active = None;
        self.discard_results();
    }

    fn discard_results(&mut self) {
        self.state.clear();
        self.status = Status::Idle;
    }

    // -----------------------------------------------------------------------
    // Walls
    // -----------------------------------------------------------------------

    /// Flip the wall at `c`. Start and target cannot be walled, and walls
    /// are frozen while a run is active. Returns whether anything changed.
    pub fn toggle_wall(&mut self, c: Cell) -> bool {
        if self.is_running()
            || !self.topology.contains(c)
            || self.start == Some(c)
            || self.target == Some(c)
        {
            return false;
        }
        self.topology.toggle_wall(c);
        self.discard_results();
        true
    }

    /// Remove every wall. Ignored while a run is active.
    pub fn clear_walls(&mut self) {
        if self.is_running() {
            return;
        }
        self.topology.clear_walls();
        self.discard_results();
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    /// Start `algorithm`, replacing any previous run. Returns false, doing
    /// nothing, unless both points are placed.
    pub fn begin(&mut self, algorithm: Algorithm, params: RunParams) -> bool {
        let (Some(start), Some(target)) = (self.start, self.target) else {
            log::debug!("{algorithm} requested before both points were placed");
            return false;
        };

        let state = &mut self.state;
        let search: Box<dyn Search> = match algorithm {
            Algorithm::Bfs => Box::new(Bfs::new(start, target, state)),
            Algorithm::Dfs => Box::new(Dfs::new(start, target, state)),
            Algorithm::Ucs => Box::new(Ucs::new(start, target, state)),
            Algorithm::Dls => {
                let limit = params.limit().unwrap_or(self.config.depth_limit());
                Box::new(Dls::new(start, target, limit, state))
            }
            Algorithm::Iddfs => Box::new(Iddfs::new(start, target, &self.topology, state)),
            Algorithm::Bidirectional => Box::new(Bidirectional::new(start, target, state)),
        };

        log::debug!("starting {algorithm} from {start} to {target}");
        self.status = Status::Running {
            algorithm,
            limit: search.limit(),
        };
        self.active = Some(ActiveRun { algorithm, search });
        true
    }

    /// Advance the active run by one expansion step. `None` when no run is
    /// active.
    pub fn step(&mut self) -> Option<Progress> {
        let run = self.active.as_mut()?;
        let algorithm = run.algorithm;
        let progress = run.search.step(&self.topology, &mut self.state);
        log::trace!(
            "{algorithm} step: frontier {} explored {}",
            self.state.frontier().len(),
            self.state.explored().len()
        );

        self.status = match progress {
            Progress::Running => Status::Running {
                algorithm,
                limit: run.search.limit(),
            },
            Progress::Found => {
                log::info!(
                    "{algorithm} found a path of {} moves",
                    self.state.path().len()
                );
                Status::Found { algorithm }
            }
            Progress::Exhausted => {
                log::info!("{algorithm} found no path");
                Status::NoPath { algorithm }
            }
        };
        if progress.is_done() {
            self.active = None;
        }
        Some(progress)
    }

    /// Run `algorithm` to completion, calling `observer` after every step.
    /// Returns `None`, doing nothing, unless both points are placed.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        params: RunParams,
        mut observer: impl FnMut(&Snapshot<'_>),
    ) -> Option<Outcome> {
        if !self.begin(algorithm, params) {
            return None;
        }
        loop {
            let progress = self.step()?;
            observer(&self.snapshot());
            if let Some(outcome) = progress.outcome() {
                return Some(outcome);
            }
        }
    }

    /// Abandon the active run, keeping whatever it has drawn so far.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.status = Status::Idle;
        }
    }

    /// Current view for rendering.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            start: self.start,
            target: self.target,
            frontier: self.state.frontier(),
            explored: self.state.explored(),
            path: self.state.path(),
            status: self.status,
            topology: &self.topology,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn snapshot_serializes_without_topology() {
        let mut e = SearchEngine::default();
        e.place_point(Cell::new(0, 0));
        e.place_point(Cell::new(0, 2));
        e.run(Algorithm::Bfs, RunParams::default(), |_| {});
        let json = serde_json::to_value(e.snapshot()).unwrap();
        assert!(json.get("topology").is_none());
        assert_eq!(json["path"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["status"]["Found"]["algorithm"], "Bfs");
    }

    #[test]
    fn status_round_trips() {
        let s = Status::Running {
            algorithm: Algorithm::Iddfs,
            limit: Some(4),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<Status>(&json).unwrap(), s);
    }
}
