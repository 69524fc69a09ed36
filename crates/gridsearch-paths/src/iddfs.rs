use gridsearch_core::{Cell, Topology};

use crate::dls::Dls;
use crate::state::SearchState;
use crate::traits::{Progress, Search};

/// Iterative-deepening depth-first search.
///
/// Runs [`Dls`] with limits `0, 1, 2, ...` up to `N² - 1`, resetting the
/// explored set and parent map before each pass. Gives up early when a pass
/// finishes without any branch being cut off by its limit.
///
/// Worst case is `N²` passes, each of which may expand every cell, so large
/// grids with an unreachable target are slow.
#[derive(Debug, Clone)]
pub struct Iddfs {
    start: Cell,
    target: Cell,
    limit: u32,
    max_limit: u32,
    pass: Dls,
    done: Option<Progress>,
}

impl Iddfs {
    /// Reset `state` and prepare a search from `start` to `target` on
    /// `topology`.
    pub fn new(start: Cell, target: Cell, topology: &Topology, state: &mut SearchState) -> Self {
        let n = topology.size().unsigned_abs();
        let max_limit = n.saturating_mul(n).saturating_sub(1);
        Self {
            start,
            target,
            limit: 0,
            max_limit,
            pass: Dls::new(start, target, 0, state),
            done: None,
        }
    }

    /// The limit of the pass currently running.
    #[inline]
    pub fn current_limit(&self) -> u32 {
        self.limit
    }

    fn finish(&mut self, progress: Progress) -> Progress {
        self.done = Some(progress);
        progress
    }
}

impl Search for Iddfs {
    fn step(&mut self, topology: &Topology, state: &mut SearchState) -> Progress {
        if let Some(done) = self.done {
            return done;
        }

        loop {
            match self.pass.step(topology, state) {
                Progress::Running => return Progress::Running,
                Progress::Found => {
                    log::debug!("IDDFS reached {} with limit {}", self.target, self.limit);
                    return self.finish(Progress::Found);
                }
                Progress::Exhausted => {
                    if !self.pass.hit_cutoff() || self.limit >= self.max_limit {
                        return self.finish(Progress::Exhausted);
                    }
                    self.limit += 1;
                    log::debug!("IDDFS deepening to limit {}", self.limit);
                    self.pass = Dls::new(self.start, self.target, self.limit, state);
                }
            }
        }
    }

    fn limit(&self) -> Option<u32> {
        Some(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::Bfs;
    use crate::traits::{Outcome, run_to_completion};

    fn run(topo: &Topology, start: Cell, target: Cell) -> (Outcome, SearchState, Iddfs) {
        let mut state = SearchState::new();
        let mut iddfs = Iddfs::new(start, target, topo, &mut state);
        let outcome = run_to_completion(&mut iddfs, topo, &mut state, |_| {});
        (outcome, state, iddfs)
    }

    #[test]
    fn matches_bfs_length() {
        let topo = Topology::new(6).unwrap();
        for (start, target) in [
            (Cell::new(0, 0), Cell::new(5, 5)),
            (Cell::new(0, 5), Cell::new(5, 0)),
            (Cell::new(3, 1), Cell::new(0, 4)),
        ] {
            let (outcome, state, iddfs) = run(&topo, start, target);
            assert_eq!(outcome, Outcome::Found);

            let mut bfs_state = SearchState::new();
            let mut bfs = Bfs::new(start, target, &mut bfs_state);
            run_to_completion(&mut bfs, &topo, &mut bfs_state, |_| {});
            assert_eq!(state.path().len(), bfs_state.path().len());
            assert_eq!(iddfs.current_limit() as usize, state.path().len());
        }
    }

    #[test]
    fn state_is_reset_between_passes() {
        let topo = Topology::new(5).unwrap();
        let mut state = SearchState::new();
        let start = Cell::new(0, 0);
        let mut iddfs = Iddfs::new(start, Cell::new(0, 3), &topo, &mut state);
        let mut sizes = Vec::new();
        run_to_completion(&mut iddfs, &topo, &mut state, |s| {
            sizes.push(s.explored().len());
        });
        assert!(sizes.windows(2).any(|w| w[1] < w[0]), "{sizes:?}");
        assert_eq!(state.path().len(), 3);
        assert_eq!(state.parent().get(&start), Some(&None));
    }

    #[test]
    fn deepest_limit_is_one_less_than_the_cell_count() {
        for (n, max) in [(1, 0), (3, 8), (10, 99)] {
            let topo = Topology::new(n).unwrap();
            let mut state = SearchState::new();
            let iddfs = Iddfs::new(Cell::ORIGIN, Cell::ORIGIN, &topo, &mut state);
            assert_eq!(iddfs.max_limit, max);
        }
    }

    #[test]
    fn unreachable_target_stops_early() {
        let mut topo = Topology::new(6).unwrap();
        for c in [Cell::new(4, 5), Cell::new(5, 4), Cell::new(4, 4)] {
            topo.set_wall(c, true);
        }
        let (outcome, state, iddfs) = run(&topo, Cell::new(0, 0), Cell::new(5, 5));
        assert_eq!(outcome, Outcome::Exhausted);
        assert!(state.path().is_empty());
        assert!(iddfs.current_limit() < 35);
    }

    #[test]
    fn adjacent_target_found_at_limit_one() {
        let topo = Topology::new(4).unwrap();
        let (outcome, state, iddfs) = run(&topo, Cell::new(1, 1), Cell::new(2, 2));
        assert_eq!(outcome, Outcome::Found);
        assert_eq!(iddfs.current_limit(), 1);
        assert_eq!(state.path(), &[Cell::new(2, 2)]);
    }
}
