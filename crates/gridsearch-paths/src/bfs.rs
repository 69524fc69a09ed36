use std::collections::VecDeque;

use gridsearch_core::{Cell, Topology};

use crate::reconstruct::reconstruct;
use crate::state::SearchState;
use crate::traits::{Progress, Search};

/// Breadth-first search.
///
/// Cells are marked explored when enqueued, and the target is recognised the
/// moment it is first discovered, before it would be enqueued.
#[derive(Debug, Clone)]
pub struct Bfs {
    target: Cell,
    queue: VecDeque<Cell>,
    nbuf: Vec<Cell>,
    done: Option<Progress>,
}

impl Bfs {
    /// Reset `state` and prepare a search from `start` to `target`.
    pub fn new(start: Cell, target: Cell, state: &mut SearchState) -> Self {
        state.reset(start);
        state.explored.insert(start);
        state.set_frontier([start]);
        Self {
            target,
            queue: VecDeque::from([start]),
            nbuf: Vec::with_capacity(6),
            done: (start == target).then_some(Progress::Found),
        }
    }
}

impl Search for Bfs {
    fn step(&mut self, topology: &Topology, state: &mut SearchState) -> Progress {
        if let Some(done) = self.done {
            return done;
        }

        let Some(current) = self.queue.pop_front() else {
            state.frontier.clear();
            self.done = Some(Progress::Exhausted);
            return Progress::Exhausted;
        };

        self.nbuf.clear();
        topology.neighbors_into(current, &mut self.nbuf);

        for &n in self.nbuf.iter() {
            if state.explored.contains(&n) {
                continue;
            }
            state.parent.insert(n, Some(current));
            if n == self.target {
                state.path = reconstruct(n, &state.parent);
                state.set_frontier(self.queue.iter().copied());
                self.done = Some(Progress::Found);
                return Progress::Found;
            }
            state.explored.insert(n);
            self.queue.push_back(n);
        }

        state.set_frontier(self.queue.iter().copied());
        Progress::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Outcome, run_to_completion};

    fn run(n: i32, start: Cell, target: Cell) -> (Outcome, SearchState) {
        let topo = Topology::new(n).unwrap();
        let mut state = SearchState::new();
        let mut bfs = Bfs::new(start, target, &mut state);
        let outcome = run_to_completion(&mut bfs, &topo, &mut state, |_| {});
        (outcome, state)
    }

    #[test]
    fn takes_the_main_diagonal() {
        let (outcome, state) = run(3, Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(outcome, Outcome::Found);
        assert_eq!(state.path(), &[Cell::new(2, 2), Cell::new(1, 1)]);
    }

    #[test]
    fn anti_diagonal_needs_cardinal_moves() {
        let (_, state) = run(3, Cell::new(0, 2), Cell::new(2, 0));
        assert_eq!(state.path().len(), 4);
    }

    #[test]
    fn first_step_discovers_neighbors_in_order() {
        let topo = Topology::new(5).unwrap();
        let mut state = SearchState::new();
        let mut bfs = Bfs::new(Cell::new(2, 2), Cell::new(4, 0), &mut state);
        assert_eq!(bfs.step(&topo, &mut state), Progress::Running);
        assert_eq!(state.frontier(), topo.neighbors(Cell::new(2, 2)).as_slice());
        assert_eq!(state.explored().len(), 7);
    }

    #[test]
    fn start_equal_to_target_is_trivially_found() {
        let (outcome, state) = run(4, Cell::new(1, 1), Cell::new(1, 1));
        assert_eq!(outcome, Outcome::Found);
        assert!(state.path().is_empty());
    }

    #[test]
    fn walled_off_target_exhausts() {
        let mut topo = Topology::new(3).unwrap();
        for c in [Cell::new(1, 2), Cell::new(2, 1), Cell::new(1, 1)] {
            topo.set_wall(c, true);
        }
        let mut state = SearchState::new();
        let mut bfs = Bfs::new(Cell::new(0, 0), Cell::new(2, 2), &mut state);
        let outcome = run_to_completion(&mut bfs, &topo, &mut state, |_| {});
        assert_eq!(outcome, Outcome::Exhausted);
        assert!(state.path().is_empty());
        assert!(state.frontier().is_empty());
        assert_eq!(bfs.step(&topo, &mut state), Progress::Exhausted);
    }
}
