use gridsearch_core::{Cell, Topology};

use crate::reconstruct::reconstruct;
use crate::state::SearchState;
use crate::traits::{Progress, Search};

/// Depth-first search with an explicit stack.
///
/// Neighbors are pushed in reverse expansion order so the first neighbor is
/// popped first. A cell may sit on the stack several times; its parent is
/// the cell that pushed it last, and stale copies are skipped when popped.
#[derive(Debug, Clone)]
pub struct Dfs {
    target: Cell,
    stack: Vec<Cell>,
    nbuf: Vec<Cell>,
    done: Option<Progress>,
}

impl Dfs {
    /// Reset `state` and prepare a search from `start` to `target`.
    pub fn new(start: Cell, target: Cell, state: &mut SearchState) -> Self {
        state.reset(start);
        state.set_frontier([start]);
        Self {
            target,
            stack: vec![start],
            nbuf: Vec::with_capacity(6),
            done: None,
        }
    }

    fn finish(&mut self, progress: Progress) -> Progress {
        self.done = Some(progress);
        progress
    }
}

impl Search for Dfs {
    fn step(&mut self, topology: &Topology, state: &mut SearchState) -> Progress {
        if let Some(done) = self.done {
            return done;
        }

        loop {
            let Some(current) = self.stack.pop() else {
                state.frontier.clear();
                return self.finish(Progress::Exhausted);
            };

            if current == self.target {
                state.path = reconstruct(current, &state.parent);
                state.set_frontier(self.stack.iter().copied());
                return self.finish(Progress::Found);
            }

            if !state.explored.insert(current) {
                continue;
            }

            self.nbuf.clear();
            topology.neighbors_into(current, &mut self.nbuf);
            for &n in self.nbuf.iter().rev() {
                if !state.explored.contains(&n) {
                    state.parent.insert(n, Some(current));
                    self.stack.push(n);
                }
            }

            state.set_frontier(self.stack.iter().copied());
            return Progress::Running;
        }
    }
}
