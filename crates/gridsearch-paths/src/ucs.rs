use std::collections::{BinaryHeap, HashMap};

use gridsearch_core::{Cell, Topology};

use crate::reconstruct::reconstruct;
use crate::state::SearchState;
use crate::traits::{Progress, Search};

/// Cost of a single move.
const STEP_COST: u32 = 1;

/// Priority-queue entry ordered by `(cost, cell)`, smallest first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    cost: u32,
    cell: Cell,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest entry first,
        // falling back to row-major cell order on equal cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform-cost (Dijkstra) search with lazy deletion.
///
/// A cheaper route to a queued cell pushes a fresh entry and rewrites its
/// parent; the stale entry is skipped when popped because the cell is
/// already explored by then.
#[derive(Debug, Clone)]
pub struct Ucs {
    target: Cell,
    open: BinaryHeap<Entry>,
    cost: HashMap<Cell, u32>,
    nbuf: Vec<Cell>,
    done: Option<Progress>,
}

impl Ucs {
    /// Reset `state` and prepare a search from `start` to `target`.
    pub fn new(start: Cell, target: Cell, state: &mut SearchState) -> Self {
        state.reset(start);
        state.set_frontier([start]);
        Self {
            target,
            open: BinaryHeap::from([Entry {
                cost: 0,
                cell: start,
            }]),
            cost: HashMap::from([(start, 0)]),
            nbuf: Vec::with_capacity(6),
            done: None,
        }
    }

    /// Best known cost to `c`, if it has been reached.
    pub fn cost_to(&self, c: Cell) -> Option<u32> {
        self.cost.get(&c).copied()
    }

    fn finish(&mut self, progress: Progress) -> Progress {
        self.done = Some(progress);
        progress
    }
}

impl Search for Ucs {
    fn step(&mut self, topology: &Topology, state: &mut SearchState) -> Progress {
        if let Some(done) = self.done {
            return done;
        }

        loop {
            let Some(Entry { cell: current, .. }) = self.open.pop() else {
                state.frontier.clear();
                return self.finish(Progress::Exhausted);
            };

            if current == self.target {
                state.path = reconstruct(current, &state.parent);
                state.set_frontier(self.open.iter().map(|e| e.cell));
                return self.finish(Progress::Found);
            }

            // Stale entry for a cell settled at a lower cost.
            if !state.explored.insert(current) {
                continue;
            }

            let current_cost = self.cost[&current];
            self.nbuf.clear();
            topology.neighbors_into(current, &mut self.nbuf);

            for &n in self.nbuf.iter() {
                let tentative = current_cost + STEP_COST;
                if self.cost.get(&n).is_some_and(|&known| tentative >= known) {
                    continue;
                }
                self.cost.insert(n, tentative);
                state.parent.insert(n, Some(current));
                self.open.push(Entry {
                    cost: tentative,
                    cell: n,
                });
            }

            state.set_frontier(self.open.iter().map(|e| e.cell));
            return Progress::Running;
        }
    }
}
