use std::collections::HashMap;

use gridsearch_core::{Cell, Topology};

use crate::reconstruct::reconstruct;
use crate::state::SearchState;
use crate::traits::{Progress, Search};

/// One level of the traversal: a cell and the neighbors still to try.
#[derive(Debug, Clone)]
struct Frame {
    cell: Cell,
    depth: u32,
    neighbors: Vec<Cell>,
    next: usize,
}

/// Depth-limited depth-first search.
///
/// Recursion is replaced by an explicit stack of frames so the search can
/// pause after every expansion. A cell is checked against the target before
/// the depth bound, so the target is found even at exactly `limit` moves;
/// cells at depth `limit` are never expanded.
///
/// Each cell remembers the shallowest depth it was expanded at and is only
/// entered again from a strictly shallower depth. A cell first reached down
/// a long branch therefore cannot hide a shorter route to the target.
#[derive(Debug, Clone)]
pub struct Dls {
    target: Cell,
    limit: u32,
    stack: Vec<Frame>,
    pending: Option<(Cell, u32)>,
    expanded_at: HashMap<Cell, u32>,
    cutoff: bool,
    done: Option<Progress>,
}

impl Dls {
    /// Reset `state` and prepare a search from `start` to `target` that
    /// never expands a cell `limit` or more moves away from `start`.
    pub fn new(start: Cell, target: Cell, limit: u32, state: &mut SearchState) -> Self {
        state.reset(start);
        Self {
            target,
            limit,
            stack: Vec::new(),
            pending: Some((start, 0)),
            expanded_at: HashMap::new(),
            cutoff: false,
            done: None,
        }
    }

    /// Whether some branch was cut short by the depth bound. When a finished
    /// search reports `false`, a larger bound cannot reach anything new.
    #[inline]
    pub fn hit_cutoff(&self) -> bool {
        self.cutoff
    }

    fn finish(&mut self, progress: Progress) -> Progress {
        self.done = Some(progress);
        progress
    }

    fn publish_branch(&self, state: &mut SearchState) {
        state.set_frontier(self.stack.iter().map(|f| f.cell));
    }
}

fn should_enter(expanded_at: &HashMap<Cell, u32>, c: Cell, depth: u32) -> bool {
    expanded_at.get(&c).is_none_or(|&seen| depth < seen)
}

impl Search for Dls {
    fn step(&mut self, topology: &Topology, state: &mut SearchState) -> Progress {
        if let Some(done) = self.done {
            return done;
        }

        loop {
            if let Some((node, depth)) = self.pending.take() {
                if node == self.target {
                    state.path = reconstruct(node, &state.parent);
                    self.publish_branch(state);
                    return self.finish(Progress::Found);
                }
                if depth >= self.limit {
                    self.cutoff = true;
                    continue;
                }

                state.explored.insert(node);
                self.expanded_at.insert(node, depth);
                let mut neighbors = Vec::with_capacity(6);
                topology.neighbors_into(node, &mut neighbors);
                self.stack.push(Frame {
                    cell: node,
                    depth,
                    neighbors,
                    next: 0,
                });
                self.publish_branch(state);
                return Progress::Running;
            }

            let Some(frame) = self.stack.last_mut() else {
                state.frontier.clear();
                return self.finish(Progress::Exhausted);
            };

            let child_depth = frame.depth + 1;
            let expanded_at = &self.expanded_at;
            let next = frame.neighbors[frame.next..]
                .iter()
                .position(|&n| should_enter(expanded_at, n, child_depth));

            match next {
                Some(offset) => {
                    let child = frame.neighbors[frame.next + offset];
                    frame.next += offset + 1;
                    state.parent.insert(child, Some(frame.cell));
                    self.pending = Some((child, child_depth));
                }
                None => {
                    self.stack.pop();
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
    use crate::traits::{Outcome, run_to_completion};

    fn run(topo: &Topology, start: Cell, target: Cell, limit: u32) -> (Outcome, SearchState, Dls) {
        let mut state = SearchState::new();
        let mut dls = Dls::new(start, target, limit, &mut state);
        let outcome = run_to_completion(&mut dls, topo, &mut state, |_| {});
        (outcome, state, dls)
    }

    #[test]
    fn limit_zero_only_matches_start() {
        let topo = Topology::new(4).unwrap();
        let (outcome, state, dls) = run(&topo, Cell::new(1, 1), Cell::new(1, 2), 0);
        assert_eq!(outcome, Outcome::Exhausted);
        assert!(state.explored().is_empty());
        assert!(dls.hit_cutoff());

        let (outcome, state, _) = run(&topo, Cell::new(1, 1), Cell::new(1, 1), 0);
        assert_eq!(outcome, Outcome::Found);
        assert!(state.path().is_empty());
    }

    #[test]
    fn target_at_exactly_the_limit_is_found() {
        let topo = Topology::new(5).unwrap();
        let (outcome, state, _) = run(&topo, Cell::new(0, 0), Cell::new(0, 3), 3);
        assert_eq!(outcome, Outcome::Found);
        assert_eq!(state.path().len(), 3);
    }

    #[test]
    fn target_beyond_the_limit_is_not_found() {
        let topo = Topology::new(5).unwrap();
        let (outcome, state, dls) = run(&topo, Cell::new(0, 0), Cell::new(0, 4), 3);
        assert_eq!(outcome, Outcome::Exhausted);
        assert!(state.path().is_empty());
        assert!(dls.hit_cutoff());
    }

    #[test]
    fn never_expands_beyond_the_limit() {
        let topo = Topology::new(8).unwrap();
        let start = Cell::new(4, 4);
        let limit = 2;
        let mut state = SearchState::new();
        let mut dls = Dls::new(start, Cell::new(7, 0), limit, &mut state);
        // The branch is published root first, so its tip is the cell just
        // expanded and its length gives that cell's real depth.
        let mut deepest = 0;
        run_to_completion(&mut dls, &topo, &mut state, |s| {
            if let Some(&tip) = s.frontier().last() {
                let depth = s.frontier().len() as u32 - 1;
                assert!(depth < limit, "{tip} expanded at depth {depth}");
                deepest = deepest.max(depth);
            }
        });
        assert_eq!(deepest, limit - 1);
        // Everything within one move was expanded.
        for n in topo.neighbors(start) {
            assert!(state.is_explored(n));
        }
    }

    #[test]
    fn frontier_is_the_current_branch() {
        let topo = Topology::new(5).unwrap();
        let mut state = SearchState::new();
        let mut dls = Dls::new(Cell::new(4, 0), Cell::new(0, 4), 12, &mut state);
        dls.step(&topo, &mut state);
        dls.step(&topo, &mut state);
        dls.step(&topo, &mut state);
        // Up is tried first from every cell on the left edge.
        assert_eq!(
            state.frontier(),
            &[Cell::new(4, 0), Cell::new(3, 0), Cell::new(2, 0)]
        );
        assert_eq!(dls.limit(), Some(12));
    }

    #[test]
    fn no_cutoff_when_component_is_small() {
        let mut topo = Topology::new(3).unwrap();
        for c in [Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)] {
            topo.set_wall(c, true);
        }
        let (outcome, _, dls) = run(&topo, Cell::new(0, 0), Cell::new(2, 2), 5);
        assert_eq!(outcome, Outcome::Exhausted);
        assert!(!dls.hit_cutoff());
    }
}
