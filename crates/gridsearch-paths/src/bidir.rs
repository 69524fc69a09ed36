use std::collections::{HashMap, VecDeque};

use gridsearch_core::{Cell, Topology};

use crate::reconstruct::reconstruct;
use crate::state::{ParentMap, SearchState};
use crate::traits::{Progress, Search};

/// Where the two searches touched: an edge from a cell discovered from the
/// start to one discovered from the target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Meeting {
    pub near_start: Cell,
    pub near_target: Cell,
    /// Moves on the whole route through this edge.
    pub len: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Half {
    Forward,
    Backward,
}

/// One breadth-first sweep, rooted at either end.
#[derive(Debug, Clone)]
struct Side {
    queue: VecDeque<Cell>,
    parent: ParentMap,
    depth: HashMap<Cell, u32>,
}

impl Side {
    fn rooted_at(root: Cell) -> Self {
        Self {
            queue: VecDeque::from([root]),
            parent: ParentMap::from([(root, None)]),
            depth: HashMap::from([(root, 0)]),
        }
    }

    fn head_depth(&self) -> Option<u32> {
        self.queue.front().map(|c| self.depth[c])
    }
}

/// Bidirectional breadth-first search.
///
/// Each step expands one cell from the start side and then one from the
/// target side. Every scanned edge whose far end was already discovered by
/// the other side is a candidate meeting; the best one is kept, and the run
/// stops once the depths at the heads of both queues add up to at least its
/// length, since no later meeting can be shorter.
#[derive(Debug, Clone)]
pub struct Bidirectional {
    start: Cell,
    target: Cell,
    fwd: Side,
    bwd: Side,
    best: Option<Meeting>,
    nbuf: Vec<Cell>,
    done: Option<Progress>,
}

impl Bidirectional {
    /// Reset `state` and prepare a search from `start` to `target`.
    pub fn new(start: Cell, target: Cell, state: &mut SearchState) -> Self {
        state.reset(start);
        state.explored.extend([start, target]);
        state.set_frontier([start, target]);
        Self {
            start,
            target,
            fwd: Side::rooted_at(start),
            bwd: Side::rooted_at(target),
            best: None,
            nbuf: Vec::with_capacity(6),
            done: (start == target).then_some(Progress::Found),
        }
    }

    /// The shortest meeting seen so far.
    pub fn meeting(&self) -> Option<Meeting> {
        self.best
    }

    fn finish(&mut self, progress: Progress) -> Progress {
        self.done = Some(progress);
        progress
    }

    fn publish_frontier(&self, state: &mut SearchState) {
        state.set_frontier(self.fwd.queue.iter().chain(self.bwd.queue.iter()).copied());
    }

    /// Decide whether the run is over before the next half-step.
    fn settle(&mut self, state: &mut SearchState) -> Option<Progress> {
        let heads = self.fwd.head_depth().zip(self.bwd.head_depth());
        match (self.best, heads) {
            (Some(m), Some((f, b))) if f + b < m.len => None,
            (Some(m), _) => {
                self.connect(m, state);
                self.publish_frontier(state);
                Some(self.finish(Progress::Found))
            }
            (None, Some(_)) => None,
            (None, None) => {
                state.frontier.clear();
                Some(self.finish(Progress::Exhausted))
            }
        }
    }

    /// Splice the two half-routes into a target-first path and thread the
    /// parent map along it, so walking back from the target yields the same
    /// route.
    fn connect(&self, m: Meeting, state: &mut SearchState) {
        let mut path = vec![self.target];
        let mut back = reconstruct(m.near_target, &self.bwd.parent);
        back.reverse();
        path.extend(back);
        path.extend(reconstruct(m.near_start, &self.fwd.parent));

        for pair in path.windows(2) {
            state.parent.insert(pair[0], Some(pair[1]));
        }
        if let Some(&last) = path.last() {
            state.parent.insert(last, Some(self.start));
        }
        state.path = path;
    }
}

fn expand(
    side: &mut Side,
    other: &Side,
    half: Half,
    topology: &Topology,
    state: &mut SearchState,
    best: &mut Option<Meeting>,
    nbuf: &mut Vec<Cell>,
) {
    let Some(current) = side.queue.pop_front() else {
        return;
    };
    let depth = side.depth[&current];

    nbuf.clear();
    topology.neighbors_into(current, nbuf);

    for &n in nbuf.iter() {
        if let Some(&other_depth) = other.depth.get(&n) {
            let len = depth + 1 + other_depth;
            if best.is_none_or(|m| len < m.len) {
                let (near_start, near_target) = match half {
                    Half::Forward => (current, n),
                    Half::Backward => (n, current),
                };
                *best = Some(Meeting {
                    near_start,
                    near_target,
                    len,
                });
            }
        }

        if side.depth.contains_key(&n) {
            continue;
        }
        side.depth.insert(n, depth + 1);
        side.parent.insert(n, Some(current));
        if half == Half::Forward {
            state.parent.insert(n, Some(current));
        }
        state.explored.insert(n);
        side.queue.push_back(n);
    }
}

impl Search for Bidirectional {
    fn step(&mut self, topology: &Topology, state: &mut SearchState) -> Progress {
        if let Some(done) = self.done {
            return done;
        }

        if let Some(progress) = self.settle(state) {
            return progress;
        }
        expand(
            &mut self.fwd,
            &self.bwd,
            Half::Forward,
            topology,
            state,
            &mut self.best,
            &mut self.nbuf,
        );

        if let Some(progress) = self.settle(state) {
            return progress;
        }
        expand(
            &mut self.bwd,
            &self.fwd,
            Half::Backward,
            topology,
            state,
            &mut self.best,
            &mut self.nbuf,
        );

        self.publish_frontier(state);
        Progress::Running
    }
}
