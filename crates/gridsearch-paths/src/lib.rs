//! Stepwise uninformed search on a six-way grid.
//!
//! This crate provides resumable implementations of six classical search
//! strategies over a [`Topology`](gridsearch_core::Topology):
//!
//! - **BFS** breadth-first search ([`Bfs`])
//! - **DFS** depth-first search ([`Dfs`])
//! - **UCS** uniform-cost search ([`Ucs`])
//! - **DLS** depth-limited search ([`Dls`])
//! - **IDDFS** iterative deepening ([`Iddfs`])
//! - **Bidirectional** breadth-first search from both ends ([`Bidirectional`])
//!
//! Every algorithm implements [`Search`]: each call to [`Search::step`]
//! performs one expansion and leaves a [`SearchState`] an observer can draw.
//! [`SearchEngine`] wraps them in a session with point placement, walls and
//! a status label.
//!
//! # Path orientation
//!
//! | Field | Contents |
//! |---|---|
//! | [`SearchState::path`] | target first, start excluded |
//! | [`reconstruct`] | node first, root excluded |

mod bfs;
mod bidir;
mod dfs;
mod dls;
mod engine;
mod iddfs;
mod reconstruct;
mod state;
mod traits;
mod ucs;

pub use bfs::Bfs;
pub use bidir::{Bidirectional, Meeting};
pub use dfs::Dfs;
pub use dls::Dls;
pub use engine::{
    Algorithm, CellKind, ParseAlgorithmError, Placement, RunParams, SearchEngine, Snapshot, Status,
};
pub use iddfs::Iddfs;
pub use reconstruct::reconstruct;
pub use state::{ParentMap, SearchState};
pub use traits::{Outcome, Progress, Search, run_to_completion};
pub use ucs::Ucs;
