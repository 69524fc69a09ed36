//! **gridsearch-core**: core types for the grid search engine.
//!
//! This crate provides the coordinate type, the six-way grid topology shared
//! by every search algorithm, and the validated engine configuration.

pub mod config;
pub mod geom;
pub mod topology;

pub use config::{
    ConfigError, DEFAULT_DEPTH_LIMIT, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, SearchConfig,
    validate_depth_limit,
};
pub use geom::{Cell, Direction};
pub use topology::Topology;
