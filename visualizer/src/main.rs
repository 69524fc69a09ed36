//! Terminal grid search visualizer.
//!
//! Run: cargo run --bin gridsearch -- --size 12 --algorithm bfs

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use gridsearch_core::{DEFAULT_DEPTH_LIMIT, DEFAULT_GRID_SIZE, SearchConfig};
use gridsearch_crossterm::{App, CrosstermDriver};
use gridsearch_paths::{Algorithm, SearchEngine};
use gridsearch_visualizer::{Visualizer, canvas_size};

#[derive(Parser, Debug)]
#[command(name = "gridsearch", version, about = "Watch uninformed search algorithms explore a grid")]
struct Args {
    /// Grid dimension N (the grid holds N x N cells)
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    size: i32,

    /// Depth limit used by depth-limited search
    #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
    depth_limit: u32,

    /// Milliseconds between search steps
    #[arg(long, default_value_t = 70)]
    delay_ms: u64,

    /// Run this algorithm as soon as start and target are placed
    /// (bfs, dfs, ucs, dls, iddfs, bidir)
    #[arg(long)]
    algorithm: Option<Algorithm>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = SearchConfig::new(args.size, args.depth_limit)?;
    let size = canvas_size(config.grid_size());

    let model = Visualizer::new(
        SearchEngine::new(config),
        Duration::from_millis(args.delay_ms),
        args.algorithm,
    );
    let mut app = App::new(model, CrosstermDriver::new(), size.x, size.y);
    app.run()
}
