//! Interactive terminal model for the grid search engine.
//!
//! Left click places the start and then the target, right click toggles a
//! wall, `1`-`6` run an algorithm one step per tick.

use std::time::Duration;

use gridsearch_core::Cell;
use gridsearch_crossterm::{Canvas, Color, Effect, Glyph, Key, Model, MouseAction, Msg, Point};
use gridsearch_paths::{Algorithm, CellKind, Placement, RunParams, SearchEngine};

/// Rows above the grid: status line, controls line.
pub const HEADER_ROWS: i32 = 2;
/// Terminal columns per grid cell.
pub const CELL_WIDTH: i32 = 3;

const CONTROLS: &str = "1-BFS 2-DFS 3-UCS 4-DLS 5-IDDFS 6-Bidir | R-Reset C-Clear walls | Q-Quit";

// Colours
const COL_EMPTY: Color = Color::from_rgb(211, 211, 211);
const COL_START: Color = Color::from_rgb(46, 204, 113);
const COL_TARGET: Color = Color::from_rgb(52, 152, 219);
const COL_FRONTIER: Color = Color::from_rgb(241, 196, 15);
const COL_EXPLORED: Color = Color::from_rgb(180, 180, 180);
const COL_PATH: Color = Color::from_rgb(155, 89, 182);
const COL_WALL: Color = Color::from_rgb(60, 60, 70);
const COL_LABEL: Color = Color::BLACK;
const COL_CONTROLS: Color = Color::from_rgb(80, 80, 80);

/// Canvas size needed for a grid of dimension `n`.
pub fn canvas_size(n: i32) -> Point {
    let grid_width = n * CELL_WIDTH;
    Point::new(
        grid_width.max(CONTROLS.chars().count() as i32),
        n + HEADER_ROWS,
    )
}

fn style(kind: CellKind) -> (Color, char) {
    match kind {
        CellKind::Start => (COL_START, 'S'),
        CellKind::Target => (COL_TARGET, 'T'),
        CellKind::Wall => (COL_WALL, ' '),
        CellKind::Path => (COL_PATH, '0'),
        CellKind::Frontier => (COL_FRONTIER, '0'),
        CellKind::Explored => (COL_EXPLORED, '0'),
        CellKind::Empty => (COL_EMPTY, '0'),
    }
}

/// The visualizer state.
#[derive(Debug)]
pub struct Visualizer {
    engine: SearchEngine,
    delay: Duration,
    auto_run: Option<Algorithm>,
}

impl Visualizer {
    /// `delay` paces the steps of a run; `auto_run` starts that algorithm
    /// as soon as the target is placed.
    pub fn new(engine: SearchEngine, delay: Duration, auto_run: Option<Algorithm>) -> Self {
        Self {
            engine,
            delay,
            auto_run,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Grid cell under a screen position, if any.
    pub fn cell_at(&self, pos: Point) -> Option<Cell> {
        let row = pos.y - HEADER_ROWS;
        if row < 0 || pos.x < 0 {
            return None;
        }
        let c = Cell::new(row, pos.x / CELL_WIDTH);
        self.engine.topology().contains(c).then_some(c)
    }

    fn start_run(&mut self, algorithm: Algorithm) {
        if !self.engine.begin(algorithm, RunParams::default()) {
            log::debug!("{algorithm} ignored: place a start and a target first");
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') | Key::Char('Q') => return Some(Effect::End),
            Key::Char('r') | Key::Char('R') => self.engine.reset(),
            Key::Char('c') | Key::Char('C') => self.engine.clear_walls(),
            Key::Char(d) => {
                if let Some(algorithm) = Algorithm::from_digit(d) {
                    self.start_run(algorithm);
                }
            }
            _ => {}
        }
        None
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Point) {
        let Some(c) = self.cell_at(pos) else {
            return;
        };
        match action {
            MouseAction::Main => {
                if self.engine.place_point(c) == Placement::Target {
                    if let Some(algorithm) = self.auto_run {
                        self.start_run(algorithm);
                    }
                }
            }
            MouseAction::Secondary => {
                self.engine.toggle_wall(c);
            }
            _ => {}
        }
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init | Msg::Screen { .. } => None,
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { key } => self.on_key(key),
            Msg::Mouse { action, pos } => {
                self.on_mouse(action, pos);
                None
            }
            Msg::Tick => {
                self.engine.step();
                None
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        let snap = self.engine.snapshot();
        let header = Glyph::default().with_fg(Color::WHITE).with_bold(true);
        canvas.print(Point::new(0, 0), &snap.label(), header);
        canvas.print(
            Point::new(0, 1),
            CONTROLS,
            Glyph::default().with_fg(COL_CONTROLS),
        );

        for c in self.engine.topology().cells() {
            let kind = snap.classify(c);
            let (bg, label) = style(kind);
            let base = Glyph::default().with_fg(COL_LABEL).with_bg(bg);
            let origin = Point::new(c.col * CELL_WIDTH, c.row + HEADER_ROWS);
            canvas.set(origin, base);
            canvas.set(
                origin.shift(1, 0),
                base.with_char(label)
                    .with_bold(matches!(kind, CellKind::Start | CellKind::Target)),
            );
            canvas.set(origin.shift(2, 0), base);
        }
    }

    fn tick_interval(&self) -> Option<Duration> {
        self.engine.is_running().then_some(self.delay)
    }
}
