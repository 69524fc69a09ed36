//! The Elm-architecture loop: [`Model`], [`Driver`], [`Effect`], [`App`].

use std::error::Error;
use std::time::{Duration, Instant};

use crate::canvas::{Canvas, Frame, Glyph, compute_frame};
use crate::messages::Msg;

/// How long to wait for input when the model has nothing scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application loop.
    End,
}

/// The application model.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into a cleared `canvas`.
    fn draw(&self, canvas: &mut Canvas);

    /// While this returns `Some`, the loop delivers [`Msg::Tick`] at that
    /// pace, polling input in between.
    fn tick_interval(&self) -> Option<Duration> {
        None
    }
}

/// Back-end driver.
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and append whatever arrived to `out`.
    fn poll_msgs(&mut self, timeout: Duration, out: &mut Vec<Msg>) -> Result<(), Box<dyn Error>>;

    /// Paint a computed frame.
    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>>;

    /// Restore the terminal. Must be safe to call after a failed `init`.
    fn close(&mut self);
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create an application drawing onto a `width x height` canvas.
    pub fn new(model: M, driver: D, width: i32, height: i32) -> Self {
        Self {
            model,
            driver,
            width,
            height,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the model returns [`Effect::End`]. The driver is closed on
    /// every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let result = self
            .driver
            .init()
            .and_then(|()| self.event_loop());
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let mut prev = Canvas::new(self.width, self.height);
        let mut curr = Canvas::new(self.width, self.height);
        let mut msgs = vec![Msg::Init];
        let mut next_tick: Option<Instant> = None;

        loop {
            let dirty = !msgs.is_empty();
            for msg in msgs.drain(..) {
                if matches!(msg, Msg::Screen { .. }) {
                    // The driver cleared the screen; repaint everything.
                    prev = Canvas::new(self.width, self.height);
                }
                if let Some(Effect::End) = self.model.update(msg) {
                    return Ok(());
                }
            }

            if dirty {
                curr.fill(Glyph::default());
                self.model.draw(&mut curr);
                let frame = compute_frame(&prev, &curr);
                if !frame.is_empty() {
                    self.driver.flush(&frame)?;
                }
                prev.clone_from(&curr);
            }

            let now = Instant::now();
            let timeout = match self.model.tick_interval() {
                Some(every) => {
                    let due = *next_tick.get_or_insert(now + every);
                    if due <= now {
                        next_tick = Some(now + every);
                        msgs.push(Msg::Tick);
                        continue;
                    }
                    due - now
                }
                None => {
                    next_tick = None;
                    IDLE_POLL
                }
            };
            self.driver.poll_msgs(timeout, &mut msgs)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::canvas::Point;
    use crate::messages::Key;

    /// Replays scripted input, then asks to quit.
    #[derive(Default)]
    struct ScriptedDriver {
        script: VecDeque<Msg>,
        frames: Vec<Frame>,
        closed: bool,
        fail_init: bool,
    }

    impl Driver for ScriptedDriver {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            if self.fail_init {
                return Err("no terminal".into());
            }
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _timeout: Duration,
            out: &mut Vec<Msg>,
        ) -> Result<(), Box<dyn Error>> {
            out.push(self.script.pop_front().unwrap_or(Msg::Quit));
            Ok(())
        }

        fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[derive(Default)]
    struct Counter {
        keys: u32,
        ticks: u32,
        tick_budget: u32,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown { key: Key::Char('q') } | Msg::Quit => return Some(Effect::End),
                Msg::KeyDown { .. } => self.keys += 1,
                Msg::Tick => self.ticks += 1,
                _ => {}
            }
            None
        }

        fn draw(&self, canvas: &mut Canvas) {
            canvas.print(Point::new(0, 0), &self.keys.to_string(), Glyph::default());
        }

        fn tick_interval(&self) -> Option<Duration> {
            (self.ticks < self.tick_budget).then_some(Duration::ZERO)
        }
    }

    #[test]
    fn flushes_only_changes() {
        let driver = ScriptedDriver {
            script: [Msg::key(Key::Char('a')), Msg::key(Key::Char('b'))].into(),
            ..Default::default()
        };
        let mut app = App::new(Counter::default(), driver, 4, 1);
        app.run().unwrap();

        assert_eq!(app.model().keys, 2);
        let frames = &app.driver().frames;
        // "0", then "1", then "2": one changed cell each.
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.cells.len() == 1));
        assert_eq!(frames[2].cells[0].glyph.ch, '2');
        assert!(app.driver().closed);
    }

    #[test]
    fn ticks_until_the_model_stops_asking() {
        let model = Counter {
            tick_budget: 5,
            ..Default::default()
        };
        let mut app = App::new(model, ScriptedDriver::default(), 2, 1);
        app.run().unwrap();
        assert_eq!(app.model().ticks, 5);
    }

    #[test]
    fn failed_init_still_closes() {
        let driver = ScriptedDriver {
            fail_init: true,
            ..Default::default()
        };
        let mut app = App::new(Counter::default(), driver, 2, 1);
        assert!(app.run().is_err());
        assert!(app.driver().closed);
    }

    #[test]
    fn resize_repaints_everything() {
        let driver = ScriptedDriver {
            script: [Msg::Screen {
                width: 80,
                height: 24,
            }]
            .into(),
            ..Default::default()
        };
        let mut app = App::new(Counter::default(), driver, 3, 1);
        app.run().unwrap();
        let frames = &app.driver().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].cells.len(), 1);
        assert_eq!(frames[1].cells[0].glyph.ch, '0');
    }
}
