//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use crate::canvas::Point;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Backspace,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Middle button pressed.
    Auxiliary,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
}

/// An input message delivered to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Sent once before the first draw.
    Init,
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse button changed state.
    Mouse { action: MouseAction, pos: Point },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// The model's tick interval elapsed.
    Tick,
    /// Interrupt from the terminal (Ctrl-C in raw mode).
    Quit,
}

impl Msg {
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }
}
