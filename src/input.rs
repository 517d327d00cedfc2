//! Key code mapping
//!
//! The host delivers raw key events; a [`KeyMap`] turns them into the
//! direction changes and quit flag a tick consumes. Unmapped codes are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, DirectionChange, TickInput};

/// Raw key code as delivered by the input device layer
pub type KeyCode = u32;

/// Default key codes (SDL 1.2 keysyms)
pub mod keys {
    use super::KeyCode;

    pub const ESCAPE: KeyCode = 27;
    pub const UP: KeyCode = 273;
    pub const DOWN: KeyCode = 274;
    pub const RIGHT: KeyCode = 275;
    pub const LEFT: KeyCode = 276;
}

/// Discrete event from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Quit,
}

/// What a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Quit,
}

impl Action {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Quit => None,
        }
    }
}

/// Configurable key bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    bindings: BTreeMap<KeyCode, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new([
            (keys::LEFT, Action::Left),
            (keys::RIGHT, Action::Right),
            (keys::UP, Action::Up),
            (keys::DOWN, Action::Down),
            (keys::ESCAPE, Action::Quit),
        ])
    }
}

impl KeyMap {
    pub fn new(bindings: impl IntoIterator<Item = (KeyCode, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Bind (or rebind) a key
    pub fn bind(&mut self, code: KeyCode, action: Action) {
        self.bindings.insert(code, action);
    }

    pub fn action(&self, code: KeyCode) -> Option<Action> {
        self.bindings.get(&code).copied()
    }

    /// Fold a frame's worth of events into the input for one tick.
    ///
    /// Direction changes keep their arrival order. A quit event or a key
    /// down on a quit-bound key sets `quit`.
    pub fn collect(&self, events: impl IntoIterator<Item = InputEvent>) -> TickInput {
        let mut input = TickInput::default();
        for event in events {
            let (code, pressed) = match event {
                InputEvent::Quit => {
                    input.quit = true;
                    continue;
                }
                InputEvent::KeyDown(code) => (code, true),
                InputEvent::KeyUp(code) => (code, false),
            };

            match self.action(code) {
                Some(Action::Quit) => {
                    if pressed {
                        input.quit = true;
                    }
                }
                Some(action) => {
                    if let Some(direction) = action.direction() {
                        input.changes.push(DirectionChange { direction, pressed });
                    }
                }
                None => log::trace!("Ignoring unmapped key {}", code),
            }
        }
        input
    }
}
