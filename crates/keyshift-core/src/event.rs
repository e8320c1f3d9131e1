//! Key event types shared by the engine and the daemon

use std::fmt;

use evdev::Key;

/// Event value constants for evdev key events.
pub mod event_value {
    /// Key release event value
    pub const RELEASE: i32 = 0;
    /// Key press event value
    pub const PRESS: i32 = 1;
    /// Key repeat event value (autorepeat)
    pub const REPEAT: i32 = 2;
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
    /// Autorepeat while held. Dropped before it reaches the engine's state.
    Repeat,
}

impl KeyAction {
    /// Decode an evdev key event value (0, 1 or 2).
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            event_value::RELEASE => Some(KeyAction::Release),
            event_value::PRESS => Some(KeyAction::Press),
            event_value::REPEAT => Some(KeyAction::Repeat),
            _ => None,
        }
    }

    /// The evdev event value for this action.
    pub fn value(self) -> i32 {
        match self {
            KeyAction::Release => event_value::RELEASE,
            KeyAction::Press => event_value::PRESS,
            KeyAction::Repeat => event_value::REPEAT,
        }
    }
}

/// A single key transition, physical or synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn new(key: Key, action: KeyAction) -> Self {
        Self { key, action }
    }

    pub fn press(key: Key) -> Self {
        Self::new(key, KeyAction::Press)
    }

    pub fn release(key: Key) -> Self {
        Self::new(key, KeyAction::Release)
    }

    /// Decode an evdev key code and value into a key event.
    ///
    /// Returns `None` for values that are not press, release or repeat.
    pub fn from_raw(code: u16, value: i32) -> Option<Self> {
        KeyAction::from_value(value).map(|action| Self::new(Key::new(code), action))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            KeyAction::Press => "press",
            KeyAction::Release => "release",
            KeyAction::Repeat => "repeat",
        };
        // Strip the KEY_ prefix evdev puts on every key name
        let key_name = format!("{:?}", self.key);
        let display_name = key_name.strip_prefix("KEY_").unwrap_or(&key_name);
        write!(f, "{}({})", action, display_name)
    }
}
