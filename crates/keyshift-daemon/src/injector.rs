//! Virtual device injection via uinput
//!
//! Every synthetic key event is written as its own report (key event plus
//! `SYN_REPORT`) so the order the engine emits is the order applications see.

use evdev::{uinput::VirtualDeviceBuilder, AttributeSet, EventType, InputEvent, Key};
use keyshift_core::KeyEvent;

use crate::error::DaemonError;

/// Convert a synthetic key event into its evdev report.
pub fn to_input_events(event: KeyEvent) -> [InputEvent; 2] {
    [
        InputEvent::new(EventType::KEY, event.key.code(), event.action.value()),
        InputEvent::new(EventType::SYNCHRONIZATION, 0, 0),
    ]
}

/// The synthetic keyboard that receives remapped events
pub struct VirtualKeyboard {
    device: evdev::uinput::VirtualDevice,
}

impl VirtualKeyboard {
    /// Create a virtual keyboard advertising `keys`.
    pub fn new(name: &str, keys: impl IntoIterator<Item = Key>) -> Result<Self, DaemonError> {
        let mut set = AttributeSet::<Key>::new();
        for key in keys {
            set.insert(key);
        }

        let device = VirtualDeviceBuilder::new()
            .and_then(|builder| builder.name(name).with_keys(&set))
            .and_then(|builder| builder.build())
            .map_err(DaemonError::VirtualDevice)?;

        Ok(Self { device })
    }

    /// Write one key event.
    pub fn emit(&mut self, event: KeyEvent) -> Result<(), DaemonError> {
        self.device
            .emit(&to_input_events(event))
            .map_err(DaemonError::Inject)
    }

    /// Write key events in order.
    pub fn emit_all(&mut self, events: &[KeyEvent]) -> Result<(), DaemonError> {
        for &event in events {
            self.emit(event)?;
        }
        Ok(())
    }
}
