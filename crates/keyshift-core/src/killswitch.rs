//! Emergency exit chord
//!
//! The physical keyboard is grabbed while the daemon runs, so this chord is
//! the only way out if the remapping misbehaves.

use evdev::Key;

use crate::tracker::KeyTracker;

/// Both Ctrl keys plus F1 and F12, in any press order.
pub const KILLSWITCH: [Key; 4] = [Key::KEY_LEFTCTRL, Key::KEY_RIGHTCTRL, Key::KEY_F1, Key::KEY_F12];

/// True when every killswitch key is currently held.
pub fn is_engaged(tracker: &KeyTracker) -> bool {
    KILLSWITCH.iter().all(|&key| tracker.is_held(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engaged_in_any_order() {
        let mut tracker = KeyTracker::new();
        tracker.on_press(Key::KEY_F12);
        tracker.on_press(Key::KEY_RIGHTCTRL);
        tracker.on_press(Key::KEY_F1);
        assert!(!is_engaged(&tracker));

        tracker.on_press(Key::KEY_LEFTCTRL);
        assert!(is_engaged(&tracker));
    }

    #[test]
    fn test_one_ctrl_is_not_enough() {
        let mut tracker = KeyTracker::new();
        tracker.on_press(Key::KEY_LEFTCTRL);
        tracker.on_press(Key::KEY_F1);
        tracker.on_press(Key::KEY_F12);
        assert!(!is_engaged(&tracker));
    }

    #[test]
    fn test_extra_keys_do_not_block() {
        let mut tracker = KeyTracker::new();
        tracker.on_press(Key::KEY_LEFTSHIFT);
        for key in KILLSWITCH {
            tracker.on_press(key);
        }
        assert!(is_engaged(&tracker));
    }
}
