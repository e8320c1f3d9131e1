//! Key role classification
//!
//! Left and right variants of each modifier share one [`ModifierRole`], so a
//! chord matcher asks "is this a Ctrl key" once instead of checking both
//! sides:
//! - `KEY_LEFTSHIFT` / `KEY_RIGHTSHIFT` -> `ModifierRole::Shift`
//! - `KEY_LEFTCTRL` / `KEY_RIGHTCTRL` -> `ModifierRole::Ctrl`
//! - `KEY_LEFTMETA` / `KEY_RIGHTMETA` -> `ModifierRole::Super`
//! - `KEY_LEFTALT` / `KEY_RIGHTALT` -> `ModifierRole::Alt`

use evdev::Key;

/// Logical modifier category of a key, independent of side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModifierRole {
    /// Not a modifier
    None,
    Shift,
    Ctrl,
    /// Super/Meta/Windows key
    Super,
    Alt,
}

/// Which side of the keyboard a modifier sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Laterality {
    Left,
    Right,
    /// The key has no left/right twin
    NotApplicable,
}

/// Classify a key code into its modifier role.
pub fn role(key: Key) -> ModifierRole {
    match key {
        Key::KEY_LEFTSHIFT | Key::KEY_RIGHTSHIFT => ModifierRole::Shift,
        Key::KEY_LEFTCTRL | Key::KEY_RIGHTCTRL => ModifierRole::Ctrl,
        Key::KEY_LEFTMETA | Key::KEY_RIGHTMETA => ModifierRole::Super,
        Key::KEY_LEFTALT | Key::KEY_RIGHTALT => ModifierRole::Alt,
        _ => ModifierRole::None,
    }
}

/// Side of a modifier key; `NotApplicable` for everything else.
pub fn laterality(key: Key) -> Laterality {
    match key {
        Key::KEY_LEFTSHIFT | Key::KEY_LEFTCTRL | Key::KEY_LEFTMETA | Key::KEY_LEFTALT => {
            Laterality::Left
        }
        Key::KEY_RIGHTSHIFT | Key::KEY_RIGHTCTRL | Key::KEY_RIGHTMETA | Key::KEY_RIGHTALT => {
            Laterality::Right
        }
        _ => Laterality::NotApplicable,
    }
}

/// True when both keys are the same logical modifier, whichever side.
pub fn same_modifier(a: Key, b: Key) -> bool {
    let role_a = role(a);
    role_a != ModifierRole::None && role_a == role(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_modifiers() {
        assert_eq!(role(Key::KEY_LEFTSHIFT), ModifierRole::Shift);
        assert_eq!(role(Key::KEY_RIGHTSHIFT), ModifierRole::Shift);
        assert_eq!(role(Key::KEY_LEFTCTRL), ModifierRole::Ctrl);
        assert_eq!(role(Key::KEY_RIGHTCTRL), ModifierRole::Ctrl);
        assert_eq!(role(Key::KEY_LEFTMETA), ModifierRole::Super);
        assert_eq!(role(Key::KEY_RIGHTMETA), ModifierRole::Super);
        assert_eq!(role(Key::KEY_LEFTALT), ModifierRole::Alt);
        assert_eq!(role(Key::KEY_RIGHTALT), ModifierRole::Alt);
    }

    #[test]
    fn test_role_non_modifiers() {
        for key in [Key::KEY_A, Key::KEY_TAB, Key::KEY_LEFT, Key::KEY_F1, Key::KEY_CAPSLOCK] {
            assert_eq!(role(key), ModifierRole::None, "{:?} is not a modifier", key);
        }
    }

    #[test]
    fn test_laterality() {
        assert_eq!(laterality(Key::KEY_LEFTALT), Laterality::Left);
        assert_eq!(laterality(Key::KEY_RIGHTMETA), Laterality::Right);
        assert_eq!(laterality(Key::KEY_LEFT), Laterality::NotApplicable);
    }

    #[test]
    fn test_same_modifier_ignores_side() {
        assert!(same_modifier(Key::KEY_LEFTCTRL, Key::KEY_RIGHTCTRL));
        assert!(same_modifier(Key::KEY_RIGHTMETA, Key::KEY_RIGHTMETA));
        assert!(!same_modifier(Key::KEY_LEFTCTRL, Key::KEY_LEFTALT));
        // Two plain keys share no modifier role
        assert!(!same_modifier(Key::KEY_A, Key::KEY_B));
    }
}
