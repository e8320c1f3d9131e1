//! Remap rule definitions
//!
//! Each rule is static data: a trigger chord, the physical keys it displaces
//! and the substitute key it holds down instead. The transitions are derived
//! from that data, which keeps enter and exit symmetric:
//!
//! ```text
//!  ┌──────┐   trigger matches          ┌────────┐
//!  │ IDLE │ ─────────────────────────► │ ACTIVE │
//!  └──────┘   release displaced keys   └───┬────┘
//!      ▲      press substitute             │
//!      │                                   │ any non-Shift event
//!      │      release substitute           │ once the trigger no
//!      └───── re-press displaced keys ◄────┘ longer matches
//!             that are still held
//! ```

use evdev::Key;

use crate::event::KeyEvent;
use crate::role::{role, ModifierRole};
use crate::tracker::KeyTracker;

/// Chord shape a rule reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A modifier followed by one of `keys`.
    ///
    /// With `allow_shift`, a Shift may be held alongside the modifier (before
    /// or after it) as long as the trigger key comes last.
    Modifier {
        modifier: ModifierRole,
        keys: &'static [Key],
        allow_shift: bool,
    },
    /// Two distinct modifiers in either order followed by `key`, exactly.
    DoubleModifier {
        first: ModifierRole,
        second: ModifierRole,
        key: Key,
    },
}

impl Trigger {
    /// Check the trigger against held keys in press order.
    pub fn matches(&self, chord: &[Key]) -> bool {
        match *self {
            Trigger::Modifier {
                modifier,
                keys,
                allow_shift,
            } => match *chord {
                [held, trigger] => role(held) == modifier && keys.contains(&trigger),
                [a, b, trigger] if allow_shift => {
                    roles_pair(a, b, ModifierRole::Shift, modifier) && keys.contains(&trigger)
                }
                _ => false,
            },
            Trigger::DoubleModifier { first, second, key } => match *chord {
                [a, b, trigger] => roles_pair(a, b, first, second) && trigger == key,
                _ => false,
            },
        }
    }
}

/// `a` and `b` carry roles `x` and `y`, in either order.
fn roles_pair(a: Key, b: Key, x: ModifierRole, y: ModifierRole) -> bool {
    let (ra, rb) = (role(a), role(b));
    (ra == x && rb == y) || (ra == y && rb == x)
}

/// A fixed chord substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapRule {
    pub name: &'static str,
    pub trigger: Trigger,
    /// Keys synthetically released on enter and restored on exit if still held
    pub displaced: &'static [Key],
    /// Key held synthetically while the rule is active
    pub substitute: Key,
    /// Whether the triggering physical event is withheld from the output
    pub suppress_passthrough: bool,
}

impl RemapRule {
    /// Synthetic events that start the substitution.
    pub fn enter_events(&self) -> Vec<KeyEvent> {
        self.displaced
            .iter()
            .map(|&key| KeyEvent::release(key))
            .chain(std::iter::once(KeyEvent::press(self.substitute)))
            .collect()
    }

    /// Synthetic events that end the substitution and give back any displaced
    /// key the user is still physically holding.
    pub fn exit_events(&self, tracker: &KeyTracker) -> Vec<KeyEvent> {
        std::iter::once(KeyEvent::release(self.substitute))
            .chain(
                self.displaced
                    .iter()
                    .filter(|&&key| tracker.is_held(key))
                    .map(|&key| KeyEvent::press(key)),
            )
            .collect()
    }

    /// Whether `key` is one of the keys this rule takes over.
    pub fn displaces(&self, key: Key) -> bool {
        self.displaced.contains(&key)
    }
}

/// Per-rule state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleState {
    #[default]
    Idle,
    Active,
}

const SUPER_KEYS: &[Key] = &[Key::KEY_LEFTMETA, Key::KEY_RIGHTMETA];
const ALT_KEYS: &[Key] = &[Key::KEY_LEFTALT, Key::KEY_RIGHTALT];

const TEXT_KEYS: &[Key] = &[
    Key::KEY_LEFT,
    Key::KEY_RIGHT,
    Key::KEY_UP,
    Key::KEY_DOWN,
    Key::KEY_DELETE,
    Key::KEY_BACKSPACE,
];

/// Ctrl+arrow rules all share one shape and swallow the arrow itself.
const fn ctrl_nav(
    name: &'static str,
    keys: &'static [Key],
    displaced: &'static [Key],
    substitute: Key,
) -> RemapRule {
    RemapRule {
        name,
        trigger: Trigger::Modifier {
            modifier: ModifierRole::Ctrl,
            keys,
            allow_shift: true,
        },
        displaced,
        substitute,
        suppress_passthrough: true,
    }
}

/// All rules, highest priority first.
pub static RULES: [RemapRule; 7] = [
    // Super+Tab -> Ctrl+Tab
    RemapRule {
        name: "tab-switch",
        trigger: Trigger::Modifier {
            modifier: ModifierRole::Super,
            keys: &[Key::KEY_TAB],
            allow_shift: true,
        },
        displaced: SUPER_KEYS,
        substitute: Key::KEY_LEFTCTRL,
        suppress_passthrough: false,
    },
    // Alt+arrows/Delete/Backspace -> Ctrl+same
    RemapRule {
        name: "word-navigation",
        trigger: Trigger::Modifier {
            modifier: ModifierRole::Alt,
            keys: TEXT_KEYS,
            allow_shift: true,
        },
        displaced: ALT_KEYS,
        substitute: Key::KEY_LEFTCTRL,
        suppress_passthrough: false,
    },
    ctrl_nav(
        "line-start",
        &[Key::KEY_LEFT],
        &[Key::KEY_LEFTCTRL, Key::KEY_RIGHTCTRL, Key::KEY_LEFT],
        Key::KEY_HOME,
    ),
    ctrl_nav(
        "line-end",
        &[Key::KEY_RIGHT],
        &[Key::KEY_LEFTCTRL, Key::KEY_RIGHTCTRL, Key::KEY_RIGHT],
        Key::KEY_END,
    ),
    ctrl_nav(
        "page-up",
        &[Key::KEY_UP],
        &[Key::KEY_LEFTCTRL, Key::KEY_RIGHTCTRL, Key::KEY_UP],
        Key::KEY_PAGEUP,
    ),
    ctrl_nav(
        "page-down",
        &[Key::KEY_DOWN],
        &[Key::KEY_LEFTCTRL, Key::KEY_RIGHTCTRL, Key::KEY_DOWN],
        Key::KEY_PAGEDOWN,
    ),
    // Ctrl+Alt+I -> Ctrl+Shift+I
    RemapRule {
        name: "dev-tools",
        trigger: Trigger::DoubleModifier {
            first: ModifierRole::Ctrl,
            second: ModifierRole::Alt,
            key: Key::KEY_I,
        },
        displaced: ALT_KEYS,
        substitute: Key::KEY_LEFTSHIFT,
        suppress_passthrough: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static RemapRule {
        RULES
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {}", name))
    }

    #[test]
    fn test_rule_priority_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "tab-switch",
                "word-navigation",
                "line-start",
                "line-end",
                "page-up",
                "page-down",
                "dev-tools"
            ]
        );
    }

    #[test]
    fn test_modifier_trigger_two_keys() {
        let tab = rule("tab-switch");
        assert!(tab.trigger.matches(&[Key::KEY_LEFTMETA, Key::KEY_TAB]));
        assert!(tab.trigger.matches(&[Key::KEY_RIGHTMETA, Key::KEY_TAB]));
        // Trigger key must come last
        assert!(!tab.trigger.matches(&[Key::KEY_TAB, Key::KEY_LEFTMETA]));
        assert!(!tab.trigger.matches(&[Key::KEY_LEFTALT, Key::KEY_TAB]));
        assert!(!tab.trigger.matches(&[Key::KEY_TAB]));
    }

    #[test]
    fn test_modifier_trigger_shift_either_side() {
        let tab = rule("tab-switch");
        assert!(tab
            .trigger
            .matches(&[Key::KEY_LEFTSHIFT, Key::KEY_LEFTMETA, Key::KEY_TAB]));
        assert!(tab
            .trigger
            .matches(&[Key::KEY_LEFTMETA, Key::KEY_RIGHTSHIFT, Key::KEY_TAB]));
        // A non-Shift extra key breaks the chord
        assert!(!tab
            .trigger
            .matches(&[Key::KEY_LEFTMETA, Key::KEY_LEFTCTRL, Key::KEY_TAB]));
        // Two Super keys are not Shift+Super
        assert!(!tab
            .trigger
            .matches(&[Key::KEY_LEFTMETA, Key::KEY_RIGHTMETA, Key::KEY_TAB]));
    }

    #[test]
    fn test_word_navigation_text_keys() {
        let words = rule("word-navigation");
        for key in TEXT_KEYS {
            assert!(words.trigger.matches(&[Key::KEY_LEFTALT, *key]), "{:?}", key);
        }
        assert!(!words.trigger.matches(&[Key::KEY_LEFTALT, Key::KEY_HOME]));
    }

    #[test]
    fn test_double_modifier_exact_length() {
        let dev = rule("dev-tools");
        assert!(dev
            .trigger
            .matches(&[Key::KEY_LEFTCTRL, Key::KEY_LEFTALT, Key::KEY_I]));
        assert!(dev
            .trigger
            .matches(&[Key::KEY_RIGHTALT, Key::KEY_RIGHTCTRL, Key::KEY_I]));
        assert!(!dev.trigger.matches(&[Key::KEY_LEFTCTRL, Key::KEY_I]));
        assert!(!dev.trigger.matches(&[
            Key::KEY_LEFTSHIFT,
            Key::KEY_LEFTCTRL,
            Key::KEY_LEFTALT,
            Key::KEY_I
        ]));
        assert!(!dev
            .trigger
            .matches(&[Key::KEY_LEFTCTRL, Key::KEY_LEFTSHIFT, Key::KEY_I]));
    }

    #[test]
    fn test_enter_events() {
        assert_eq!(
            rule("line-end").enter_events(),
            vec![
                KeyEvent::release(Key::KEY_LEFTCTRL),
                KeyEvent::release(Key::KEY_RIGHTCTRL),
                KeyEvent::release(Key::KEY_RIGHT),
                KeyEvent::press(Key::KEY_END),
            ]
        );
    }

    #[test]
    fn test_exit_events_restore_only_held() {
        let mut tracker = KeyTracker::new();
        tracker.on_press(Key::KEY_RIGHTCTRL);
        tracker.on_press(Key::KEY_UP);

        assert_eq!(
            rule("page-up").exit_events(&tracker),
            vec![
                KeyEvent::release(Key::KEY_PAGEUP),
                KeyEvent::press(Key::KEY_RIGHTCTRL),
                KeyEvent::press(Key::KEY_UP),
            ]
        );

        let empty = KeyTracker::new();
        assert_eq!(
            rule("page-up").exit_events(&empty),
            vec![KeyEvent::release(Key::KEY_PAGEUP)]
        );
    }

    #[test]
    fn test_only_navigation_rules_suppress() {
        let suppressing: Vec<_> = RULES
            .iter()
            .filter(|r| r.suppress_passthrough)
            .map(|r| r.name)
            .collect();
        assert_eq!(suppressing, ["line-start", "line-end", "page-up", "page-down"]);
    }

    #[test]
    fn test_substitute_never_displaced() {
        for r in &RULES {
            assert!(!r.displaces(r.substitute), "{}", r.name);
        }
    }
}
