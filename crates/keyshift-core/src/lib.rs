//! Chord detection and remap engine for keyshift
//!
//! This crate holds all of the decision logic: which keys are held, which
//! remap rule (if any) owns the current chord, and which synthetic events the
//! virtual keyboard should receive. It performs no I/O; the daemon feeds it
//! raw key events and writes back whatever it returns.

mod engine;
mod event;
mod killswitch;
mod role;
mod rules;
mod tracker;

pub use engine::{Engine, Step};
pub use event::{KeyAction, KeyEvent};
pub use killswitch::{is_engaged as killswitch_engaged, KILLSWITCH};
pub use role::{laterality, role, same_modifier, Laterality, ModifierRole};
pub use rules::{RemapRule, RuleState, Trigger, RULES};
pub use tracker::{KeyTracker, KEY_CAPACITY};
