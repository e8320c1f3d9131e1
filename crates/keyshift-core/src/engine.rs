//! Per-event processing pipeline
//!
//! Every raw key event goes through the same steps, fully, before the next
//! one is looked at:
//!
//! 1. Repeat events are dropped.
//! 2. The [`KeyTracker`] is updated.
//! 3. The killswitch is checked. If engaged, nothing else happens and the
//!    caller receives [`Step::Killswitch`].
//! 4. The rule cascade runs: the first rule that is either active or whose
//!    trigger matches the held chord is the only one considered. It may
//!    enter, exit, or stay put, and may emit corrective synthetic events.
//! 5. Unless the rule suppressed it, the physical event itself is appended
//!    unchanged.
//!
//! Corrective events always come before the passthrough, so for example the
//! synthetic Ctrl is already down when Tab's own press reaches the output.

use std::collections::BTreeSet;

use evdev::Key;

use crate::event::{KeyAction, KeyEvent};
use crate::killswitch;
use crate::role::{role, ModifierRole};
use crate::rules::{RemapRule, RuleState, RULES};
use crate::tracker::KeyTracker;

/// Outcome of processing one raw event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Step {
    /// Synthetic events to write, in order. May be empty.
    Emit(Vec<KeyEvent>),
    /// The emergency exit chord is held; stop processing.
    Killswitch,
}

/// A rule paired with its live state.
#[derive(Debug, Clone)]
struct RuleMachine {
    rule: &'static RemapRule,
    state: RuleState,
}

/// The remapping engine: held-key tracking plus the rule cascade.
#[derive(Debug, Clone)]
pub struct Engine {
    tracker: KeyTracker,
    rules: Vec<RuleMachine>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the built-in rule set, all rules idle.
    pub fn new() -> Self {
        Self {
            tracker: KeyTracker::new(),
            rules: RULES
                .iter()
                .map(|rule| RuleMachine {
                    rule,
                    state: RuleState::Idle,
                })
                .collect(),
        }
    }

    /// Process one physical key event.
    pub fn process(&mut self, event: KeyEvent) -> Step {
        match event.action {
            KeyAction::Repeat => return Step::Emit(Vec::new()),
            KeyAction::Press => self.tracker.on_press(event.key),
            KeyAction::Release => self.tracker.on_release(event.key),
        }

        tracing::trace!("{} (held: {:?})", event, self.tracker.snapshot());

        if killswitch::is_engaged(&self.tracker) {
            tracing::info!("Killswitch chord pressed");
            return Step::Killswitch;
        }

        let mut emitted = Vec::new();
        let suppressed = self.run_rules(event, &mut emitted);

        if !suppressed {
            emitted.push(event);
        }

        Step::Emit(emitted)
    }

    /// Run the priority cascade for `event`, pushing corrective events.
    ///
    /// Returns whether the physical event must be withheld.
    fn run_rules(&mut self, event: KeyEvent, emitted: &mut Vec<KeyEvent>) -> bool {
        let chord = self.tracker.snapshot();

        let Some((machine, matches)) = self.rules.iter_mut().find_map(|machine| {
            let matches = machine.rule.trigger.matches(chord);
            (matches || machine.state == RuleState::Active).then_some((machine, matches))
        }) else {
            return false;
        };

        let rule = machine.rule;

        match (machine.state, matches) {
            (RuleState::Idle, true) => {
                machine.state = RuleState::Active;
                emitted.extend(rule.enter_events());
                tracing::debug!("Rule '{}' active: {} -> {:?}", rule.name, event, rule.substitute);
                rule.suppress_passthrough
            }
            (RuleState::Active, false) if role(event.key) != ModifierRole::Shift => {
                machine.state = RuleState::Idle;
                emitted.extend(rule.exit_events(&self.tracker));
                tracing::debug!("Rule '{}' idle after {}", rule.name, event);
                // A displaced key is already synthetically up; its release
                // would be redundant
                rule.suppress_passthrough
                    && event.action == KeyAction::Release
                    && rule.displaces(event.key)
            }
            _ => false,
        }
    }

    /// Name of the active rule, if any.
    pub fn active_rule(&self) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|machine| machine.state == RuleState::Active)
            .map(|machine| machine.rule.name)
    }

    /// Current held-key state.
    pub fn tracker(&self) -> &KeyTracker {
        &self.tracker
    }

    /// Every key a rule may emit synthetically.
    ///
    /// The virtual device must advertise these even if the physical keyboard
    /// lacks them (e.g. a compact board without Home/End).
    pub fn synthetic_keys(&self) -> Vec<Key> {
        let codes: BTreeSet<u16> = self
            .rules
            .iter()
            .flat_map(|machine| {
                machine
                    .rule
                    .displaced
                    .iter()
                    .copied()
                    .chain(std::iter::once(machine.rule.substitute))
            })
            .map(|key| key.code())
            .collect();

        codes.into_iter().map(Key::new).collect()
    }
}
