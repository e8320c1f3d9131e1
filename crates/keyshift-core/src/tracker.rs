//! Held-key bookkeeping
//!
//! [`KeyTracker`] keeps two views of the same state: the keys in the order
//! they were pressed (chord matching cares about order) and a table indexed
//! by key code for constant-time "is this held" checks. Both are updated
//! together so `code ∈ table ⇔ code ∈ order` always holds.

use evdev::Key;

/// Size of the held-key table: evdev's `KEY_MAX` (0x2ff) plus one.
pub const KEY_CAPACITY: usize = 0x300;

/// Currently held physical keys.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Held keys in press order, no duplicates
    order: Vec<Key>,
    /// Held flag per key code
    held: Box<[bool; KEY_CAPACITY]>,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            held: Box::new([false; KEY_CAPACITY]),
        }
    }

    /// Record a key press.
    ///
    /// A press for a key that is already held (this happens after focus
    /// changes that swallow a release) leaves the state untouched. Codes
    /// outside the table are ignored.
    pub fn on_press(&mut self, key: Key) {
        let Some(slot) = self.held.get_mut(key.code() as usize) else {
            tracing::trace!("Ignoring press of out-of-range key code {}", key.code());
            return;
        };

        if *slot {
            tracing::trace!("Duplicate press of {:?} ignored", key);
            return;
        }

        *slot = true;
        self.order.push(key);
    }

    /// Record a key release. No-op if the key is not held.
    pub fn on_release(&mut self, key: Key) {
        let Some(slot) = self.held.get_mut(key.code() as usize) else {
            return;
        };

        if !*slot {
            return;
        }

        *slot = false;
        if let Some(pos) = self.order.iter().position(|&k| k == key) {
            self.order.remove(pos);
        }
    }

    /// Held keys in press order.
    pub fn snapshot(&self) -> &[Key] {
        &self.order
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held
            .get(key.code() as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
