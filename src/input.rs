//! # Input State
//!
//! Logical-action input queries. The host maps raw device events onto the
//! fixed set of [`Key`] actions and feeds them into an [`InputState`] that
//! controllers and the battle engine read. Keeping input an explicit value
//! (instead of module-level globals) lets tests inject synthetic key
//! sequences and keeps updates deterministic.

use std::collections::HashSet;

/// The fixed set of logical actions the core understands. The host decides
/// which physical keys, buttons, or touches map onto each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Minimap,
    Equip,
    Shop,
    Items,
}

/// Held/pressed key tracking with edge-triggered consumption.
///
/// `is_held` answers "is this action down right now"; `consume` answers
/// "was this action pressed since last consumed" and clears the press so a
/// held key fires exactly once. The host calls [`InputState::flush`] at the
/// end of every tick to drop unconsumed presses.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key-down event. Repeats while held do not re-trigger the
    /// pressed edge.
    pub fn press(&mut self, key: Key) {
        if !self.held.contains(&key) {
            self.pressed.insert(key);
        }
        self.held.insert(key);
    }

    /// Records a key-up event.
    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// True while the action is held down.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Consumes a pressed edge, returning whether one was pending.
    pub fn consume(&mut self, key: Key) -> bool {
        self.pressed.remove(&key)
    }

    /// Drops all unconsumed presses. Called once per tick by the host.
    pub fn flush(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_held_and_pressed() {
        let mut input = InputState::new();
        input.press(Key::Confirm);
        assert!(input.is_held(Key::Confirm));
        assert!(input.consume(Key::Confirm));
        // A consumed press does not re-fire
        assert!(!input.consume(Key::Confirm));
        assert!(input.is_held(Key::Confirm));
    }

    #[test]
    fn test_held_repeat_does_not_retrigger() {
        let mut input = InputState::new();
        input.press(Key::Up);
        assert!(input.consume(Key::Up));
        // OS key-repeat while held
        input.press(Key::Up);
        assert!(!input.consume(Key::Up));
        // Release and press again fires a fresh edge
        input.release(Key::Up);
        input.press(Key::Up);
        assert!(input.consume(Key::Up));
    }

    #[test]
    fn test_flush_clears_pending_presses() {
        let mut input = InputState::new();
        input.press(Key::Cancel);
        input.flush();
        assert!(!input.consume(Key::Cancel));
        assert!(input.is_held(Key::Cancel));
    }
}
