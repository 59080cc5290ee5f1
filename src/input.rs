//! Keyboard state
//!
//! Press/release events flip booleans per named key; the loop polls the
//! held set once per tick. No event queue.

use crate::sim::TickInput;

/// Game actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Dash,
    Fire,
    Mute,
    Restart,
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to an action
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "Shift" => Some(Key::Dash),
            " " | "Spacebar" => Some(Key::Fire),
            "m" | "M" => Some(Key::Mute),
            "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Currently held movement and action keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
    dash: bool,
    fire: bool,
}

impl InputState {
    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Dash => self.dash = down,
            Key::Fire => self.fire = down,
            // One-shot commands, not held state
            Key::Mute | Key::Restart => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Dash => self.dash,
            Key::Fire => self.fire,
            Key::Mute | Key::Restart => false,
        }
    }

    /// Release everything (focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            dash: self.is_held(Key::Dash),
            fire: self.is_held(Key::Fire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("a"), Some(Key::Left));
        assert_eq!(Key::from_name("d"), Some(Key::Right));
        assert_eq!(Key::from_name(" "), Some(Key::Fire));
        assert_eq!(Key::from_name("Shift"), Some(Key::Dash));
        assert_eq!(Key::from_name("Enter"), None);
    }

    #[test]
    fn test_press_release_polling() {
        let mut input = InputState::default();
        input.set(Key::Left, true);
        input.set(Key::Fire, true);
        let polled = input.tick_input();
        assert!(polled.left && polled.fire && !polled.right);

        input.set(Key::Left, false);
        assert!(!input.is_held(Key::Left));
        input.set(Key::Mute, true);
        assert!(!input.is_held(Key::Mute));

        input.clear();
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_tick_input_mirrors_held_keys() {
        let mut input = InputState::default();
        input.set(Key::Right, true);
        input.set(Key::Dash, true);
        let polled = input.tick_input();
        assert_eq!(polled.right, input.is_held(Key::Right));
        assert_eq!(polled.dash, input.is_held(Key::Dash));
        assert!(!polled.left && !polled.fire);
    }
}
