//! Keyboard input handling

use pong_core::{InputState, Key};

/// Map a `KeyboardEvent.key` value to a paddle key
pub fn paddle_key(key: &str) -> Option<Key> {
    match key {
        "w" | "W" => Some(Key::LeftUp),
        "s" | "S" => Some(Key::LeftDown),
        "ArrowUp" => Some(Key::RightUp),
        "ArrowDown" => Some(Key::RightDown),
        _ => None,
    }
}

pub fn is_pause_key(key: &str) -> bool {
    matches!(key, " " | "p" | "P")
}

/// Handle key down event; returns whether the key belongs to the game
pub fn handle_key_down(input: &mut InputState, key: &str) -> bool {
    match paddle_key(key) {
        Some(key) => {
            input.press(key);
            true
        }
        None => false,
    }
}

/// Handle key up event
pub fn handle_key_up(input: &mut InputState, key: &str) -> bool {
    match paddle_key(key) {
        Some(key) => {
            input.release(key);
            true
        }
        None => false,
    }
}
