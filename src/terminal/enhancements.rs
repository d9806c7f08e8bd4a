//! Keyboard enhancement flags (kitty keyboard protocol).
//!
//! With the flags pushed, `Ctrl+Enter` arrives as Enter with the CONTROL
//! modifier instead of being indistinguishable from a plain Enter.

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use std::io::Write;

/// Push the flags if the terminal supports them. Returns whether they were
/// pushed, which decides whether they must be popped later.
pub fn enable_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    if !supports_keyboard_enhancement().unwrap_or(false) {
        return false;
    }
    push_keyboard_enhancements(writer)
}

pub fn push_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(
        writer,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok()
}

pub fn pop_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(writer, PopKeyboardEnhancementFlags).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_pop_writes_sequences() {
        let mut buffer = Vec::new();
        assert!(push_keyboard_enhancements(&mut buffer));
        let pushed = buffer.len();
        assert!(pushed > 0);
        assert!(pop_keyboard_enhancements(&mut buffer));
        assert!(buffer.len() > pushed);
    }
}
