//! Keyboard shortcut for toggling the theme: Ctrl/Cmd + Shift + D.

#[cfg(test)]
#[path = "shortcut_test.rs"]
mod shortcut_test;

/// Keyboard modifier keys held during a keydown.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        Self { shift, ctrl, alt, meta }
    }
}

/// Key value the browser reports for Shift + D.
pub const TOGGLE_KEY: &str = "D";

/// Whether a keydown should toggle the theme (and have its default prevented).
///
/// `key` is `KeyboardEvent.key`; with Shift held the browser reports the
/// uppercase letter.
#[must_use]
pub fn is_toggle_shortcut(key: &str, modifiers: Modifiers) -> bool {
    (modifiers.ctrl || modifiers.meta) && modifiers.shift && key == TOGGLE_KEY
}
