use super::*;

fn mods(shift: bool, ctrl: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt: false, meta }
}

#[test]
fn ctrl_shift_d_toggles() {
    assert!(is_toggle_shortcut("D", mods(true, true, false)));
}

#[test]
fn cmd_shift_d_toggles() {
    assert!(is_toggle_shortcut("D", mods(true, false, true)));
}

#[test]
fn alt_does_not_block_shortcut() {
    assert!(is_toggle_shortcut("D", Modifiers::new(true, true, true, false)));
}

#[test]
fn shift_is_required() {
    assert!(!is_toggle_shortcut("D", mods(false, true, false)));
    assert!(!is_toggle_shortcut("d", mods(false, true, false)));
}

#[test]
fn ctrl_or_meta_is_required() {
    assert!(!is_toggle_shortcut("D", mods(true, false, false)));
}

#[test]
fn other_keys_are_ignored() {
    assert!(!is_toggle_shortcut("d", mods(true, true, false)));
    assert!(!is_toggle_shortcut("E", mods(true, true, false)));
    assert!(!is_toggle_shortcut("Escape", mods(true, true, true)));
}

#[test]
fn default_modifiers_are_all_released() {
    assert_eq!(Modifiers::default(), Modifiers::new(false, false, false, false));
}
