use super::*;

fn key(name: &str) -> Key {
    Key(name.to_owned())
}

fn command() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

// =============================================================
// Modifiers / Button
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.is_command());
}

#[test]
fn meta_counts_as_command() {
    let m = Modifiers { meta: true, ..Modifiers::default() };
    assert!(m.is_command());
}

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(7), Button::Primary);
}

// =============================================================
// Shortcut
// =============================================================

#[test]
fn letters_map_to_tools() {
    let none = Modifiers::default();
    assert_eq!(Shortcut::from_key(&key("v"), none), Some(Shortcut::Tool(ToolMode::Selection)));
    assert_eq!(Shortcut::from_key(&key("A"), none), Some(Shortcut::Tool(ToolMode::Placement)));
    assert_eq!(Shortcut::from_key(&key("r"), none), Some(Shortcut::Tool(ToolMode::Reminder)));
    assert_eq!(Shortcut::from_key(&key("q"), none), None);
}

#[test]
fn delete_backspace_escape() {
    let none = Modifiers::default();
    assert_eq!(Shortcut::from_key(&key("Delete"), none), Some(Shortcut::DeleteSelection));
    assert_eq!(Shortcut::from_key(&key("Backspace"), none), Some(Shortcut::DeleteSelection));
    assert_eq!(Shortcut::from_key(&key("Escape"), none), Some(Shortcut::Deselect));
}

#[test]
fn command_s_saves() {
    assert_eq!(Shortcut::from_key(&key("s"), command()), Some(Shortcut::Save));
    let meta = Modifiers { meta: true, ..Modifiers::default() };
    assert_eq!(Shortcut::from_key(&key("S"), meta), Some(Shortcut::Save));
}

#[test]
fn command_letters_are_not_tool_shortcuts() {
    assert_eq!(Shortcut::from_key(&key("d"), command()), None);
    assert_eq!(Shortcut::from_key(&key("Delete"), command()), None);
}

#[test]
fn named_keys_starting_with_tool_letters_are_ignored() {
    assert_eq!(Shortcut::from_key(&key("Enter"), Modifiers::default()), None);
    assert_eq!(Shortcut::from_key(&key("ArrowDown"), Modifiers::default()), None);
}

// =============================================================
// InputState / UiState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}

#[test]
fn ui_state_default_is_empty() {
    let ui = UiState::default();
    assert!(ui.selection.is_empty());
    assert!(ui.toolbar.is_none());
}
