//! Keyboard Input Handler
//!
//! Maps crossterm key events onto dashboard actions. The dashboard loop
//! interprets actions in the context of the current wizard step.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything the keyboard can ask the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Move the experiment picker cursor.
    PickerPrev,
    PickerNext,
    /// Select the highlighted experiment.
    Select,
    Next,
    Back,
    Start,
    Stop,
    GenerateReport,
    /// Manual retry after an inline feed error.
    Retry,
    /// Template editor: check for changes / reset to default.
    CheckChanges,
    ResetTemplate,
    /// Template editor: adjust the rounds field.
    RoundsUp,
    RoundsDown,
    /// Start over with a fresh session.
    NewSimulation,
}

/// Map a single key event to an action, if any.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::PickerPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::PickerNext),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Right | KeyCode::Char('n') => Some(Action::Next),
        KeyCode::Left | KeyCode::Char('b') => Some(Action::Back),
        KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('x') => Some(Action::Stop),
        KeyCode::Char('g') => Some(Action::GenerateReport),
        KeyCode::Char('r') => Some(Action::Retry),
        KeyCode::Char('c') => Some(Action::CheckChanges),
        KeyCode::Char('d') => Some(Action::ResetTemplate),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::RoundsUp),
        KeyCode::Char('-') => Some(Action::RoundsDown),
        KeyCode::Char('w') => Some(Action::NewSimulation),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_key(key(KeyCode::Char('n'))), Some(Action::Next));
        assert_eq!(map_key(key(KeyCode::Char('b'))), Some(Action::Back));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Action::Select));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), Some(Action::Quit));
        // Plain 'c' is the template-change check, not quit.
        assert_eq!(map_key(key(KeyCode::Char('c'))), Some(Action::CheckChanges));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(key(KeyCode::Tab)), None);
    }
}
