use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gitsw_core::{action::Action, config::FeaturesConfig};

/// Resolve a key press into an action. Pin keys resolve only when pinning is enabled.
pub fn resolve_action(key: KeyEvent, features: FeaturesConfig) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('d') if features.pinning => Some(Action::Pin),
            KeyCode::Char('u') if features.pinning => Some(Action::Unpin),
            KeyCode::Char('p') => Some(Action::MoveSelection(-1)),
            KeyCode::Char('n') => Some(Action::MoveSelection(1)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Up => Some(Action::MoveSelection(-1)),
        KeyCode::Down => Some(Action::MoveSelection(1)),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home => Some(Action::MoveTop),
        KeyCode::End => Some(Action::MoveBottom),
        KeyCode::Backspace => Some(Action::SearchPop),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Action::SearchPush(c))
        }
        _ => None,
    }
}
