use super::{Key, KeyCode, KeyModifiers};

/// Everything a user can ask of the app
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    SelectNext,
    SelectPrevious,

    VoteUp,
    VoteDown,
    ToggleLock,

    Regenerate,
    ResetVotes,

    Quit,
}

impl UserAction {
    /// Quit is the only action that makes sense while jokes are loading
    pub fn allowed_while_loading(&self) -> bool {
        *self == UserAction::Quit
    }
}

pub fn action_for(key: Key) -> Option<UserAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UserAction::Quit),
            KeyCode::Char('n') => Some(UserAction::SelectNext),
            KeyCode::Char('p') => Some(UserAction::SelectPrevious),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(UserAction::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(UserAction::SelectPrevious),

        KeyCode::Char('+') | KeyCode::Char('u') => Some(UserAction::VoteUp),
        KeyCode::Char('-') | KeyCode::Char('d') => Some(UserAction::VoteDown),
        KeyCode::Char('l') | KeyCode::Char(' ') => Some(UserAction::ToggleLock),

        KeyCode::Char('n') => Some(UserAction::Regenerate),
        KeyCode::Char('r') => Some(UserAction::ResetVotes),

        KeyCode::Char('q') | KeyCode::Esc => Some(UserAction::Quit),

        _ => None,
    }
}
