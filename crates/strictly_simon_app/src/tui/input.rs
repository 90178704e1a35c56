//! Key bindings.

use crossterm::event::KeyCode;
use strictly_simon::Signal;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Press a pad.
    Press(Signal),
    /// Start a game.
    Start,
    /// Abandon the current game.
    Reset,
    /// Leave the app.
    Quit,
    /// Append a character to the name being entered.
    Type(char),
    /// Delete the last character of the name.
    Backspace,
    /// Save the entered name.
    SubmitName,
}

/// Maps a key to an action. `naming` is true while the name prompt is open.
pub fn map_key(key: KeyCode, naming: bool) -> Option<Action> {
    if naming {
        return match key {
            KeyCode::Enter => Some(Action::SubmitName),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Esc => Some(Action::Reset),
            KeyCode::Char(c) if !c.is_control() => Some(Action::Type(c)),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('g') | KeyCode::Char('1') => Some(Action::Press(Signal::Green)),
        KeyCode::Char('r') | KeyCode::Char('2') => Some(Action::Press(Signal::Red)),
        KeyCode::Char('y') | KeyCode::Char('3') => Some(Action::Press(Signal::Yellow)),
        KeyCode::Char('b') | KeyCode::Char('4') => Some(Action::Press(Signal::Blue)),
        KeyCode::Char('s') | KeyCode::Char(' ') => Some(Action::Start),
        KeyCode::Char('x') => Some(Action::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
