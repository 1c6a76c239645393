// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the
// dashboard model, or into local ViewState mutations (search box editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::UserCommand;

/// Longest query the search box accepts, in characters.
pub const MAX_SEARCH_LEN: usize = 30;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be applied to the
/// dashboard. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Crossterm emits Release (and Repeat) events on some platforms
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.search_mode {
        return handle_search_mode(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('/') => {
            view_state.search_mode = true;
            view_state.search_text.clear();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => Some(UserCommand::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UserCommand::SelectNext),
        KeyCode::Char('m') => Some(UserCommand::NextMetric),
        KeyCode::Char('M') => Some(UserCommand::PrevMetric),
        KeyCode::Char('r') => Some(UserCommand::Refresh),
        KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Esc => {
            view_state.status = None;
            None
        }
        _ => None,
    }
}

/// Editing the search box: printable characters append, Enter submits,
/// Esc cancels.
fn handle_search_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_mode = false;
            view_state.search_text.clear();
            None
        }
        KeyCode::Enter => {
            view_state.search_mode = false;
            Some(UserCommand::Search(std::mem::take(&mut view_state.search_text)))
        }
        KeyCode::Backspace => {
            view_state.search_text.pop();
            None
        }
        KeyCode::Char(c) => {
            if view_state.search_text.chars().count() < MAX_SEARCH_LEN {
                view_state.search_text.push(c);
            }
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
