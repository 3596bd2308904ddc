//! Keyboard input handling for the TUI

use super::app::{App, Banner, Mode, UiAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a keyboard event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled, continue running
    Handled,
    /// Run an action against the provider or the local files
    Action(UiAction),
    /// Leave the console
    Quit,
    /// Key was not handled (no action taken)
    Unhandled,
}

/// Keyboard event handler
///
/// Dispatches on the current [`Mode`]; only normal mode starts actions
/// directly.
pub struct KeyHandler;

impl KeyHandler {
    pub fn handle<C>(app: &mut App<C>, key: KeyEvent) -> KeyResult {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyResult::Quit;
        }

        match app.mode {
            Mode::Normal => Self::handle_normal(app, key),
            Mode::Prompt { .. } => Self::handle_prompt(app, key),
            Mode::Confirm(_) => Self::handle_confirm(app, key),
            Mode::Help => {
                app.mode = Mode::Normal;
                KeyResult::Handled
            }
        }
    }

    fn handle_prompt<C>(app: &mut App<C>, key: KeyEvent) -> KeyResult {
        let Mode::Prompt { input } = &mut app.mode else {
            return KeyResult::Unhandled;
        };

        match key.code {
            KeyCode::Enter => {
                let instance_id = input.trim().to_string();
                app.mode = Mode::Normal;
                if instance_id.is_empty() {
                    app.banner = Some(Banner::Info("No instance id entered".to_string()));
                    return KeyResult::Handled;
                }
                return KeyResult::Action(UiAction::LoadConfiguration(instance_id));
            }
            KeyCode::Esc => app.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => return KeyResult::Unhandled,
        }
        KeyResult::Handled
    }

    fn handle_confirm<C>(app: &mut App<C>, key: KeyEvent) -> KeyResult {
        let Mode::Confirm(action) = std::mem::take(&mut app.mode) else {
            return KeyResult::Unhandled;
        };

        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => KeyResult::Action(action),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => KeyResult::Handled,
            _ => {
                app.mode = Mode::Confirm(action);
                KeyResult::Handled
            }
        }
    }

    fn handle_normal<C>(app: &mut App<C>, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyResult::Quit,
            KeyCode::Tab | KeyCode::BackTab => app.switch_kind(),
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char(' ') => app.toggle_current(),
            KeyCode::Char('a') => app.select_all(),
            KeyCode::Char('n') => app.clear_selection(),
            KeyCode::Char('c') => app.begin_prompt(),
            KeyCode::Char('l') => return KeyResult::Action(UiAction::Load(app.active)),
            KeyCode::Char('d') => {
                if let Some(action) = app.request_delete() {
                    return KeyResult::Action(action);
                }
            }
            KeyCode::Char('A') => {
                if app.active.supports_analysis() {
                    return KeyResult::Action(UiAction::Analyse);
                }
                app.banner = Some(Banner::Info(
                    "Analysis is only available for queues".to_string(),
                ));
            }
            KeyCode::Char('C') => app.request_clear(),
            KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),
            _ => return KeyResult::Unhandled,
        }
        KeyResult::Handled
    }
}
