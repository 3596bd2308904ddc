//! Terminal UI for the console

mod app;
pub mod input;
pub mod log_capture;
pub mod theme;
mod ui;
pub mod widgets;

use crate::aws::ConnectOperations;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

pub use app::{App, Banner, Mode, UiAction};
pub use input::{KeyHandler, KeyResult};
pub use log_capture::{LogCapture, LogCaptureLayer};

/// Truncate a string to fit within a maximum display width, adding ellipsis if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Take over the terminal and run `app` until the operator quits
pub async fn run_tui<C: ConnectOperations>(app: &mut App<C>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
