//! Color palette for the console TUI (Catppuccin Mocha)

use crate::aws::ErrorKind;
use crate::workflow::Phase;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    pub accent_primary: Color,
    pub accent_tertiary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub log_trace: Color,
    pub log_debug: Color,
    pub log_info: Color,
    pub log_warn: Color,
    pub log_error: Color,

    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_bg: Color,
    pub header_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl Theme {
    /// https://github.com/catppuccin/catppuccin
    pub fn catppuccin_mocha() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),        // Base
            fg: Color::Rgb(205, 214, 244),     // Text
            fg_dim: Color::Rgb(147, 153, 178), // Subtext0

            accent_primary: Color::Rgb(137, 180, 250), // Blue
            accent_tertiary: Color::Rgb(250, 179, 135), // Peach

            success: Color::Rgb(166, 227, 161), // Green
            warning: Color::Rgb(249, 226, 175), // Yellow
            error: Color::Rgb(243, 139, 168),   // Red
            info: Color::Rgb(137, 180, 250),    // Blue

            log_trace: Color::Rgb(108, 112, 134), // Overlay0
            log_debug: Color::Rgb(148, 226, 213), // Teal
            log_info: Color::Rgb(137, 180, 250),  // Blue
            log_warn: Color::Rgb(249, 226, 175),  // Yellow
            log_error: Color::Rgb(243, 139, 168), // Red

            border_focused: Color::Rgb(180, 190, 254), // Lavender
            border_unfocused: Color::Rgb(69, 71, 90),  // Surface1
            selection_bg: Color::Rgb(69, 71, 90),      // Surface1
            header_bg: Color::Rgb(49, 50, 68),         // Surface0
        }
    }

    pub fn phase_color(&self, phase: Phase) -> Color {
        match phase {
            Phase::Empty => self.fg_dim,
            Phase::Loaded => self.info,
            Phase::Selected => self.warning,
            Phase::Applied => self.success,
        }
    }

    /// Banner color for a failed action
    pub fn error_kind_color(&self, kind: ErrorKind) -> Color {
        match kind {
            ErrorKind::LocalIo | ErrorKind::Throttled => self.warning,
            ErrorKind::NotFound | ErrorKind::AccessDenied | ErrorKind::Unknown => self.error,
        }
    }

    pub fn block_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn block_unfocused(&self) -> Style {
        Style::default().fg(self.border_unfocused)
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.accent_tertiary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn bold(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.bg).bg(self.accent_primary)
    }

    /// Keyboard shortcut badge
    pub fn key_badge(&self) -> Style {
        Style::default().fg(self.bg).bg(self.fg_dim)
    }
}

/// Global theme instance
pub fn theme() -> &'static Theme {
    static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();
    THEME.get_or_init(Theme::default)
}
