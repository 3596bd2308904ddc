//! UI rendering

use crate::tui::app::{App, Banner, Mode, UiAction};
use crate::tui::theme;
use crate::tui::widgets::{analysis, resource_table};
use connect_console_common::ResourceKind;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

/// Render the entire UI
pub fn render<C>(frame: &mut Frame, app: &mut App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Tabs
            Constraint::Min(8),    // Table (and analysis)
            Constraint::Length(3), // Banner
            Constraint::Length(7), // Logs
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);

    let show_analysis = app.active == ResourceKind::Queue && !app.session.analysis.is_empty();
    if show_analysis {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        resource_table::render(frame, main[0], app);
        analysis::render(frame, main[1], &app.session.analysis);
    } else {
        resource_table::render(frame, chunks[2], app);
    }

    render_banner(frame, chunks[3], app);
    render_tracing_logs(frame, chunks[4]);
    render_help_bar(frame, chunks[5]);

    match &app.mode {
        Mode::Normal => {}
        Mode::Help => render_help_popup(frame),
        Mode::Prompt { input } => render_prompt_popup(frame, input),
        Mode::Confirm(action) => render_confirm_popup(frame, app, action),
    }
}

fn render_header<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let t = theme::theme();

    let instance = app
        .session
        .instance_id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "no instance (press c)".to_string());
    let status = app.busy.as_deref().unwrap_or("Ready");

    let header_text = format!(
        " connect-console │ {} │ {} │ {} ",
        instance,
        app.store().dir().display(),
        status
    );

    frame.render_widget(Paragraph::new(header_text).style(t.header_style()), area);
}

fn render_tabs<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let t = theme::theme();

    let titles: Vec<Line> = ResourceKind::ALL
        .iter()
        .map(|&kind| {
            let phase = app.session.phase(kind);
            Line::from(vec![
                Span::raw(format!(
                    " {} ({}/{}) ",
                    kind.label(),
                    app.session.selected_count(kind),
                    app.session.row_count(kind)
                )),
                Span::styled(phase.as_str(), Style::default().fg(t.phase_color(phase))),
            ])
        })
        .collect();

    let selected = ResourceKind::ALL
        .iter()
        .position(|&kind| kind == app.active)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(t.dim())
        .highlight_style(t.bold().bg(t.header_bg))
        .divider("│");
    frame.render_widget(tabs, area);
}

fn render_banner<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let t = theme::theme();

    let (text, color) = match &app.banner {
        None => (vec![Line::from("")], t.fg_dim),
        Some(Banner::Success(message)) => (vec![Line::from(format!("✓ {message}"))], t.success),
        Some(Banner::Info(message)) => (vec![Line::from(message.clone())], t.info),
        Some(Banner::Failure(e)) => {
            let mut lines = vec![Line::from(format!("✗ {}: {}", e.kind.banner(), e.message))];
            if let Some(hint) = e.suggestion() {
                lines.push(Line::from(Span::styled(hint, t.dim())));
            }
            (lines, t.error_kind_color(e.kind))
        }
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(t.block_unfocused());
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Render tracing logs widget with colorized log levels
fn render_tracing_logs(frame: &mut Frame, area: Rect) {
    let t = theme::theme();

    let widget = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .borders(Borders::ALL)
                .border_style(t.block_unfocused()),
        )
        .style(Style::default().fg(t.fg))
        .output_level(Some(TuiLoggerLevelOutput::Long))
        .output_file(false)
        .output_line(false)
        .style_error(Style::default().fg(t.log_error))
        .style_warn(Style::default().fg(t.log_warn))
        .style_info(Style::default().fg(t.log_info))
        .style_debug(Style::default().fg(t.log_debug))
        .style_trace(Style::default().fg(t.log_trace));

    frame.render_widget(widget, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let t = theme::theme();
    let key_style = t.key_badge();

    let mut spans = Vec::new();
    for (key, label) in [
        ("Tab", "Switch"),
        ("Space", "Mark"),
        ("l", "Load"),
        ("d", "Delete"),
        ("A", "Analyse"),
        ("c", "Instance"),
        ("?", "Help"),
        ("q", "Quit"),
    ] {
        spans.push(Span::styled(format!(" {key} "), key_style));
        spans.push(Span::styled(format!(" {label} "), t.dim()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_popup(frame: &mut Frame) {
    let t = theme::theme();
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let section_style = t.bold();
    let entry = |keys: &'static str, text: &'static str| {
        Line::from(Span::styled(format!("  {keys:<12} {text}"), t.text()))
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  Navigation", section_style)),
        Line::from(""),
        entry("Tab", "Switch between queues and flows"),
        entry("↑ / k", "Previous row"),
        entry("↓ / j", "Next row"),
        Line::from(""),
        Line::from(Span::styled("  Selection", section_style)),
        Line::from(""),
        entry("Space", "Mark / unmark row"),
        entry("a", "Mark all rows"),
        entry("n", "Unmark all rows"),
        Line::from(""),
        Line::from(Span::styled("  Actions", section_style)),
        Line::from(""),
        entry("c", "Load instance configuration"),
        entry("l", "Fetch the active list"),
        entry("d", "Delete marked rows"),
        entry("A", "List quick connects of marked queues"),
        entry("C", "Remove local snapshot files"),
        Line::from(""),
        Line::from(Span::styled("  General", section_style)),
        Line::from(""),
        entry("? / F1", "Toggle this help"),
        entry("q / Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", t.dim())),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(t.block_focused())
        .style(Style::default().bg(t.bg));

    frame.render_widget(
        Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_prompt_popup(frame: &mut Frame, input: &str) {
    let t = theme::theme();
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Amazon Connect instance id:", t.text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(input.to_string(), t.bold()),
            Span::styled("█", t.dim()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Enter to load, Esc to cancel", t.dim())),
    ];

    let block = Block::default()
        .title(" Load Configuration ")
        .borders(Borders::ALL)
        .border_style(t.block_focused())
        .style(Style::default().bg(t.bg));

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_confirm_popup<C>(frame: &mut Frame, app: &App<C>, action: &UiAction) {
    let t = theme::theme();
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);

    let question = match action {
        UiAction::Delete(kind) => format!(
            "Delete {} {} from the instance?",
            app.session.selected_count(*kind),
            kind.label().to_lowercase()
        ),
        UiAction::Clear => "Remove all local snapshot files?".to_string(),
        other => format!("{}?", other.label()),
    };

    let key_style = t.key_badge();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(question, t.text())),
        Line::from(""),
        Line::from(Span::styled("This cannot be undone.", t.warning_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y ", key_style),
            Span::styled(" Yes  ", t.text()),
            Span::styled(" n ", key_style),
            Span::styled(" No ", t.text()),
        ]),
    ];

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(t.block_focused())
        .style(Style::default().bg(t.bg));

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
