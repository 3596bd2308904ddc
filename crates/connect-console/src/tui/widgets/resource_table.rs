//! Editable snapshot table with a mark column

use crate::tui::app::App;
use crate::tui::theme;
use crate::tui::truncate_str;
use connect_console_common::{FlowRecord, QueueRecord, ResourceKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

const MARKED: &str = "[x]";
const UNMARKED: &str = "[ ]";

fn mark(selected: bool) -> &'static str {
    if selected {
        MARKED
    } else {
        UNMARKED
    }
}

fn queue_row(queue: &QueueRecord, selected: bool, name_width: usize) -> Row<'static> {
    Row::new(vec![
        Cell::from(mark(selected)),
        Cell::from(truncate_str(&queue.name, name_width)),
        Cell::from(queue.id.clone()),
        Cell::from(queue.queue_type.clone().unwrap_or_default()),
    ])
}

fn flow_row(flow: &FlowRecord, selected: bool, name_width: usize) -> Row<'static> {
    Row::new(vec![
        Cell::from(mark(selected)),
        Cell::from(truncate_str(&flow.name, name_width)),
        Cell::from(flow.id.clone()),
        Cell::from(flow.contact_flow_type.clone()),
        Cell::from(flow.contact_flow_status.clone().unwrap_or_default()),
    ])
}

/// Render the table of the active kind
pub fn render<C>(frame: &mut Frame, area: Rect, app: &mut App<C>) {
    let t = theme::theme();
    let kind = app.active;

    let title = format!(
        " {} │ {} selected ",
        kind.label(),
        app.session.selected_count(kind)
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(t.block_focused());

    if app.session.row_count(kind) == 0 {
        let hint = Paragraph::new(format!(
            "No {} loaded. Press 'l' to fetch them.",
            kind.label().to_lowercase()
        ))
        .style(t.dim())
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(70).max(12);

    let (header, widths, rows): (Vec<&str>, Vec<Constraint>, Vec<Row>) = match kind {
        ResourceKind::Queue => (
            vec!["", "Name", "Id", "Type"],
            vec![
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(38),
                Constraint::Length(10),
            ],
            app.session
                .queues
                .snapshot
                .iter()
                .map(|q| queue_row(q, app.session.queues.is_selected(q), name_width))
                .collect(),
        ),
        ResourceKind::ContactFlow => (
            vec!["", "Name", "Id", "Type", "Status"],
            vec![
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(38),
                Constraint::Length(18),
                Constraint::Length(10),
            ],
            app.session
                .flows
                .snapshot
                .iter()
                .map(|f| flow_row(f, app.session.flows.is_selected(f), name_width))
                .collect(),
        ),
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(t.table_header()))
        .block(block)
        .row_highlight_style(t.selection().add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, app.table_state_mut(kind));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_column() {
        assert_eq!(mark(true), "[x]");
        assert_eq!(mark(false), "[ ]");
    }
}
