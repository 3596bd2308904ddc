//! Quick connects found by the last queue analysis

use crate::tui::theme;
use crate::workflow::QueueAnalysis;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

fn items(analysis: &[QueueAnalysis]) -> Vec<ListItem<'static>> {
    let t = theme::theme();
    let mut items = Vec::new();

    for queue in analysis {
        items.push(ListItem::new(Line::from(vec![
            Span::styled(queue.queue_name.clone(), t.bold()),
            Span::styled(format!(" ({})", queue.quick_connects.len()), t.dim()),
        ])));

        if queue.quick_connects.is_empty() {
            items.push(ListItem::new(Span::styled("  no quick connects", t.dim())));
        }
        for quick_connect in &queue.quick_connects {
            let kind = quick_connect.quick_connect_type.as_deref().unwrap_or("-");
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("  {}", quick_connect.name), t.text()),
                Span::styled(format!(" {kind}"), t.dim()),
            ])));
        }
    }

    items
}

pub fn render(frame: &mut Frame, area: Rect, analysis: &[QueueAnalysis]) {
    let t = theme::theme();

    let list = List::new(items(analysis)).block(
        Block::default()
            .title(" Quick connects ")
            .borders(Borders::ALL)
            .border_style(t.block_unfocused()),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_console_common::QuickConnectRecord;

    #[test]
    fn test_one_line_per_queue_and_quick_connect() {
        let analysis = vec![
            QueueAnalysis {
                queue_id: "q-1".to_string(),
                queue_name: "Support".to_string(),
                quick_connects: vec![QuickConnectRecord {
                    id: "qc-1".to_string(),
                    arn: "arn:qc-1".to_string(),
                    name: "Escalation".to_string(),
                    quick_connect_type: Some("QUEUE".to_string()),
                }],
            },
            QueueAnalysis {
                queue_id: "q-2".to_string(),
                queue_name: "Sales".to_string(),
                quick_connects: Vec::new(),
            },
        ];

        assert_eq!(items(&analysis).len(), 4);
    }
}
