//! Operation log pane

use super::pane_block;
use crate::log::LogRecorder;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the log pane. `scroll_offset` of `usize::MAX` follows the newest entry.
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    log: &LogRecorder,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Log ", is_focused);

    if log.is_empty() {
        let paragraph = Paragraph::new("(no entries)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = log
        .entries()
        .map(|entry| {
            let color = DEFAULT_THEME.log_kind(entry.kind);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4} ", entry.step_index),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<8}", entry.kind.label()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
