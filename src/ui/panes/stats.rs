//! Stats pane: what is loaded, how far the run got, and what can be run next

use super::pane_block;
use crate::drivers::AlgorithmInfo;
use crate::snapshot::{Counters, StructureKind};
use crate::ui::menu::MenuItem;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

pub struct StatsRenderData<'a> {
    pub kind: StructureKind,
    pub info: &'a AlgorithmInfo,
    pub counters: Counters,
    pub speed: u8,
    pub delay: Duration,
    pub menu: &'a [MenuItem],
    pub selected: usize,
    pub input: &'a str,
}

/// Render the stats pane
pub fn render_stats_pane(frame: &mut Frame, area: Rect, data: StatsRenderData, is_focused: bool) {
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.fg);
    let heading = Style::default()
        .fg(DEFAULT_THEME.primary)
        .add_modifier(Modifier::BOLD);

    // visits and structural changes share the swap counter
    let swaps_label = match data.kind {
        StructureKind::Sorting => "Swaps",
        _ => "Operations",
    };

    let mut lines = vec![
        Line::from(Span::styled(data.info.name.clone(), heading)),
        Line::from(vec![
            Span::styled("Family      ", label),
            Span::styled(data.kind.name(), value),
        ]),
        Line::from(vec![
            Span::styled("Complexity  ", label),
            Span::styled(data.info.complexity.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Difficulty  ", label),
            Span::styled(data.info.difficulty.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Comparisons ", label),
            Span::styled(data.counters.comparisons.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", swaps_label), label),
            Span::styled(data.counters.swaps.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Speed       ", label),
            Span::styled(
                format!("{} ({} ms/step)", data.speed, data.delay.as_millis()),
                value,
            ),
        ]),
        Line::raw(""),
        Line::from(Span::styled("Operations", heading)),
    ];

    for (idx, item) in data.menu.iter().enumerate() {
        let selected = idx == data.selected;
        let marker = if selected { "▶ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            value
        };
        let mut spans = vec![Span::styled(format!("{}{}", marker, item.label()), style)];
        if !item.params().is_empty() {
            spans.push(Span::styled(format!(" ({})", item.params()), label));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Input ", label),
        Span::styled(
            format!("{}▏", data.input),
            Style::default().fg(DEFAULT_THEME.warning),
        ),
    ]));

    let paragraph = Paragraph::new(lines).block(pane_block(" Stats ", is_focused));
    frame.render_widget(paragraph, area);
}
