//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub is_error: bool,
    /// Position within the recorded history of the last run
    pub current_step: usize,
    pub total_steps: usize,
    pub is_animating: bool,
    pub is_paused: bool,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // Left side: step info and status
    let step_text = if data.total_steps == 0 {
        " Step -/- ".to_string()
    } else {
        format!(" Step {}/{} ", data.current_step + 1, data.total_steps)
    };

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let keys: [(&str, &str); 7] = [
        (" [/] ", " op "),
        (" ↵ ", " run "),
        (" ⎵ ", " pause "),
        (" </> ", " speed "),
        (" ←/→ ", " step "),
        (" r ", " reset "),
        (" q ", " quit "),
    ];
    let mut right_spans = Vec::new();
    for (idx, (key, desc)) in keys.iter().enumerate() {
        if idx > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let badge = if data.is_animating && data.is_paused {
        Some((" ⏸ PAUSED ", DEFAULT_THEME.warning))
    } else if data.is_animating {
        Some((" ▶ RUNNING ", DEFAULT_THEME.secondary))
    } else if data.total_steps > 0 && data.current_step + 1 >= data.total_steps {
        Some((" END ", DEFAULT_THEME.success))
    } else if data.total_steps > 0 {
        Some((" REPLAY ", DEFAULT_THEME.accent))
    } else {
        None
    };
    if let Some((text, color)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
