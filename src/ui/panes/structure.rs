//! Structure pane: draws the live snapshot
//!
//! Sorting arrays are drawn as a bar chart, other sequences as a row of boxed
//! cells with pointer markers underneath, linked lists as a chain, hash
//! tables as one row per bucket and trees as an ASCII layout with `/` and `\`
//! edges. Every cell is coloured by its highlight tone.

use super::pane_block;
use crate::render::{Bucket, Cell, Drawing, Tone, TreeLayout};
use crate::snapshot::StructureKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph},
    Frame,
};

/// Render the structure pane
pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    drawing: &Drawing,
    kind: StructureKind,
    is_focused: bool,
) {
    let block = pane_block(" Structure ", is_focused);

    if let (StructureKind::Sorting, Drawing::Sequence(cells)) = (kind, drawing) {
        if !cells.is_empty() {
            render_bars(frame, area, cells, block);
            return;
        }
    }

    let lines = match drawing {
        Drawing::Sequence(cells) => sequence_lines(cells),
        Drawing::Chain(cells) => chain_lines(cells),
        Drawing::Buckets(buckets) => bucket_lines(buckets),
        Drawing::Tree(layout) => tree_lines(layout),
    };

    let paragraph = if lines.is_empty() {
        Paragraph::new("(empty)")
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .alignment(Alignment::Center)
    } else {
        Paragraph::new(lines)
    };
    frame.render_widget(paragraph.block(block), area);
}

fn tone_style(cell: &Cell) -> Style {
    Style::default()
        .fg(DEFAULT_THEME.tone(cell.tone))
        .add_modifier(Modifier::BOLD)
}

fn render_bars(frame: &mut Frame, area: Rect, cells: &[Cell], block: Block<'_>) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = (inner_width / cells.len()).saturating_sub(1).clamp(1, 6) as u16;

    let bars: Vec<Bar> = cells
        .iter()
        .map(|cell| {
            let color = DEFAULT_THEME.tone(cell.tone);
            let value = cell.label.parse::<i64>().unwrap_or_default().max(0) as u64;
            Bar::default()
                .value(value)
                .text_value(cell.label.clone())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

/// Boxed cells on one line, markers on the next
fn sequence_lines(cells: &[Cell]) -> Vec<Line<'static>> {
    if cells.is_empty() {
        return Vec::new();
    }
    let width = cells.iter().map(|c| c.label.len()).max().unwrap_or(1).max(5) + 2;

    let mut boxes = Vec::new();
    let mut markers = Vec::new();
    for cell in cells {
        boxes.push(Span::styled(
            format!("[{:^w$}]", cell.label, w = width - 2),
            tone_style(cell),
        ));
        boxes.push(Span::raw(" "));
        markers.push(Span::styled(
            format!("{:^w$} ", cell.markers.join("/"), w = width),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }
    vec![Line::from(boxes), Line::from(markers)]
}

fn chain_lines(cells: &[Cell]) -> Vec<Line<'static>> {
    if cells.is_empty() {
        return vec![Line::styled(
            "head → null",
            Style::default().fg(DEFAULT_THEME.comment),
        )];
    }
    let mut spans = Vec::new();
    for cell in cells {
        spans.push(Span::styled(format!("[ {} ]", cell.label), tone_style(cell)));
        spans.push(Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)));
    }
    spans.push(Span::styled("null", Style::default().fg(DEFAULT_THEME.comment)));
    vec![Line::from(spans), Line::styled("  ^ head", Style::default().fg(DEFAULT_THEME.comment))]
}

fn bucket_lines(buckets: &[Bucket]) -> Vec<Line<'static>> {
    buckets
        .iter()
        .map(|bucket| {
            let index = Span::styled(
                format!(" {:>3} │ ", bucket.index),
                Style::default().fg(DEFAULT_THEME.comment),
            );
            let entry = match &bucket.entry {
                Some(cell) => Span::styled(cell.label.clone(), tone_style(cell)),
                None => Span::styled("·", Style::default().fg(DEFAULT_THEME.comment)),
            };
            Line::from(vec![index, entry])
        })
        .collect()
}

/// Lay the tree out on a character grid: node rows at even lines, edge rows
/// between them
fn tree_lines(layout: &TreeLayout) -> Vec<Line<'static>> {
    if layout.nodes.is_empty() {
        return Vec::new();
    }
    let slot = layout
        .nodes
        .iter()
        .map(|n| n.cell.label.chars().count())
        .max()
        .unwrap_or(1)
        .max(2)
        + 2;
    let width = layout.nodes.len() * slot;
    let rows = layout.depth * 2 - 1;
    let blank = (' ', Style::default());
    let mut grid = vec![vec![blank; width]; rows];
    let center = |column: usize| column * slot + slot / 2;

    for node in &layout.nodes {
        let label: Vec<char> = node.cell.label.chars().collect();
        let start = center(node.column).saturating_sub(label.len() / 2);
        for (offset, ch) in label.into_iter().enumerate() {
            if let Some(target) = grid[node.depth * 2].get_mut(start + offset) {
                *target = (ch, tone_style(&node.cell));
            }
        }
    }

    for edge in &layout.edges {
        let (Some(from), Some(to)) = (layout.node(edge.from), layout.node(edge.to)) else {
            continue;
        };
        let (a, b) = (center(from.column), center(to.column));
        let ch = if b < a { '/' } else { '\\' };
        let color = if edge.on_path {
            DEFAULT_THEME.tone(Tone::Path)
        } else {
            DEFAULT_THEME.comment
        };
        if let Some(target) = grid[from.depth * 2 + 1].get_mut((a + b) / 2) {
            *target = (ch, Style::default().fg(color));
        }
    }

    grid.into_iter().map(grid_row_to_line).collect()
}

/// Merge runs of equally styled characters into spans
fn grid_row_to_line(row: Vec<(char, Style)>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (ch, style) in row {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout_tree;
    use crate::snapshot::{Highlights, IdAllocator, Tree};

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_tree_lines_draw_edges_between_levels() {
        let mut ids = IdAllocator::new();
        let tree = Tree::bst_from_values(&[50, 30, 70], &mut ids);
        let lines = tree_lines(&layout_tree(&tree, &Highlights::default()));

        assert_eq!(lines.len(), 3);
        assert_eq!(plain(&lines[0]).trim(), "50");
        let edges = plain(&lines[1]);
        assert!(edges.contains('/') && edges.contains('\\'));
        let leaves = plain(&lines[2]);
        assert!(leaves.find("30") < leaves.find("70"));
    }
}
