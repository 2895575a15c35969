//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`structure`]: the data structure with highlight colours and pointer markers
//! - [`log`]: the operation log, scrollable
//! - [`stats`]: algorithm descriptor, counters, speed, the operation menu and the input line
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each pane module exports a `render_*` function taking the frame, its area and the
//! data it shows. Panes never mutate visualizer state.

pub mod log;
pub mod stats;
pub mod status;
pub mod structure;

pub use log::render_log_pane;
pub use stats::{render_stats_pane, StatsRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use structure::render_structure_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane block, highlighted when focused
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
