//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`program`]: program text with the current instruction highlighted
//! - [`memory`]: materialized memory cells in decimal, current cell highlighted
//! - [`output`]: bytes emitted by `.` so far
//! - [`stats`]: run counters and the outcome of the run
//! - [`status`]: status bar with keybindings and history position
//!
//! Each pane module exports a `render_*` function taking the frame, its area,
//! the data to show, whether it is focused and (for scrollable panes) a
//! mutable scroll offset it clamps in place.

pub mod memory;
pub mod output;
pub mod program;
pub mod stats;
pub mod status;

pub use memory::render_memory_pane;
pub use output::render_output_pane;
pub use program::render_program_pane;
pub use stats::render_stats_pane;
pub use status::{render_status_bar, StatusRenderData};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border style shared by all panes
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

/// Clamp `offset` so that `total` rows fit a window of `visible` rows
pub(crate) fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
