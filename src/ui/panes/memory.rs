//! Memory pane rendering
//!
//! Materialized cells are shown in decimal, a fixed number per row, each row
//! prefixed with the index of its first cell. The current cell is drawn on a
//! highlighted block and the header line repeats its index, value and the
//! character that value prints as.

use super::{clamp_scroll, pane_block};
use crate::memory::MemoryStore;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Columns taken by one cell: three digits and a separating space
const CELL_WIDTH: usize = 4;

/// Columns taken by the row label
const LABEL_WIDTH: usize = 6;

/// How many cells fit on one row of a pane `inner_width` columns wide
pub fn cells_per_row(inner_width: usize) -> usize {
    (inner_width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH).max(1)
}

/// Printable form of a cell value, for the header line
pub fn printable(value: u8) -> String {
    match value {
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        0x20..=0x7e => (value as char).to_string(),
        _ => format!("\\x{:02x}", value),
    }
}

/// Render the memory pane
pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    memory: &MemoryStore,
    is_focused: bool,
    follow: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Memory ({} cells) ", memory.len());
    let block = pane_block(&title, is_focused);

    let inner_width = area.width.saturating_sub(2) as usize;
    let visible_height = area.height.saturating_sub(3).max(1) as usize; // borders + header
    let per_row = cells_per_row(inner_width);

    let cells = memory.cells().into_vec();
    let current = memory.position();

    let header = Line::from(vec![
        Span::styled(" ptr ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            current.to_string(),
            Style::default().fg(DEFAULT_THEME.pointer),
        ),
        Span::styled("  value ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            memory.current().to_string(),
            Style::default()
                .fg(DEFAULT_THEME.number)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  '{}'", printable(memory.current())),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
    ]);

    let rows: Vec<Line> = cells
        .chunks(per_row)
        .enumerate()
        .map(|(row, chunk)| {
            let first = row * per_row;
            let mut spans = vec![Span::styled(
                format!("{:>4}│ ", first),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            for (col, value) in chunk.iter().enumerate() {
                let style = if first + col == current {
                    Style::default()
                        .bg(DEFAULT_THEME.highlight_bg)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else if *value == 0 {
                    Style::default().fg(DEFAULT_THEME.comment)
                } else {
                    Style::default().fg(DEFAULT_THEME.number)
                };
                spans.push(Span::styled(format!("{:>3}", value), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    if follow {
        let current_row = current / per_row;
        if current_row < *scroll_offset {
            *scroll_offset = current_row;
        } else if current_row >= *scroll_offset + visible_height {
            *scroll_offset = current_row + 1 - visible_height;
        }
    }
    clamp_scroll(scroll_offset, rows.len(), visible_height);

    let mut lines = vec![header];
    lines.extend(rows.into_iter().skip(*scroll_offset).take(visible_height));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_per_row() {
        assert_eq!(cells_per_row(0), 1);
        assert_eq!(cells_per_row(46), 10);
    }

    #[test]
    fn test_printable() {
        assert_eq!(printable(b'A'), "A");
        assert_eq!(printable(b'\n'), "\\n");
        assert_eq!(printable(0), "\\x00");
        assert_eq!(printable(255), "\\xff");
    }
}
