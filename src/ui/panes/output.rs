//! Output pane rendering

use super::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Split emitted bytes into display lines
pub fn output_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            line.chars()
                .map(|c| if c.is_control() { '·' } else { c })
                .collect()
        })
        .collect();
    // Remove trailing empty string if output ended with newline
    if lines.last().is_some_and(|s| s.is_empty()) {
        lines.pop();
    }
    lines
}

/// Render the output pane
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output: &[u8],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Output ({} bytes) ", output.len());
    let block = pane_block(&title, is_focused);

    let lines = output_lines(output);

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
    } else {
        let block = block.padding(Padding::new(1, 0, 0, 0));
        let all_items: Vec<ListItem> = lines
            .into_iter()
            .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.fg)))
            .collect();

        let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
        clamp_scroll(scroll_offset, all_items.len(), visible_height);

        let visible_items: Vec<ListItem> = all_items
            .into_iter()
            .skip(*scroll_offset)
            .take(visible_height)
            .collect();

        frame.render_widget(List::new(visible_items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_lines() {
        assert!(output_lines(b"").is_empty());
        assert_eq!(output_lines(b"Hello World!\n"), vec!["Hello World!"]);
        assert_eq!(output_lines(b"a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(output_lines(b"x\x07y"), vec!["x·y"]);
    }
}
