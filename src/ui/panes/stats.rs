//! Statistics pane rendering

use super::pane_block;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::executor::Outcome;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<10}", label),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// One-line description of how the run ended
pub fn outcome_summary(interpreter: &Interpreter) -> (String, Style) {
    match interpreter.outcome() {
        Some(Outcome::Completed(_)) => (
            "completed".to_string(),
            Style::default().fg(DEFAULT_THEME.success),
        ),
        Some(Outcome::Malformed { bracket, .. }) => (
            format!("malformed: {}", bracket),
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            "stopped before halting".to_string(),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
    }
}

/// Render the statistics pane
pub fn render_stats_pane(frame: &mut Frame, area: Rect, interpreter: &Interpreter, is_focused: bool) {
    let block = pane_block(" Statistics ", is_focused);
    let stats = interpreter.stats();

    let (summary, summary_style) = outcome_summary(interpreter);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {:<10}", "run"),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(summary, summary_style),
        ]),
        row("steps", stats.steps.to_string()),
        row("jumps", stats.jumps.to_string()),
        row("peak cells", stats.peak_cells.to_string()),
        row(
            "history",
            format!(
                "{} snapshots, {} KiB",
                interpreter.total_snapshots(),
                interpreter.snapshot_memory_usage() / 1024
            ),
        ),
        Line::from(""),
    ];

    lines.extend(stats.ranked().into_iter().map(|(instruction, count)| {
        Line::from(vec![
            Span::styled(
                format!(" {:>3} ", instruction.symbol().escape_debug().to_string()),
                Style::default().fg(DEFAULT_THEME.primary),
            ),
            Span::styled(
                format!("{:<6}", instruction.name()),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(count.to_string(), Style::default().fg(DEFAULT_THEME.number)),
        ])
    }));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
