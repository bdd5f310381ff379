//! Program pane rendering
//!
//! The program is laid out as a flat run of symbols wrapped to the pane width,
//! so every instruction occupies exactly one column. Line breaks in the
//! program text are shown as `↵` and other control characters as `·`.
//!
//! The current instruction is drawn on a highlighted block. While
//! `follow` is set the pane scrolls to keep it in view.

use super::{clamp_scroll, pane_block};
use crate::memory::ProgramStore;
use crate::parser::Instruction;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn display_char(instruction: Instruction) -> char {
    match instruction {
        Instruction::Other('\n') => '↵',
        Instruction::Other(c) if c.is_control() => '·',
        other => other.symbol(),
    }
}

fn symbol_style(instruction: Instruction) -> Style {
    match instruction {
        Instruction::LoopStart | Instruction::LoopEnd => Style::default()
            .fg(DEFAULT_THEME.bracket)
            .add_modifier(Modifier::BOLD),
        Instruction::Increment | Instruction::Decrement => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        Instruction::MoveRight | Instruction::MoveLeft => {
            Style::default().fg(DEFAULT_THEME.pointer)
        }
        Instruction::Print => Style::default()
            .fg(DEFAULT_THEME.success)
            .add_modifier(Modifier::BOLD),
        Instruction::Other(_) => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Render the program pane
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    program: &ProgramStore,
    is_focused: bool,
    follow: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(
        " Program (pc {}/{}) ",
        program.position() + 1,
        program.len()
    );
    let block = pane_block(&title, is_focused);

    let width = area.width.saturating_sub(2).max(1) as usize;
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let instructions = program.as_tape().into_vec();
    let current = program.position();

    let rows: Vec<Line> = instructions
        .chunks(width)
        .enumerate()
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, &instruction)| {
                    let style = if row * width + col == current {
                        Style::default()
                            .bg(DEFAULT_THEME.highlight_bg)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        symbol_style(instruction)
                    };
                    Span::styled(display_char(instruction).to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    if follow {
        let current_row = current / width;
        if current_row < *scroll_offset {
            *scroll_offset = current_row;
        } else if current_row >= *scroll_offset + visible_height {
            *scroll_offset = current_row + 1 - visible_height;
        }
    }
    clamp_scroll(scroll_offset, rows.len(), visible_height);

    let visible: Vec<Line> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
