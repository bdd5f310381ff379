//! Main TUI application state and logic

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::ui::panes::{self, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between two auto-play steps
const PLAY_INTERVAL: Duration = Duration::from_millis(120);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Memory,
    Output,
    Stats,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: program -> output -> memory -> stats)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Memory,
            FocusedPane::Memory => FocusedPane::Stats,
            FocusedPane::Stats => FocusedPane::Program,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Stats,
            FocusedPane::Output => FocusedPane::Program,
            FocusedPane::Memory => FocusedPane::Output,
            FocusedPane::Stats => FocusedPane::Memory,
        }
    }
}

/// The main application state
pub struct App {
    /// The interpreter, already run, whose history is being browsed
    pub interpreter: Interpreter,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub program_scroll: usize,
    pub memory_scroll: usize,
    pub output_scroll: usize,

    /// Keep the program / memory cursors in view; cleared by manual scrolling
    pub follow_cursor: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app browsing the interpreter's history
    pub fn new(interpreter: Interpreter) -> Self {
        App {
            interpreter,
            focused_pane: FocusedPane::Program,
            program_scroll: 0,
            memory_scroll: 0,
            output_scroll: 0,
            follow_cursor: true,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.interpreter.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.after_step();
                } else {
                    // No more steps available
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Program (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        // Right column: Memory (top) | Statistics (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let machine = self.interpreter.machine();

        panes::render_program_pane(
            frame,
            left_rows[0],
            machine.program(),
            self.focused_pane == FocusedPane::Program,
            self.follow_cursor,
            &mut self.program_scroll,
        );

        panes::render_output_pane(
            frame,
            left_rows[1],
            machine.output().as_slice(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_memory_pane(
            frame,
            right_rows[0],
            machine.memory(),
            self.focused_pane == FocusedPane::Memory,
            self.follow_cursor,
            &mut self.memory_scroll,
        );

        panes::render_stats_pane(
            frame,
            right_rows[1],
            &self.interpreter,
            self.focused_pane == FocusedPane::Stats,
        );

        panes::render_status_bar(
            frame,
            status_area,
            &StatusRenderData {
                message: &self.status_message,
                current_step: self.interpreter.history_position(),
                total_steps: self.interpreter.total_snapshots(),
                is_fault: self.interpreter.fault().is_some(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.interpreter.step_forward().is_ok() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.after_step();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                self.follow_cursor = false;
                match self.focused_pane {
                    FocusedPane::Program => {
                        self.program_scroll = self.program_scroll.saturating_sub(1)
                    }
                    FocusedPane::Memory => {
                        self.memory_scroll = self.memory_scroll.saturating_sub(1)
                    }
                    FocusedPane::Output => {
                        self.output_scroll = self.output_scroll.saturating_sub(1)
                    }
                    FocusedPane::Stats => {}
                }
            }
            KeyCode::Down => {
                self.follow_cursor = false;
                match self.focused_pane {
                    FocusedPane::Program => {
                        self.program_scroll = self.program_scroll.saturating_add(1)
                    }
                    FocusedPane::Memory => {
                        self.memory_scroll = self.memory_scroll.saturating_add(1)
                    }
                    FocusedPane::Output => {
                        self.output_scroll = self.output_scroll.saturating_add(1)
                    }
                    FocusedPane::Stats => {}
                }
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                match self.interpreter.jump_to_end() {
                    Ok(()) => self.status_message = "Jumped to end".to_string(),
                    Err(e) => self.status_message = e.to_string(),
                }
                self.after_step();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                match self.interpreter.rewind_to_start() {
                    Ok(()) => self.status_message = "Jumped to start".to_string(),
                    Err(e) => self.status_message = e.to_string(),
                }
                self.after_step();
            }
            _ => {}
        }
    }

    /// Re-enable cursor following and pin the output pane to its last line
    fn after_step(&mut self) {
        self.follow_cursor = true;
        self.output_scroll = usize::MAX;
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        match self.interpreter.step_forward() {
            Ok(()) => {
                self.status_message = match self.interpreter.fault() {
                    Some(bracket) => format!("Malformed program: {}", bracket),
                    None => match self.interpreter.last_executed() {
                        Some(instruction) => format!("Executed '{}'", instruction),
                        None => "Stepped forward".to_string(),
                    },
                };
                self.after_step();
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step forward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        match self.interpreter.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.after_step();
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(source: &str) -> App {
        let mut interpreter = Interpreter::from_source(source, Config::default()).unwrap();
        interpreter.run().unwrap();
        interpreter.rewind_to_start().unwrap();
        App::new(interpreter)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let mut pane = FocusedPane::Program;
        for _ in 0..4 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Program);
        assert_eq!(FocusedPane::Program.next().prev(), FocusedPane::Program);
    }

    #[test]
    fn test_arrow_keys_move_through_history() {
        let mut app = app("+++");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.interpreter.history_position(), 2);
        assert_eq!(app.status_message, "Executed '+'");

        press(&mut app, KeyCode::Left);
        assert_eq!(app.interpreter.history_position(), 1);
    }

    #[test]
    fn test_jump_keys() {
        let mut app = app("+>+>+");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.interpreter.history_position(), 5);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.interpreter.history_position(), 0);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.interpreter.history_position(), 3);
    }

    #[test]
    fn test_quit() {
        let mut app = app("+");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_shows_all_panes() {
        let mut app = app("++++++++[>++++++++<-]>+.");
        press(&mut app, KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Program"));
        assert!(text.contains("Memory"));
        assert!(text.contains("Output"));
        assert!(text.contains("Statistics"));
        assert!(text.contains("completed"));
    }
}
