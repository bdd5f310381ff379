// tapevm: time-travel zipper-tape VM with a memory-visualizing TUI

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tapevm::config::Config;
use tapevm::interpreter::engine::Interpreter;
use tapevm::interpreter::executor::Outcome;
use tapevm::ui::App;

#[derive(Parser, Debug)]
#[command(name = "tapevm", about = "Run and step through tape programs", version)]
struct Cli {
    /// Program file to run
    #[arg(required_unless_present = "eval", conflicts_with = "eval")]
    file: Option<PathBuf>,

    /// Program text given inline
    #[arg(short, long)]
    eval: Option<String>,

    /// Stop a program after this many steps (0 disables the limit)
    #[arg(long, default_value_t = tapevm::config::DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Snapshot history budget in MiB
    #[arg(long, default_value_t = tapevm::config::DEFAULT_SNAPSHOT_LIMIT / (1024 * 1024))]
    snapshot_limit_mb: usize,

    /// Print the final machine and statistics instead of starting the TUI
    #[arg(long)]
    dump: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config::default()
            .with_max_steps((self.max_steps > 0).then_some(self.max_steps))
            .with_snapshot_memory_limit(self.snapshot_limit_mb.saturating_mul(1024 * 1024))
            .with_history(!self.dump)
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tapevm=warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let source = if let Some(text) = &cli.eval {
        text.clone()
    } else if let Some(path) = &cli.file {
        match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path.display(), e);
                return Ok(ExitCode::FAILURE);
            }
        }
    } else {
        eprintln!("Error: no program given");
        return Ok(ExitCode::FAILURE);
    };

    let mut interpreter = match Interpreter::from_source(&source, cli.config()) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(bytes = source.len(), "program loaded");

    // Run execution to build history
    if let Err(e) = interpreter.run() {
        eprintln!("Runtime error: {}", e);
        if !e.keeps_history() {
            return Ok(ExitCode::FAILURE);
        }
        if !cli.dump {
            eprintln!("Entering TUI with partial execution history...");
        }
    }

    if cli.dump {
        return Ok(dump(&interpreter));
    }

    // Rewind to the beginning for TUI
    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(interpreter);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Exit status of `--dump`: the run completed
const EXIT_COMPLETED: u8 = 0;
/// Exit status of `--dump`: a limit stopped the run before it halted
const EXIT_STOPPED: u8 = 1;
/// Exit status of `--dump`: the program has an unmatched bracket
const EXIT_MALFORMED: u8 = 2;

/// Print the machine where the run ended, followed by its statistics
fn dump(interpreter: &Interpreter) -> ExitCode {
    println!("{}", interpreter.machine());

    let stats = interpreter.stats();
    println!();
    println!("steps: {}", stats.steps);
    println!("jumps: {}", stats.jumps);
    println!("peak cells: {}", stats.peak_cells);
    for (instruction, count) in stats.ranked() {
        println!("  {:<6} {:>10}", instruction.name(), count);
    }

    ExitCode::from(dump_status(interpreter))
}

fn dump_status(interpreter: &Interpreter) -> u8 {
    match interpreter.outcome() {
        Some(Outcome::Completed(_)) => EXIT_COMPLETED,
        Some(Outcome::Malformed { .. }) => EXIT_MALFORMED,
        None => EXIT_STOPPED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dumped(source: &str, max_steps: u64) -> Interpreter {
        let cli = Cli::parse_from([
            "tapevm",
            "--dump",
            "--max-steps",
            &max_steps.to_string(),
            "-e",
            source,
        ]);
        let mut interpreter = Interpreter::from_source(source, cli.config()).unwrap();
        let _ = interpreter.run();
        interpreter
    }

    #[test]
    fn test_dump_status_completed() {
        assert_eq!(dump_status(&dumped("++.", 100)), EXIT_COMPLETED);
    }

    #[test]
    fn test_dump_status_malformed() {
        assert_eq!(dump_status(&dumped("+]", 100)), EXIT_MALFORMED);
    }

    #[test]
    fn test_dump_status_step_limit() {
        let interpreter = dumped("+[]", 100);
        assert_eq!(interpreter.stats().steps, 100);
        assert_eq!(dump_status(&interpreter), EXIT_STOPPED);
    }

    #[test]
    fn test_zero_max_steps_disables_limit() {
        let cli = Cli::parse_from(["tapevm", "--max-steps", "0", "-e", "+"]);
        assert_eq!(cli.config().max_steps, None);
    }
}
