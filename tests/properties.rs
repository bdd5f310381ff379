// Property tests for the tapes and the step function

use proptest::prelude::*;
use tapevm::config::Config;
use tapevm::interpreter::engine::Interpreter;
use tapevm::interpreter::errors::RuntimeError;
use tapevm::interpreter::executor::{Executor, Outcome};
use tapevm::memory::{MemoryStore, ProgramStore};
use tapevm::Machine;

/// Programs whose brackets all pair up
fn balanced_program() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["+", "-", ">", "<", ".", " "]).prop_map(String::from);
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(|parts| parts.concat()),
            inner.prop_map(|body| format!("[{}]", body)),
        ]
    })
}

fn any_program() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['+', '-', '>', '<', '.', '[', ']', 'x']),
        1..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn bounded(source: &str, limit: u64) -> Interpreter {
    let config = Config::default()
        .with_max_steps(Some(limit))
        .with_history(false);
    Interpreter::from_source(source, config).unwrap()
}

proptest! {
    #[test]
    fn increments_wrap_modulo_256(n in 0usize..1024) {
        let memory = (0..n).fold(MemoryStore::new(), |m, _| m.increment());
        prop_assert_eq!(memory.current() as usize, n % 256);

        let memory = (0..n).fold(MemoryStore::new(), |m, _| m.decrement());
        prop_assert_eq!(memory.current() as usize, (256 - n % 256) % 256);
    }

    #[test]
    fn increments_then_decrements_restore_any_value(start in any::<u8>(), n in 0usize..1024) {
        let memory = (0..start).fold(MemoryStore::new(), |m, _| m.increment());
        prop_assert_eq!(memory.current(), start);

        let up = (0..n).fold(memory, |m, _| m.increment());
        prop_assert_eq!(up.current(), start.wrapping_add((n % 256) as u8));

        let back = (0..n).fold(up, |m, _| m.decrement());
        prop_assert_eq!(back.current(), start);
        prop_assert_eq!(back.len(), 1);
    }

    #[test]
    fn memory_matches_vec_model(ops in prop::collection::vec(0u8..3, 0..200)) {
        let mut memory = MemoryStore::new();
        let mut cells = vec![0u8];
        let mut pos = 0usize;

        for op in ops {
            match op {
                0 => {
                    memory = memory.next_cell();
                    if pos + 1 == cells.len() {
                        cells.push(0);
                    }
                    pos += 1;
                }
                1 => {
                    memory = memory.prev_cell();
                    if pos == 0 {
                        cells.insert(0, 0);
                    } else {
                        pos -= 1;
                    }
                }
                _ => {
                    memory = memory.increment();
                    cells[pos] = cells[pos].wrapping_add(1);
                }
            }
        }

        prop_assert_eq!(memory.cells().into_vec(), cells.clone());
        prop_assert_eq!(memory.position(), pos);
        prop_assert_eq!(memory.current(), cells[pos]);
    }

    #[test]
    fn program_moves_never_change_contents(
        source in "[+\\-<>.\\[\\]]{1,32}",
        moves in prop::collection::vec(any::<bool>(), 0..100),
    ) {
        let original = ProgramStore::from_source(&source).unwrap();
        let mut program = original.clone();

        for forward in moves {
            let position = program.position();
            let moved = if forward { program.advance() } else { program.rewind() };
            program = match moved {
                Ok(p) => {
                    let expected = if forward { position + 1 } else { position - 1 };
                    prop_assert_eq!(p.position(), expected);
                    p
                }
                Err(p) => {
                    let at_edge = if forward { p.is_last() } else { p.is_first() };
                    prop_assert!(at_edge);
                    prop_assert_eq!(p.position(), position);
                    p
                }
            };
            prop_assert_eq!(program.as_tape(), original.as_tape());
        }
    }

    #[test]
    fn halted_executor_stays_put(source in any_program()) {
        let mut executor = Executor::new(Machine::from_source(&source).unwrap());
        for _ in 0..5_000 {
            if executor.is_halted() {
                break;
            }
            executor = executor.step();
        }
        if executor.is_halted() {
            prop_assert_eq!(executor.clone().step(), executor);
        }
    }

    #[test]
    fn balanced_programs_are_never_malformed(body in balanced_program()) {
        let source = format!("{}+", body);
        let mut interpreter = bounded(&source, 5_000);
        match interpreter.run() {
            Ok(()) => prop_assert!(matches!(interpreter.outcome(), Some(Outcome::Completed(_)))),
            Err(e) => prop_assert_eq!(e, RuntimeError::StepLimitExceeded { limit: 5_000 }),
        }
        prop_assert!(interpreter.fault().is_none());
    }

    #[test]
    fn random_programs_end_cleanly(source in any_program()) {
        let mut interpreter = bounded(&source, 5_000);
        let result = interpreter.run();
        prop_assert!(interpreter.stats().steps <= 5_000);

        match interpreter.outcome() {
            Some(Outcome::Malformed { machine, .. }) => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(machine.output_text(), "Error!");
            }
            Some(Outcome::Completed(machine)) => {
                prop_assert!(result.is_ok());
                prop_assert!(machine.program().is_last());
            }
            None => prop_assert!(result.is_err()),
        }
    }
}
