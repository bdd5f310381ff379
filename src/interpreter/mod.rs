//! Program execution
//!
//! This module provides the execution logic on top of [`Machine`](crate::machine::Machine):
//! - [`executor`]: the fetch/decode/execute step, bracket search and [`executor::Outcome`]
//! - [`engine`]: [`engine::Interpreter`], a bounded run with snapshot history
//! - [`stats`]: per-run counters
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The executor is a pure state machine: every step consumes an executor and
//! returns the next one. The interpreter drives it, enforcing the configured
//! step limit and taking a snapshot after every step so the run can be
//! replayed in either direction.

pub mod engine;
pub mod errors;
pub mod executor;
pub mod stats;
