//! GoLite Eval - tree-walking evaluator for GoLite programs.
//!
//! Takes a checked `golite_ir::Program` and executes it: package variables,
//! `init` functions, then `main`.
//!
//! # Architecture
//!
//! - `Interpreter`: the single program-state context threaded through
//!   evaluation, configured by `InterpreterBuilder`
//! - `Environment`: globals plus per-call frames of block scopes
//! - `Value`: closed enum of runtime values; arrays and structs copy,
//!   slices share their backing buffer
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator
//!   dispatch with Go's wrapping integer semantics
//! - `errors`: runtime faults and ill-formed-program errors
//!
//! For most callers `execute` is enough: it runs a program with captured
//! output and reports how it ended.

mod conversions;
pub mod diagnostics;
mod environment;
pub mod errors;
pub mod eval_mode;
pub mod exec;
pub mod interpreter;
mod operators;
mod print_handler;
mod stack;
mod unary_operators;
mod value;

use golite_ir::{Program, StringInterner};

pub use conversions::convert;
pub use diagnostics::{CallFrame, CallStack, EvalCounters};
pub use environment::{Environment, Scope};
pub use errors::{
    BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, FaultKind, RuntimeFault,
};
pub use eval_mode::{EvalMode, ModeState};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;
pub use value::{format_float, zero_value, GrowthPolicy, SliceValue, StructValue, Value};

/// How a run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum ExitStatus {
    /// `main` returned.
    Completed,
    /// A runtime fault aborted the program.
    Faulted(RuntimeFault),
}

/// Result of `execute`.
#[derive(Clone, Debug, PartialEq)]
pub struct Execution {
    /// Everything written by `print` and `println`, in order.
    pub output: String,
    pub status: ExitStatus,
    pub counters: EvalCounters,
}

impl Execution {
    /// Output split into lines, without trailing newlines.
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, ExitStatus::Completed)
    }

    /// The fault that ended the run, if any.
    pub fn fault(&self) -> Option<&RuntimeFault> {
        match &self.status {
            ExitStatus::Faulted(fault) => Some(fault),
            ExitStatus::Completed => None,
        }
    }
}

/// Run `program` with captured output.
///
/// Output produced before a fault is kept.
pub fn execute(program: &Program, interner: &StringInterner) -> EvalResult<Execution> {
    let handler = buffer_handler();
    let mut interpreter = InterpreterBuilder::new(program, interner)
        .print_handler(handler.clone())
        .counters(true)
        .build();
    let status = interpreter.run()?;
    let counters = interpreter.counters().cloned().unwrap_or_default();
    Ok(Execution {
        output: handler.take_output(),
        status,
        counters,
    })
}

#[cfg(test)]
mod tests;
