//! Diagnostic infrastructure for the evaluator.
//!
//! - `CallStack`: live call frames, with the depth limit checked on push
//! - `CallFrame`: per-call metadata (name, call site)
//! - `EvalCounters`: optional evaluation counters
//!
//! `CallStack` captures backtraces at fault sites; the snapshot is stored on
//! `EvalError` as an `EvalBacktrace`.

use golite_ir::{Name, Span, StringInterner};

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Interned function name.
    pub name: Name,
    /// Source location of the call site, not the definition.
    pub call_span: Option<Span>,
}

/// Live call stack for the interpreter.
///
/// Each function call pushes a frame and pops it on return, including the
/// error path.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Snapshot of the stack, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: interner.lookup(f.name).to_string(),
                span: f.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one.
    ///
    /// The innermost failing call attaches first, so its snapshot is the
    /// deepest one and wins.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

/// Evaluation counters, enabled through `InterpreterBuilder::counters`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub statements_executed: u64,
    pub expressions_evaluated: u64,
    pub function_calls: u64,
    pub slice_reallocations: u64,
}

impl EvalCounters {
    #[inline]
    pub fn count_statement(&mut self) {
        self.statements_executed = self.statements_executed.wrapping_add(1);
    }

    #[inline]
    pub fn count_expression(&mut self) {
        self.expressions_evaluated = self.expressions_evaluated.wrapping_add(1);
    }

    #[inline]
    pub fn count_function_call(&mut self) {
        self.function_calls = self.function_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_slice_reallocation(&mut self) {
        self.slice_reallocations = self.slice_reallocations.wrapping_add(1);
    }

    /// Format a summary report.
    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             Statements executed:   {}\n  \
             Expressions evaluated: {}\n  \
             Function calls:        {}\n  \
             Slice reallocations:   {}",
            self.statements_executed,
            self.expressions_evaluated,
            self.function_calls,
            self.slice_reallocations,
        )
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests;
