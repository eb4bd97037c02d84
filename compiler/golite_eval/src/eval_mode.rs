//! Evaluation modes for the GoLite interpreter.
//!
//! `EvalMode` selects per-run policies by match dispatch: where output goes
//! by default and how deep calls may nest. `ModeState` holds the mutable
//! state that travels with a mode.

use crate::diagnostics::EvalCounters;
use crate::print_handler::{buffer_handler, stdout_handler, SharedPrintHandler};

/// Evaluation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Running a program: output goes to stdout.
    #[default]
    Interpret,
    /// Running under a test harness: output is captured.
    TestRun,
}

impl EvalMode {
    /// Whether `print`/`println` write to the process's stdout by default.
    #[inline]
    pub fn allows_io(self) -> bool {
        matches!(self, Self::Interpret)
    }

    /// Print handler used when the builder is not given one.
    pub fn default_print_handler(self) -> SharedPrintHandler {
        if self.allows_io() {
            stdout_handler()
        } else {
            buffer_handler()
        }
    }

    /// Maximum call depth, or `None` for unlimited.
    ///
    /// - `Interpret`: `None` on native (stacker grows the stack), 200 on WASM
    /// - `TestRun`: always 10 000, so runaway recursion fails fast
    #[inline]
    pub fn max_recursion_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::TestRun => Some(10_000),
        }
    }
}

/// Per-run mutable state stored alongside `EvalMode`.
///
/// Counter increments are no-ops unless counters were enabled.
#[derive(Debug, Default)]
pub struct ModeState {
    counters: Option<EvalCounters>,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_counters(&mut self) {
        self.counters = Some(EvalCounters::default());
    }

    #[inline]
    pub fn count_statement(&mut self) {
        if let Some(c) = &mut self.counters {
            c.count_statement();
        }
    }

    #[inline]
    pub fn count_expression(&mut self) {
        if let Some(c) = &mut self.counters {
            c.count_expression();
        }
    }

    #[inline]
    pub fn count_function_call(&mut self) {
        if let Some(c) = &mut self.counters {
            c.count_function_call();
        }
    }

    #[inline]
    pub fn count_slice_reallocation(&mut self) {
        if let Some(c) = &mut self.counters {
            c.count_slice_reallocation();
        }
    }

    /// The counters, or `None` when they were never enabled.
    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }
}
