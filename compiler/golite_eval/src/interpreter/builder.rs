//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use golite_ir::{Program, StringInterner};
use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::eval_mode::{EvalMode, ModeState};
use crate::{Environment, GrowthPolicy, SharedPrintHandler};

/// Builder for creating Interpreter instances with various configurations.
///
/// The mode supplies defaults for the print handler and the call-depth
/// limit; the other setters override them individually.
pub struct InterpreterBuilder<'a> {
    program: &'a Program,
    interner: &'a StringInterner,
    mode: EvalMode,
    print_handler: Option<SharedPrintHandler>,
    growth_policy: GrowthPolicy,
    max_call_depth: Option<Option<usize>>,
    counters: bool,
}

impl<'a> InterpreterBuilder<'a> {
    /// Create a new builder with default `Interpret` mode.
    pub fn new(program: &'a Program, interner: &'a StringInterner) -> Self {
        Self {
            program,
            interner,
            mode: EvalMode::default(),
            print_handler: None,
            growth_policy: GrowthPolicy::default(),
            max_call_depth: None,
            counters: false,
        }
    }

    /// Set the evaluation mode.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the print handler, overriding the mode's default.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set how `append` sizes a new backing buffer.
    #[must_use]
    pub fn growth_policy(mut self, policy: GrowthPolicy) -> Self {
        self.growth_policy = policy;
        self
    }

    /// Bound the call depth (`None` for unlimited), overriding the mode.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Collect `EvalCounters` during the run.
    #[must_use]
    pub fn counters(mut self, enabled: bool) -> Self {
        self.counters = enabled;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        let functions: FxHashMap<_, _> = self.program.functions().map(|f| (f.name, f)).collect();

        let max_depth = self
            .max_call_depth
            .unwrap_or_else(|| self.mode.max_recursion_depth());

        let mut mode_state = ModeState::new();
        if self.counters {
            mode_state.enable_counters();
        }

        Interpreter {
            program: self.program,
            interner: self.interner,
            functions,
            env: Environment::new(),
            call_stack: CallStack::new(max_depth),
            mode: self.mode,
            mode_state,
            print_handler: self
                .print_handler
                .unwrap_or_else(|| self.mode.default_print_handler()),
            growth_policy: self.growth_policy,
            hoisted: Vec::new(),
        }
    }
}
