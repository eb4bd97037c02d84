//! Tree-walking interpreter for GoLite.
//!
//! One `Interpreter` carries the whole program state: the environment, the
//! live call stack, the print handler and the mode's counters. Evaluation
//! is split by concern:
//!
//! - `expr`: expression evaluation
//! - `stmt`: statements and control flow
//! - `assignment`: assignment, op-assignment, declarations
//! - `function_call`: calls, parameter binding, returns
//! - `format`: `print` and `println`
//!
//! # Evaluation order
//!
//! Within one expression list (call arguments, the sides of an assignment,
//! `print` arguments, a `return` list, or a single operand) every call runs
//! first, left to right in post-order, and only then are plain operands
//! read. The interpreter does this in two phases: `with_hoisted` walks the
//! list, runs each call and parks its result keyed by `ExprId`, then the
//! read phase finds the parked results. A short-circuit `&&`/`||` that
//! contains a call is hoisted as a unit so its right operand still runs
//! only when needed.

mod assignment;
mod builder;
mod expr;
mod format;
mod function_call;
mod stmt;

pub use builder::InterpreterBuilder;

use golite_ir::{ExprId, ExprKind, Function, Name, Program, StringInterner};
use rustc_hash::FxHashMap;

use crate::diagnostics::CallStack;
use crate::errors::{invalid_main, missing_main, EvalResult};
use crate::eval_mode::{EvalMode, ModeState};
use crate::print_handler::SharedPrintHandler;
use crate::{zero_value, Environment, ExitStatus, GrowthPolicy, RuntimeFault, Value};

/// Tree-walking interpreter.
pub struct Interpreter<'a> {
    pub(crate) program: &'a Program,
    pub(crate) interner: &'a StringInterner,
    pub(crate) functions: FxHashMap<Name, &'a Function>,
    pub(crate) env: Environment,
    pub(crate) call_stack: CallStack,
    pub(crate) mode: EvalMode,
    pub(crate) mode_state: ModeState,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) growth_policy: GrowthPolicy,
    /// Results of calls run in the current expression lists' call phase.
    hoisted: Vec<(ExprId, Value)>,
}

impl<'a> Interpreter<'a> {
    /// Run the program: package variables, then every `init` in source
    /// order, then `main`.
    ///
    /// Runtime faults end the run with `ExitStatus::Faulted`; any other
    /// error means the program was ill-formed.
    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?self.mode))]
    pub fn run(&mut self) -> EvalResult<ExitStatus> {
        let Some(main) = self.functions.get(&Name::MAIN).copied() else {
            return Err(missing_main());
        };
        if !main.params.is_empty() || main.has_results() {
            return Err(invalid_main().with_span(main.span));
        }

        let status = match self.run_to_completion(main) {
            Ok(()) => ExitStatus::Completed,
            Err(err) => {
                let Some(kind) = err.fault().cloned() else {
                    return Err(err);
                };
                tracing::debug!(fault = %kind, span = ?err.span, "evaluation faulted");
                ExitStatus::Faulted(RuntimeFault {
                    kind,
                    span: err.span,
                    backtrace: err.backtrace,
                })
            }
        };

        if let Some(counters) = self.mode_state.counters() {
            tracing::debug!(
                statements = counters.statements_executed,
                expressions = counters.expressions_evaluated,
                calls = counters.function_calls,
                reallocations = counters.slice_reallocations,
                "evaluation finished"
            );
        }
        Ok(status)
    }

    fn run_to_completion(&mut self, main: &'a Function) -> EvalResult<()> {
        self.init_globals()?;

        let program = self.program;
        let inits: Vec<&Function> = program
            .functions()
            .filter(|f| f.name == Name::INIT)
            .collect();
        for init in inits {
            tracing::debug!("running init");
            self.call_function(init, Vec::new(), Some(init.span))?;
        }

        self.call_function(main, Vec::new(), None)?;
        Ok(())
    }

    /// Package-level `var` specs, in source order.
    fn init_globals(&mut self) -> EvalResult<()> {
        let program = self.program;
        let mut count = 0usize;
        for spec in program.globals() {
            let values = self.var_spec_values(spec)?;
            for (&name, value) in spec.names.iter().zip(values) {
                self.env.define_global(name, value);
                count += 1;
            }
        }
        tracing::debug!(count, "package variables initialized");
        Ok(())
    }

    /// The counters collected so far, when enabled.
    pub fn counters(&self) -> Option<&crate::EvalCounters> {
        self.mode_state.counters()
    }

    /// The print handler this interpreter writes to.
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub(crate) fn zero_value(&self, ty: golite_ir::TypeId) -> Value {
        zero_value(ty, &self.program.types)
    }

    // Two-phase evaluation

    /// Run every call under `roots` (the call phase), then `f` (the read
    /// phase), then forget the parked results.
    pub(crate) fn with_hoisted<R>(
        &mut self,
        roots: &[ExprId],
        f: impl FnOnce(&mut Self) -> EvalResult<R>,
    ) -> EvalResult<R> {
        let mark = self.hoisted.len();
        let result = self.hoist_all(roots).and_then(|()| f(self));
        self.hoisted.truncate(mark);
        result
    }

    fn hoist_all(&mut self, roots: &[ExprId]) -> EvalResult<()> {
        for &root in roots {
            self.hoist(root)?;
        }
        Ok(())
    }

    fn hoist(&mut self, id: ExprId) -> EvalResult<()> {
        let program = self.program;
        let expr = program.arena.get_expr(id);
        match &expr.kind {
            ExprKind::Call { func, args } => {
                let value = self.eval_call(*func, args, expr.span)?;
                self.hoisted.push((id, value));
            }
            ExprKind::Append { slice, value } => {
                let value = self.eval_append(*slice, *value, expr.span)?;
                self.hoisted.push((id, value));
            }
            ExprKind::Binary { op, left, right }
                if op.is_short_circuit() && self.contains_call(id) =>
            {
                let value = self.eval_short_circuit(*op, *left, *right, expr.span)?;
                self.hoisted.push((id, value));
            }
            ExprKind::Binary { left, right, .. } => {
                self.hoist(*left)?;
                self.hoist(*right)?;
            }
            ExprKind::Index { target, index } => {
                self.hoist(*target)?;
                self.hoist(*index)?;
            }
            ExprKind::Unary { operand, .. }
            | ExprKind::Len(operand)
            | ExprKind::Cap(operand)
            | ExprKind::Convert(operand)
            | ExprKind::Field {
                receiver: operand, ..
            } => self.hoist(*operand)?,
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Rune(_)
            | ExprKind::Str(_)
            | ExprKind::Bool(_)
            | ExprKind::Ident(_) => {}
        }
        Ok(())
    }

    /// Whether evaluating `id` runs a function or `append`.
    pub(crate) fn contains_call(&self, id: ExprId) -> bool {
        let expr = self.program.arena.get_expr(id);
        match &expr.kind {
            ExprKind::Call { .. } | ExprKind::Append { .. } => true,
            ExprKind::Binary { left, right, .. }
            | ExprKind::Index {
                target: left,
                index: right,
            } => self.contains_call(*left) || self.contains_call(*right),
            ExprKind::Unary { operand, .. }
            | ExprKind::Len(operand)
            | ExprKind::Cap(operand)
            | ExprKind::Convert(operand)
            | ExprKind::Field {
                receiver: operand, ..
            } => self.contains_call(*operand),
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Rune(_)
            | ExprKind::Str(_)
            | ExprKind::Bool(_)
            | ExprKind::Ident(_) => false,
        }
    }

    /// Result parked for `id` by the innermost call phase.
    pub(crate) fn hoisted_value(&self, id: ExprId) -> Option<Value> {
        self.hoisted
            .iter()
            .rev()
            .find(|(hoisted, _)| *hoisted == id)
            .map(|(_, value)| value.clone())
    }

    /// Evaluate one expression list in two phases.
    pub(crate) fn eval_list(&mut self, ids: &[ExprId]) -> EvalResult<Vec<Value>> {
        self.with_hoisted(ids, |this| {
            ids.iter().map(|&id| this.eval_expr(id)).collect()
        })
    }

    /// Evaluate a single expression in two phases.
    pub(crate) fn eval_single(&mut self, id: ExprId) -> EvalResult {
        self.with_hoisted(&[id], |this| this.eval_expr(id))
    }
}
