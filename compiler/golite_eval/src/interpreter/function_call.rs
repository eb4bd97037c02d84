//! Function call evaluation methods for the Interpreter.

use golite_ir::{ExprId, Function, Name, Span, StmtKind};

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::{arity_mismatch, undefined_function, EvalResult};
use crate::exec::control::{spread_results, Signal};
use crate::stack::ensure_sufficient_stack;
use crate::Value;

impl<'a> Interpreter<'a> {
    /// Evaluate the call `func(args)`: arguments in one call phase, then the
    /// body.
    ///
    /// `f(g())` with a multi-result `g` spreads `g`'s results over `f`'s
    /// parameters.
    pub(crate) fn eval_call(&mut self, func: Name, args: &[ExprId], span: Span) -> EvalResult {
        let Some(function) = self.functions.get(&func).copied() else {
            return Err(undefined_function(self.interner.lookup(func)).with_span(span));
        };
        let values = spread_results(self.eval_list(args)?, function.params.len());
        self.call_function(function, values, Some(span))
    }

    /// Run `function` on already evaluated arguments.
    ///
    /// Arguments are bound by value into a fresh frame; the caller's locals
    /// are not visible in the callee.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = self.interner.lookup(function.name), depth = self.call_stack.depth())
    )]
    pub(crate) fn call_function(
        &mut self,
        function: &'a Function,
        args: Vec<Value>,
        call_span: Option<Span>,
    ) -> EvalResult {
        let span = call_span.unwrap_or(function.span);
        if args.len() != function.params.len() {
            return Err(arity_mismatch(
                self.interner.lookup(function.name),
                function.params.len(),
                args.len(),
            )
            .with_span(span));
        }

        self.call_stack
            .push(CallFrame {
                name: function.name,
                call_span,
            })
            .map_err(|e| e.with_span(span))?;
        self.mode_state.count_function_call();

        self.env.push_frame();
        for (param, value) in function.params.iter().zip(args) {
            self.env.define(param.name, value);
        }
        let result = ensure_sufficient_stack(|| self.exec_function_body(function));
        self.env.pop_frame();

        let result = result.map_err(|e| self.call_stack.attach_backtrace(e, self.interner));
        self.call_stack.pop();

        match result? {
            Signal::Return(value) => Ok(value),
            Signal::Normal | Signal::Break | Signal::Continue => Ok(Value::Void),
        }
    }

    /// The body's statements run directly in the parameter scope.
    fn exec_function_body(&mut self, function: &Function) -> EvalResult<Signal> {
        let program = self.program;
        match &program.arena.get_stmt(function.body).kind {
            StmtKind::Block(stmts) => self.exec_stmts(stmts),
            _ => self.exec_stmt(function.body),
        }
    }
}
