//! Statement execution and control flow.

use golite_ir::{CaseClause, ExprId, StmtId, StmtKind};

use super::Interpreter;
use crate::errors::EvalResult;
use crate::exec::control::{return_value, to_loop_action, to_switch_signal, LoopAction, Signal};
use crate::Value;

impl Interpreter<'_> {
    /// Execute statements in order until one signals.
    pub(crate) fn exec_stmts(&mut self, stmts: &[StmtId]) -> EvalResult<Signal> {
        for &stmt in stmts {
            let signal = self.exec_stmt(stmt)?;
            if !signal.is_normal() {
                return Ok(signal);
            }
        }
        Ok(Signal::Normal)
    }

    /// Run `f` in a fresh block scope, popping it on every path.
    pub(crate) fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<R>) -> EvalResult<R> {
        self.env.push_scope();
        let result = f(self);
        self.env.pop_scope();
        result
    }

    pub(crate) fn exec_stmt(&mut self, id: StmtId) -> EvalResult<Signal> {
        self.mode_state.count_statement();
        let program = self.program;
        let stmt = program.arena.get_stmt(id);
        match &stmt.kind {
            StmtKind::Empty | StmtKind::TypeDecl { .. } => Ok(Signal::Normal),
            StmtKind::Block(stmts) => self.scoped(|this| this.exec_stmts(stmts)),
            StmtKind::Expr(expr) => {
                self.eval_single(*expr)?;
                Ok(Signal::Normal)
            }
            StmtKind::Assign { targets, values } => {
                self.exec_assign(targets, values, stmt.span)?;
                Ok(Signal::Normal)
            }
            StmtKind::OpAssign { target, op, value } => {
                self.exec_op_assign(*target, *op, *value, stmt.span)?;
                Ok(Signal::Normal)
            }
            StmtKind::IncDec { target, decrement } => {
                self.exec_inc_dec(*target, *decrement, stmt.span)?;
                Ok(Signal::Normal)
            }
            StmtKind::VarDecl(specs) => {
                for spec in specs {
                    let values = self.var_spec_values(spec)?;
                    for (&name, value) in spec.names.iter().zip(values) {
                        self.env.define(name, value);
                    }
                }
                Ok(Signal::Normal)
            }
            StmtKind::ShortVarDecl { names, values } => {
                self.exec_short_var_decl(names, values, stmt.span)?;
                Ok(Signal::Normal)
            }
            StmtKind::Print(args) => {
                self.exec_print(args)?;
                Ok(Signal::Normal)
            }
            StmtKind::Println(args) => {
                self.exec_println(args)?;
                Ok(Signal::Normal)
            }
            StmtKind::If {
                init,
                cond,
                then_branch,
                else_branch,
            } => self.scoped(|this| {
                this.exec_init(*init)?;
                if this.eval_condition(*cond)? {
                    this.exec_stmt(*then_branch)
                } else if let Some(else_branch) = else_branch {
                    this.exec_stmt(*else_branch)
                } else {
                    Ok(Signal::Normal)
                }
            }),
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => self.scoped(|this| this.exec_for(*init, *cond, *post, *body)),
            StmtKind::Switch { init, tag, clauses } => {
                self.scoped(|this| this.exec_switch(*init, *tag, clauses))
            }
            StmtKind::Break => Ok(Signal::Break),
            StmtKind::Continue => Ok(Signal::Continue),
            StmtKind::Return(values) => {
                let values = self.eval_list(values)?;
                Ok(Signal::Return(return_value(values)))
            }
        }
    }

    /// Simple statement heading an `if`, `for` or `switch`.
    fn exec_init(&mut self, init: Option<StmtId>) -> EvalResult<()> {
        if let Some(init) = init {
            self.exec_stmt(init)?;
        }
        Ok(())
    }

    fn eval_condition(&mut self, cond: ExprId) -> EvalResult<bool> {
        let span = self.program.arena.get_expr(cond).span;
        self.eval_single(cond)?
            .as_bool()
            .map_err(|e| e.with_span(span))
    }

    fn exec_for(
        &mut self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
        body: StmtId,
    ) -> EvalResult<Signal> {
        self.exec_init(init)?;
        loop {
            if let Some(cond) = cond {
                if !self.eval_condition(cond)? {
                    break;
                }
            }
            match to_loop_action(self.exec_stmt(body)?) {
                LoopAction::Next => {}
                LoopAction::Exit => break,
                LoopAction::Propagate(signal) => return Ok(signal),
            }
            if let Some(post) = post {
                self.exec_stmt(post)?;
            }
        }
        Ok(Signal::Normal)
    }

    /// Case expressions are tried top to bottom, left to right, stopping at
    /// the first match; `default` runs only when nothing matches.
    fn exec_switch(
        &mut self,
        init: Option<StmtId>,
        tag: Option<ExprId>,
        clauses: &[CaseClause],
    ) -> EvalResult<Signal> {
        self.exec_init(init)?;
        let tag = match tag {
            Some(tag) => self.eval_single(tag)?,
            None => Value::Bool(true),
        };

        let mut chosen = None;
        'clauses: for clause in clauses {
            let Some(exprs) = &clause.exprs else {
                continue;
            };
            for &expr in exprs {
                let value = self.eval_single(expr)?;
                if tag.equals(&value).map_err(|e| e.with_span(clause.span))? {
                    chosen = Some(clause);
                    break 'clauses;
                }
            }
        }
        let chosen = chosen.or_else(|| clauses.iter().find(|clause| clause.is_default()));

        match chosen {
            Some(clause) => self
                .scoped(|this| this.exec_stmts(&clause.body))
                .map(to_switch_signal),
            None => Ok(Signal::Normal),
        }
    }
}
