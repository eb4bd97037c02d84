//! Terminating-statement analysis.
//!
//! A function with results must end in a terminating statement, so control
//! never falls off the end of its body. A statement is terminating when it
//! is:
//!
//! - a `return`;
//! - a block whose last non-empty statement is terminating;
//! - an `if` with an `else` where both branches are terminating;
//! - a `for` without a condition that no `break` refers to;
//! - a `switch` with a `default` that no `break` refers to and whose clauses
//!   all end in a terminating statement;
//! - an expression statement calling a diverging function.
//!
//! A function is diverging when its body is terminating and contains no
//! `return`: every call to it runs forever. The diverging set is the least
//! fixpoint of that rule over the whole program.

use golite_ir::{
    CaseClause, ExprKind, Function, Name, Program, Span, StmtId, StmtKind, StringInterner,
};
use rustc_hash::FxHashSet;
use thiserror::Error;

/// A function whose body can fall off the end.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TerminationError {
    #[error("missing return at end of function `{name}`")]
    MissingReturn { name: String, span: Span },
}

impl TerminationError {
    pub fn span(&self) -> Span {
        match self {
            TerminationError::MissingReturn { span, .. } => *span,
        }
    }
}

/// Check every function with results.
///
/// Reports all failing functions in source order.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check_termination(
    program: &Program,
    interner: &StringInterner,
) -> Result<(), Vec<TerminationError>> {
    let diverging = diverging_functions(program);
    let analysis = Analysis {
        program,
        diverging: &diverging,
    };

    let errors: Vec<TerminationError> = program
        .functions()
        .filter(|f| f.has_results() && !analysis.is_terminating(f.body))
        .map(|f| TerminationError::MissingReturn {
            name: interner.lookup(f.name).to_string(),
            span: f.span,
        })
        .collect();

    tracing::debug!(
        diverging = diverging.len(),
        failing = errors.len(),
        "termination check finished"
    );
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Functions no call to which ever returns.
pub fn diverging_functions(program: &Program) -> FxHashSet<Name> {
    let mut diverging = FxHashSet::default();
    let candidates: Vec<&Function> = program
        .functions()
        .filter(|f| !contains_return(program, f.body))
        .collect();

    loop {
        let analysis = Analysis {
            program,
            diverging: &diverging,
        };
        let found: Vec<Name> = candidates
            .iter()
            .filter(|f| !diverging.contains(&f.name) && analysis.is_terminating(f.body))
            .map(|f| f.name)
            .collect();
        if found.is_empty() {
            return diverging;
        }
        diverging.extend(found);
    }
}

struct Analysis<'a> {
    program: &'a Program,
    diverging: &'a FxHashSet<Name>,
}

impl Analysis<'_> {
    fn is_terminating(&self, id: StmtId) -> bool {
        match &self.program.arena.get_stmt(id).kind {
            StmtKind::Return(_) => true,
            StmtKind::Block(stmts) => self.ends_terminating(stmts),
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => else_branch.is_some_and(|else_branch| {
                self.is_terminating(*then_branch) && self.is_terminating(else_branch)
            }),
            StmtKind::For { cond, body, .. } => {
                cond.is_none() && !breaks_out(self.program, *body)
            }
            StmtKind::Switch { clauses, .. } => {
                clauses.iter().any(CaseClause::is_default)
                    && clauses.iter().all(|clause| {
                        self.ends_terminating(&clause.body)
                            && !clause.body.iter().any(|&s| breaks_out(self.program, s))
                    })
            }
            StmtKind::Expr(expr) => match &self.program.arena.get_expr(*expr).kind {
                ExprKind::Call { func, .. } => self.diverging.contains(func),
                _ => false,
            },
            StmtKind::Empty
            | StmtKind::Assign { .. }
            | StmtKind::OpAssign { .. }
            | StmtKind::VarDecl(_)
            | StmtKind::TypeDecl { .. }
            | StmtKind::ShortVarDecl { .. }
            | StmtKind::IncDec { .. }
            | StmtKind::Print(_)
            | StmtKind::Println(_)
            | StmtKind::Break
            | StmtKind::Continue => false,
        }
    }

    /// The last non-empty statement of `stmts` is terminating.
    fn ends_terminating(&self, stmts: &[StmtId]) -> bool {
        stmts
            .iter()
            .rev()
            .find(|&&s| !matches!(self.program.arena.get_stmt(s).kind, StmtKind::Empty))
            .is_some_and(|&s| self.is_terminating(s))
    }
}

/// A `break` in `id` that refers to the statement enclosing `id`.
///
/// Breaks inside a nested `for` or `switch` refer to that statement.
fn breaks_out(program: &Program, id: StmtId) -> bool {
    match &program.arena.get_stmt(id).kind {
        StmtKind::Break => true,
        StmtKind::Block(stmts) => stmts.iter().any(|&s| breaks_out(program, s)),
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            breaks_out(program, *then_branch)
                || else_branch.is_some_and(|s| breaks_out(program, s))
        }
        _ => false,
    }
}

/// A `return` anywhere in `id`.
fn contains_return(program: &Program, id: StmtId) -> bool {
    let any = |stmts: &[StmtId]| stmts.iter().any(|&s| contains_return(program, s));
    match &program.arena.get_stmt(id).kind {
        StmtKind::Return(_) => true,
        StmtKind::Block(stmts) => any(stmts),
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            contains_return(program, *then_branch)
                || else_branch.is_some_and(|s| contains_return(program, s))
        }
        StmtKind::For { body, .. } => contains_return(program, *body),
        StmtKind::Switch { clauses, .. } => clauses.iter().any(|clause| any(&clause.body)),
        _ => false,
    }
}
