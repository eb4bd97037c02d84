//! Arena allocation for flat AST.
//!
//! - Contiguous storage for all expressions and statements
//! - Child references are `ExprId`/`StmtId` indices
//! - Bulk deallocation when the program is dropped

use crate::ast::{Expr, Stmt};
use crate::{ExprId, StmtId};

/// Contiguous storage for all expressions and statements of a program.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// All statements (indexed by `StmtId`).
    stmts: Vec<Stmt>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expression allocation =====

    /// Allocate expression, return ID.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` expressions are allocated.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(
            u32::try_from(self.exprs.len()).unwrap_or_else(|_| panic!("expression arena overflow")),
        );
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get mutable expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    /// Number of expressions.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Statement allocation =====

    /// Allocate statement, return ID.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` statements are allocated.
    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(
            u32::try_from(self.stmts.len()).unwrap_or_else(|_| panic!("statement arena overflow")),
        );
        self.stmts.push(stmt);
        id
    }

    /// Get statement by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Number of statements.
    #[inline]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}
