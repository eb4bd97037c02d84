//! Flat AST types using arena allocation.
//!
//! - No `Box<Expr>`, children are `ExprId`/`StmtId` indices
//! - Contiguous arrays for cache locality
//!
//! # Module Structure
//!
//! - `expr`: Expression types (`Expr`, `ExprKind`)
//! - `operators`: Binary and unary operators
//! - `stmt`: Statement types, `var` specs, switch clauses
//! - `items`: Package-level declarations and `Program`

mod expr;
mod items;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use items::{Decl, Function, Param, Program};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{CaseClause, Stmt, StmtKind, VarSpec};
