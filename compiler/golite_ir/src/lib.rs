//! GoLite IR - Intermediate Representation Types
//!
//! This crate contains the core data structures shared by the checker and
//! the evaluator:
//! - Spans for source locations
//! - Names for interned identifiers and string literals
//! - `TypeId` and the per-program `TypeTable`
//! - AST nodes (Expr, Stmt, Function, Program)
//! - Arena allocation for expressions and statements
//! - `ProgramBuilder` for constructing typed programs without a parser
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Types → TypeId(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//!
//! Float literals are stored as u64 bits so AST nodes stay hashable.

mod arena;
pub mod ast;
mod builder;
mod expr_id;
mod interner;
mod name;
mod span;
mod type_id;
mod types;

pub use arena::ExprArena;
pub use ast::{
    BinaryOp, CaseClause, Decl, Expr, ExprKind, Function, Param, Program, Stmt, StmtKind,
    UnaryOp, VarSpec,
};
pub use builder::ProgramBuilder;
pub use expr_id::{ExprId, StmtId};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use type_id::TypeId;
pub use types::{Field, Type, TypeTable};
