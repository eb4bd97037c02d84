//! Statement types.

use super::BinaryOp;
use crate::{ExprId, Name, Span, StmtId, TypeId};

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// One `var` spec: `var a, b T = x, y`.
///
/// Without values every name gets the zero value of `ty`. With values and
/// no `ty`, each name takes its value's type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarSpec {
    pub names: Vec<Name>,
    pub ty: Option<TypeId>,
    pub values: Vec<ExprId>,
    pub span: Span,
}

/// A `case` or `default` clause of a switch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseClause {
    /// `None` for `default`.
    pub exprs: Option<Vec<ExprId>>,
    pub body: Vec<StmtId>,
    pub span: Span,
}

impl CaseClause {
    #[inline]
    pub fn is_default(&self) -> bool {
        self.exprs.is_none()
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// `;`
    Empty,

    /// `{ stmts }`
    Block(Vec<StmtId>),

    /// Expression statement; a call in well-formed programs.
    Expr(ExprId),

    /// `targets = values`
    Assign {
        targets: Vec<ExprId>,
        values: Vec<ExprId>,
    },

    /// `target op= value`
    OpAssign {
        target: ExprId,
        op: BinaryOp,
        value: ExprId,
    },

    /// `var ( specs )`
    VarDecl(Vec<VarSpec>),

    /// `type name T`; no runtime effect.
    TypeDecl { name: Name, ty: TypeId },

    /// `names := values`; names already declared in the current scope are
    /// assigned, the rest are declared.
    ShortVarDecl {
        names: Vec<Name>,
        values: Vec<ExprId>,
    },

    /// `target++` / `target--`
    IncDec { target: ExprId, decrement: bool },

    /// `print(args)`
    Print(Vec<ExprId>),

    /// `println(args)`
    Println(Vec<ExprId>),

    /// `if init; cond { then } else else_branch`
    ///
    /// `else_branch` is a block or another `If`.
    If {
        init: Option<StmtId>,
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },

    /// `for init; cond; post { body }`; no `cond` loops forever.
    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
        body: StmtId,
    },

    /// `switch init; tag { clauses }`; no `tag` switches on `true`.
    Switch {
        init: Option<StmtId>,
        tag: Option<ExprId>,
        clauses: Vec<CaseClause>,
    },

    Break,

    Continue,

    /// `return values`
    Return(Vec<ExprId>),
}
