//! Expression types.
//!
//! Every expression carries the static type assigned by the front end's
//! checker. Literals are interpreted according to that type: an integer
//! literal typed `rune` evaluates to a rune.

use super::{BinaryOp, UnaryOp};
use crate::{ExprId, Name, Span, TypeId};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeId,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: TypeId, span: Span) -> Self {
        Expr { kind, ty, span }
    }
}

/// Expression variants.
///
/// Child expressions are `ExprId` indices into the arena.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Integer literal, already decoded (decimal, octal or hex).
    Int(i64),
    /// Float literal, stored as bits so the node stays `Eq`-friendly.
    Float(u64),
    /// Rune literal, escapes already resolved.
    Rune(i32),
    /// Interpreted or raw string literal, escapes already resolved.
    Str(Name),
    /// `true` / `false`
    Bool(bool),

    /// Variable reference; `_` only appears as an assignment target.
    Ident(Name),

    /// `left op right`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `op operand`
    Unary { op: UnaryOp, operand: ExprId },

    /// `target[index]` on arrays and slices.
    Index { target: ExprId, index: ExprId },

    /// `receiver.field`
    Field { receiver: ExprId, field: Name },

    /// `func(args...)`
    Call { func: Name, args: Vec<ExprId> },

    /// `append(slice, value)`
    Append { slice: ExprId, value: ExprId },

    /// `len(operand)`
    Len(ExprId),

    /// `cap(operand)`
    Cap(ExprId),

    /// `T(operand)`; the target type is the expression's own type.
    Convert(ExprId),
}

impl ExprKind {
    /// Whether evaluating this node runs a function or the `append` builtin.
    #[inline]
    pub const fn is_call(&self) -> bool {
        matches!(self, ExprKind::Call { .. } | ExprKind::Append { .. })
    }

    /// Float literal value.
    #[inline]
    pub fn float(value: f64) -> Self {
        ExprKind::Float(value.to_bits())
    }
}
