//! Unary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for unary operations. The type set
//! is fixed, so pattern matching is preferred over trait objects.

use golite_ir::UnaryOp;

use crate::errors::{invalid_unary_op, EvalResult};
use crate::Value;

/// Evaluate a unary operation using direct pattern matching.
///
/// Integer negation wraps: `-MinInt64 == MinInt64`.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (v @ (Value::Int(_) | Value::Rune(_) | Value::Float(_)), UnaryOp::Plus) => Ok(v),

        // Numeric negation
        (Value::Int(n), UnaryOp::Neg) => Ok(Value::Int(n.wrapping_neg())),
        (Value::Rune(r), UnaryOp::Neg) => Ok(Value::Rune(r.wrapping_neg())),
        (Value::Float(f), UnaryOp::Neg) => Ok(Value::Float(-f)),

        // Bitwise complement
        (Value::Int(n), UnaryOp::BitNot) => Ok(Value::Int(!n)),
        (Value::Rune(r), UnaryOp::BitNot) => Ok(Value::Rune(!r)),

        // Logical not
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),

        (value, op) => Err(invalid_unary_op(value.type_name(), op)),
    }
}
