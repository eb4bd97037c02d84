//! Binary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for binary operations. The type set
//! is fixed, so pattern matching is preferred over trait objects.
//!
//! `&&` and `||` only reach this module once both operands are known; the
//! interpreter performs the short-circuit itself.

use golite_ir::BinaryOp;

use crate::errors::{
    binary_type_mismatch, division_by_zero, invalid_binary_op, negative_shift, not_comparable,
    EvalResult,
};
use crate::Value;

/// Two's-complement integer operations shared by `int` and `rune`.
trait WrappingInt: Copy + Ord + Sized {
    const BITS: u32;
    const ZERO: Self;
    const MINUS_ONE: Self;

    fn wrap(self) -> Value;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_div(self, rhs: Self) -> Self;
    fn wrapping_rem(self, rhs: Self) -> Self;
    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn and_not(self, rhs: Self) -> Self;
    fn shl(self, count: u32) -> Self;
    fn shr(self, count: u32) -> Self;
}

macro_rules! impl_wrapping_int {
    ($ty:ty, $variant:ident) => {
        impl WrappingInt for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const MINUS_ONE: Self = -1;

            #[inline]
            fn wrap(self) -> Value {
                Value::$variant(self)
            }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$ty>::wrapping_mul(self, rhs)
            }
            #[inline]
            fn wrapping_div(self, rhs: Self) -> Self {
                <$ty>::wrapping_div(self, rhs)
            }
            #[inline]
            fn wrapping_rem(self, rhs: Self) -> Self {
                <$ty>::wrapping_rem(self, rhs)
            }
            #[inline]
            fn and(self, rhs: Self) -> Self {
                self & rhs
            }
            #[inline]
            fn or(self, rhs: Self) -> Self {
                self | rhs
            }
            #[inline]
            fn xor(self, rhs: Self) -> Self {
                self ^ rhs
            }
            #[inline]
            fn and_not(self, rhs: Self) -> Self {
                self & !rhs
            }
            #[inline]
            fn shl(self, count: u32) -> Self {
                self.checked_shl(count).unwrap_or(0)
            }
            #[inline]
            fn shr(self, count: u32) -> Self {
                // Arithmetic shift saturates to the sign.
                self.checked_shr(count)
                    .unwrap_or(if self < 0 { -1 } else { 0 })
            }
        }
    };
}

impl_wrapping_int!(i64, Int);
impl_wrapping_int!(i32, Rune);

/// Evaluate a binary operation on two evaluated operands.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    if matches!(op, BinaryOp::Shl | BinaryOp::Shr) {
        return eval_shift(&left, &right, op);
    }
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op, "int"),
        (Value::Rune(a), Value::Rune(b)) => eval_int_binary(*a, *b, op, "rune"),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Array(_), Value::Array(_)) | (Value::Struct(_), Value::Struct(_)) => {
            eval_equality_only(&left, &right, op)
        }
        (Value::Slice(_), Value::Slice(_)) => Err(not_comparable("slice")),
        _ => Err(binary_type_mismatch(left.type_name(), right.type_name())),
    }
}

/// `<<` and `>>`: the count may be either integer type.
fn eval_shift(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let count = match right {
        Value::Int(_) | Value::Rune(_) => right.as_index()?,
        other => return Err(binary_type_mismatch(left.type_name(), other.type_name())),
    };
    if count < 0 {
        return Err(negative_shift());
    }
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    match left {
        Value::Int(a) => Ok(shift(*a, count, op)),
        Value::Rune(a) => Ok(shift(*a, count, op)),
        other => Err(invalid_binary_op(other.type_name(), op)),
    }
}

fn shift<T: WrappingInt>(value: T, count: u32, op: BinaryOp) -> Value {
    let shifted = if count >= T::BITS {
        match op {
            BinaryOp::Shl => T::ZERO,
            _ if value < T::ZERO => T::MINUS_ONE,
            _ => T::ZERO,
        }
    } else if op == BinaryOp::Shl {
        value.shl(count)
    } else {
        value.shr(count)
    };
    shifted.wrap()
}

/// Binary operations on `int` and `rune`.
///
/// Arithmetic wraps modulo the type's width; division truncates toward
/// zero and only a zero divisor faults.
fn eval_int_binary<T: WrappingInt>(a: T, b: T, op: BinaryOp, type_name: &'static str) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(a.wrapping_add(b).wrap()),
        BinaryOp::Sub => Ok(a.wrapping_sub(b).wrap()),
        BinaryOp::Mul => Ok(a.wrapping_mul(b).wrap()),
        BinaryOp::Div if b == T::ZERO => Err(division_by_zero()),
        BinaryOp::Div => Ok(a.wrapping_div(b).wrap()),
        BinaryOp::Mod if b == T::ZERO => Err(division_by_zero()),
        BinaryOp::Mod => Ok(a.wrapping_rem(b).wrap()),
        BinaryOp::BitAnd => Ok(a.and(b).wrap()),
        BinaryOp::BitOr => Ok(a.or(b).wrap()),
        BinaryOp::BitXor => Ok(a.xor(b).wrap()),
        BinaryOp::AndNot => Ok(a.and_not(b).wrap()),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op(type_name, op)),
    }
}

/// Binary operations on floats (IEEE 754; division by zero yields ±Inf/NaN).
#[expect(clippy::float_cmp, reason = "Go float comparison is exact IEEE comparison")]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op("float64", op)),
    }
}

/// Binary operations on strings: concatenation and byte-wise ordering.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut result = String::with_capacity(a.len() + b.len());
            result.push_str(a);
            result.push_str(b);
            Ok(Value::string(&result))
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op("string", op)),
    }
}

/// Binary operations on booleans.
fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        _ => Err(invalid_binary_op("bool", op)),
    }
}

/// Arrays and structs support only `==` and `!=`.
fn eval_equality_only(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left.equals(right)?)),
        BinaryOp::NotEq => Ok(Value::Bool(!left.equals(right)?)),
        _ => Err(invalid_binary_op(left.type_name(), op)),
    }
}
