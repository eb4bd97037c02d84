//! Explicit type conversions `T(x)`.
//!
//! Scalar conversions follow Go's rules. Conversions whose target has the
//! value's own representation are the identity, which covers conversions
//! to and from defined types, including array, slice and struct types.

use golite_ir::{StringInterner, Type, TypeId, TypeTable};

use crate::errors::{invalid_conversion, EvalResult};
use crate::Value;

/// Convert `value` to the type `target`.
///
/// - `int(f)` truncates toward zero; out-of-range values saturate.
/// - `rune(n)` keeps the low 32 bits.
/// - `string(n)` yields the UTF-8 encoding of code point `n`, or U+FFFD
///   when `n` is not a valid code point.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Go integer conversions truncate to the target width"
)]
pub fn convert(
    value: Value,
    target: TypeId,
    types: &TypeTable,
    interner: &StringInterner,
) -> EvalResult {
    match (types.get(target), value) {
        (Type::Int, Value::Int(n)) => Ok(Value::Int(n)),
        (Type::Int, Value::Rune(r)) => Ok(Value::Int(i64::from(r))),
        (Type::Int, Value::Float(f)) => Ok(Value::Int(f as i64)),

        (Type::Rune, Value::Rune(r)) => Ok(Value::Rune(r)),
        (Type::Rune, Value::Int(n)) => Ok(Value::Rune(n as i32)),
        (Type::Rune, Value::Float(f)) => Ok(Value::Rune(f as i64 as i32)),

        (Type::Float, Value::Float(f)) => Ok(Value::Float(f)),
        #[expect(clippy::cast_precision_loss, reason = "float64(int) rounds like Go")]
        (Type::Float, Value::Int(n)) => Ok(Value::Float(n as f64)),
        (Type::Float, Value::Rune(r)) => Ok(Value::Float(f64::from(r))),

        (Type::String, Value::Str(s)) => Ok(Value::Str(s)),
        (Type::String, Value::Int(n)) => Ok(code_point_string(n)),
        (Type::String, Value::Rune(r)) => Ok(code_point_string(i64::from(r))),

        (Type::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),

        (Type::Array { .. }, value @ Value::Array(_))
        | (Type::Slice { .. }, value @ Value::Slice(_))
        | (Type::Struct { .. }, value @ Value::Struct(_)) => Ok(value),

        (_, value) => Err(invalid_conversion(
            value.type_name(),
            types.display(target, interner),
        )),
    }
}

fn code_point_string(n: i64) -> Value {
    let c = u32::try_from(n)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    let mut buf = [0u8; 4];
    Value::string(c.encode_utf8(&mut buf))
}
