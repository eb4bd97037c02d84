//! Rendering values for `print`/`println`.
//!
//! Scalars follow the Go builtin print routines byte for byte; in
//! particular floats always use `+d.dddddde+ddd`. Composites cannot reach
//! the builtins in a well-typed program and render in a debug form.

use std::fmt::{self, Write};

use super::Value;

/// Digits printed for a float, including the one before the point.
const FLOAT_DIGITS: usize = 7;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Rune(r) => write!(f, "{r}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) | Value::Tuple(items) => write_list(f, '[', items, ']'),
            Value::Struct(s) => write_list(f, '{', s.fields(), '}'),
            Value::Slice(s) => write_list(f, '[', &s.to_vec(), ']'),
            Value::Void => Ok(()),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    f.write_char(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{item}")?;
    }
    f.write_char(close)
}

/// Format a float the way Go's builtin `print` does: `+1.500000e+000`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "digit extraction truncates values already normalized into [0, 10)"
)]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Inf" } else { "+Inf" }.to_string();
    }

    let mut sign = '+';
    let mut exponent: i32 = 0;
    let mut v = value;
    if v == 0.0 {
        if v.is_sign_negative() {
            sign = '-';
        }
    } else {
        if v < 0.0 {
            v = -v;
            sign = '-';
        }
        // Normalize into [1, 10).
        while v >= 10.0 {
            exponent += 1;
            v /= 10.0;
        }
        while v < 1.0 {
            exponent -= 1;
            v *= 10.0;
        }
        // Round at the last printed digit.
        let mut half = 5.0;
        for _ in 0..FLOAT_DIGITS {
            half /= 10.0;
        }
        v += half;
        if v >= 10.0 {
            exponent += 1;
            v /= 10.0;
        }
    }

    let mut digits = [b'0'; FLOAT_DIGITS];
    for digit in &mut digits {
        let d = v as u8;
        *digit = b'0' + d;
        v -= f64::from(d);
        v *= 10.0;
    }

    let mut out = String::with_capacity(FLOAT_DIGITS + 7);
    out.push(sign);
    out.push(char::from(digits[0]));
    out.push('.');
    out.extend(digits[1..].iter().map(|&d| char::from(d)));
    out.push('e');
    out.push(if exponent < 0 { '-' } else { '+' });
    let exponent = exponent.unsigned_abs();
    let _ = write!(out, "{:03}", exponent);
    out
}
