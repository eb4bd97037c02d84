//! The `print` and `println` builtins.
//!
//! `print` writes its operands back to back; `println` separates them with
//! one space and ends the line. A single multi-result call as the only
//! operand prints each of its results.

use std::fmt::Write;

use golite_ir::ExprId;

use super::Interpreter;
use crate::errors::EvalResult;
use crate::Value;

impl Interpreter<'_> {
    pub(super) fn exec_print(&mut self, args: &[ExprId]) -> EvalResult<()> {
        let values = self.eval_list(args)?;
        self.print_handler.print(&format_print(&values));
        Ok(())
    }

    pub(super) fn exec_println(&mut self, args: &[ExprId]) -> EvalResult<()> {
        let values = self.eval_list(args)?;
        self.print_handler.println(&format_println(&values));
        Ok(())
    }
}

fn operands(values: &[Value]) -> &[Value] {
    match values {
        [Value::Tuple(results)] => results,
        _ => values,
    }
}

/// Text written by `print`.
pub(crate) fn format_print(values: &[Value]) -> String {
    let mut out = String::new();
    for value in operands(values) {
        let _ = write!(out, "{value}");
    }
    out
}

/// Text written by `println`, without the newline.
pub(crate) fn format_println(values: &[Value]) -> String {
    let mut out = String::new();
    for (i, value) in operands(values).iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn print_concatenates() {
        let values = [Value::Int(1), Value::string("inc_glob"), Value::Int(1)];
        assert_eq!(format_print(&values), "1inc_glob1");
    }

    #[test]
    fn println_separates_with_spaces() {
        let values = [Value::Int(2), Value::string("inc_glob"), Value::Int(2)];
        assert_eq!(format_println(&values), "2 inc_glob 2");
    }

    #[test]
    fn println_mixed_scalars() {
        let values = [
            Value::Int(30),
            Value::Int(0),
            Value::Float(0.0),
            Value::string(""),
            Value::Bool(false),
        ];
        assert_eq!(format_println(&values), "30 0 +0.000000e+000  false");
    }

    #[test]
    fn single_tuple_spreads() {
        let values = [Value::Tuple(vec![Value::Int(1), Value::Bool(true)])];
        assert_eq!(format_println(&values), "1 true");
    }

    #[test]
    fn no_operands() {
        assert_eq!(format_println(&[]), "");
        assert_eq!(format_print(&[]), "");
    }
}
