//! Control signals produced by statement execution.
//!
//! Every statement returns a `Signal`; loops and switches translate the
//! signals of their bodies with `to_loop_action` and `to_switch_signal`.

use crate::Value;

/// Outcome of executing a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// Fell through to the next statement.
    Normal,
    Break,
    Continue,
    /// `return`, carrying the result (`Void`, one value, or a `Tuple`).
    Return(Value),
}

impl Signal {
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, Signal::Normal)
    }
}

/// What a loop does after one iteration of its body.
#[derive(Clone, Debug, PartialEq)]
pub enum LoopAction {
    /// Run the post statement and test the condition again.
    Next,
    /// Leave the loop normally.
    Exit,
    /// Leave the loop and pass the signal outward.
    Propagate(Signal),
}

/// Translate a loop body's signal.
///
/// `break` and `continue` always target the innermost loop or switch, so the
/// loop consumes both.
pub fn to_loop_action(signal: Signal) -> LoopAction {
    match signal {
        Signal::Normal | Signal::Continue => LoopAction::Next,
        Signal::Break => LoopAction::Exit,
        ret @ Signal::Return(_) => LoopAction::Propagate(ret),
    }
}

/// Translate a switch clause's signal.
///
/// A `break` ends the switch; `continue` belongs to the enclosing loop.
pub fn to_switch_signal(signal: Signal) -> Signal {
    match signal {
        Signal::Break => Signal::Normal,
        other => other,
    }
}

/// Shape a `return` list into a single value.
pub fn return_value(mut values: Vec<Value>) -> Value {
    match values.len() {
        0 => Value::Void,
        1 => values.pop().unwrap_or(Value::Void),
        _ => Value::Tuple(values),
    }
}

/// Spread a lone multi-result value over `arity` receivers.
///
/// `a, b := f()` and `g(f())` receive `f`'s results one by one.
pub fn spread_results(mut values: Vec<Value>, arity: usize) -> Vec<Value> {
    if arity > 1 && matches!(values.as_slice(), [Value::Tuple(_)]) {
        if let Some(Value::Tuple(results)) = values.pop() {
            return results;
        }
    }
    values
}
