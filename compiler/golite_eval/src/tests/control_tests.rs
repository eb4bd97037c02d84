//! Tests for statement signals.

use crate::exec::control::{
    return_value, spread_results, to_loop_action, to_switch_signal, LoopAction, Signal,
};
use crate::Value;
use pretty_assertions::assert_eq;

#[test]
fn loops_consume_break_and_continue() {
    assert_eq!(to_loop_action(Signal::Normal), LoopAction::Next);
    assert_eq!(to_loop_action(Signal::Continue), LoopAction::Next);
    assert_eq!(to_loop_action(Signal::Break), LoopAction::Exit);
}

#[test]
fn loops_propagate_return() {
    assert_eq!(
        to_loop_action(Signal::Return(Value::Int(1))),
        LoopAction::Propagate(Signal::Return(Value::Int(1)))
    );
}

#[test]
fn switch_consumes_only_break() {
    assert_eq!(to_switch_signal(Signal::Break), Signal::Normal);
    assert_eq!(to_switch_signal(Signal::Continue), Signal::Continue);
    assert_eq!(
        to_switch_signal(Signal::Return(Value::Void)),
        Signal::Return(Value::Void)
    );
}

#[test]
fn return_lists_shape_into_one_value() {
    assert_eq!(return_value(vec![]), Value::Void);
    assert_eq!(return_value(vec![Value::Int(1)]), Value::Int(1));
    assert_eq!(
        return_value(vec![Value::Int(1), Value::Bool(true)]),
        Value::Tuple(vec![Value::Int(1), Value::Bool(true)])
    );
}

#[test]
fn multi_results_spread_over_several_receivers() {
    let results = vec![Value::Tuple(vec![Value::Int(1), Value::Int(2)])];
    assert_eq!(
        spread_results(results.clone(), 2),
        vec![Value::Int(1), Value::Int(2)]
    );
    assert_eq!(spread_results(results.clone(), 1), results);
    assert_eq!(spread_results(vec![Value::Int(3)], 2), vec![Value::Int(3)]);
}
