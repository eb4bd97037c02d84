use super::*;
use pretty_assertions::assert_eq;

fn name(n: u32) -> Name {
    Name::from_raw(100 + n)
}

fn set(env: &mut Environment, name: Name, value: Value) -> bool {
    match env.lookup_mut(name) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

#[test]
fn globals_visible_inside_frames() {
    let mut env = Environment::new();
    env.define(name(0), Value::Int(1));
    env.push_frame();
    assert_eq!(env.lookup(name(0)), Some(&Value::Int(1)));
    assert!(set(&mut env, name(0), Value::Int(2)));
    env.pop_frame();
    assert_eq!(env.lookup(name(0)), Some(&Value::Int(2)));
}

#[test]
fn shadowing_restores_outer_binding() {
    let mut env = Environment::new();
    env.push_frame();
    env.define(name(1), Value::Int(1));
    env.push_scope();
    env.define(name(1), Value::Int(2));
    assert_eq!(env.lookup(name(1)), Some(&Value::Int(2)));
    assert!(set(&mut env, name(1), Value::Int(3)));
    env.pop_scope();
    assert_eq!(env.lookup(name(1)), Some(&Value::Int(1)));
}

#[test]
fn local_shadows_global() {
    let mut env = Environment::new();
    env.define_global(name(2), Value::string("global"));
    env.push_frame();
    env.define(name(2), Value::string("local"));
    assert_eq!(env.lookup(name(2)), Some(&Value::string("local")));
    env.pop_frame();
    assert_eq!(env.lookup(name(2)), Some(&Value::string("global")));
}

#[test]
fn callee_does_not_see_caller_locals() {
    let mut env = Environment::new();
    env.push_frame();
    env.define(name(3), Value::Int(1));
    env.push_frame();
    assert_eq!(env.lookup(name(3)), None);
    env.pop_frame();
    assert_eq!(env.lookup(name(3)), Some(&Value::Int(1)));
}

#[test]
fn write_reaches_the_innermost_binding() {
    let mut env = Environment::new();
    env.push_frame();
    env.define(name(4), Value::Int(1));
    env.push_scope();
    env.define(name(4), Value::Int(2));
    assert!(set(&mut env, name(4), Value::Int(3)));
    env.pop_scope();
    assert_eq!(env.lookup(name(4)), Some(&Value::Int(1)));
}

#[test]
fn blank_binds_nothing() {
    let mut env = Environment::new();
    env.define(Name::BLANK, Value::Int(1));
    env.define_global(Name::BLANK, Value::Int(1));
    assert_eq!(env.lookup(Name::BLANK), None);
}

#[test]
fn unbound_name_has_no_slot() {
    let mut env = Environment::new();
    assert!(!set(&mut env, name(6), Value::Int(0)));
}
