#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use golite_ir::StringInterner;
use pretty_assertions::assert_eq;

fn point_type(interner: &StringInterner, types: &mut TypeTable) -> TypeId {
    types.structure(vec![
        Field {
            name: interner.intern("a"),
            ty: TypeId::INT,
        },
        Field {
            name: interner.intern("b"),
            ty: TypeId::STRING,
        },
    ])
}

#[test]
fn zero_values_of_primitives() {
    let types = TypeTable::new();
    assert_eq!(zero_value(TypeId::INT, &types), Value::Int(0));
    assert_eq!(zero_value(TypeId::RUNE, &types), Value::Rune(0));
    assert_eq!(zero_value(TypeId::FLOAT, &types), Value::Float(0.0));
    assert_eq!(zero_value(TypeId::STRING, &types), Value::string(""));
    assert_eq!(zero_value(TypeId::BOOL, &types), Value::Bool(false));
}

#[test]
fn zero_values_of_composites_are_recursive() {
    let interner = StringInterner::new();
    let mut types = TypeTable::new();
    let point = point_type(&interner, &mut types);
    let points = types.array(point, 2);
    let ints = types.slice(TypeId::INT);

    let Value::Array(items) = zero_value(points, &types) else {
        panic!("expected array");
    };
    assert_eq!(items.len(), 2);
    let Value::Struct(first) = &items[0] else {
        panic!("expected struct");
    };
    assert_eq!(first.get(interner.intern("a")), Some(&Value::Int(0)));
    assert_eq!(first.get(interner.intern("b")), Some(&Value::string("")));

    let Value::Slice(s) = zero_value(ints, &types) else {
        panic!("expected slice");
    };
    assert!(s.is_nil());
}

#[test]
fn struct_clone_is_deep() {
    let interner = StringInterner::new();
    let mut types = TypeTable::new();
    let point = point_type(&interner, &mut types);
    let a = interner.intern("a");

    let Value::Struct(x) = zero_value(point, &types) else {
        panic!("expected struct");
    };
    let mut y = x.clone();
    *y.get_mut(a).unwrap() = Value::Int(2);

    assert_eq!(x.get(a), Some(&Value::Int(0)));
    assert_eq!(y.get(a), Some(&Value::Int(2)));
}

#[test]
fn slice_clone_shares_buffer() {
    let s = SliceValue::from_values(vec![Value::Int(1)]);
    let x = Value::Slice(s);
    let y = x.clone();
    if let Value::Slice(inner) = &y {
        inner.set(0, Value::Int(9)).unwrap();
    }
    let Value::Slice(original) = &x else {
        panic!("expected slice");
    };
    assert_eq!(original.get(0).unwrap(), Value::Int(9));
}

#[test]
fn equality_is_structural() {
    let a = Value::Array(vec![Value::Int(1), Value::string("x")]);
    let b = Value::Array(vec![Value::Int(1), Value::string("x")]);
    let c = Value::Array(vec![Value::Int(1), Value::string("y")]);
    assert!(a.equals(&b).unwrap());
    assert!(!a.equals(&c).unwrap());
    assert!(!Value::Float(f64::NAN).equals(&Value::Float(f64::NAN)).unwrap());
}

#[test]
fn slices_are_not_comparable() {
    let s = Value::Slice(SliceValue::nil());
    let err = s.equals(&s.clone()).unwrap_err();
    assert_eq!(err.to_string(), "slice values are not comparable");
}

#[test]
fn mismatched_types_are_rejected() {
    let err = Value::Int(1).equals(&Value::Rune(1)).unwrap_err();
    assert_eq!(err.to_string(), "expected int, got rune");
}

#[test]
fn accessors_check_types() {
    assert!(Value::Bool(true).as_bool().unwrap());
    assert_eq!(Value::Rune(-3).as_index().unwrap(), -3);
    assert!(Value::string("1").as_index().is_err());
}
