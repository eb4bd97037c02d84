use super::*;
use pretty_assertions::assert_eq;

#[test]
fn primitives_occupy_fixed_slots() {
    let table = TypeTable::new();
    assert_eq!(table.get(TypeId::INT), &Type::Int);
    assert_eq!(table.get(TypeId::FLOAT), &Type::Float);
    assert_eq!(table.get(TypeId::RUNE), &Type::Rune);
    assert_eq!(table.get(TypeId::STRING), &Type::String);
    assert_eq!(table.get(TypeId::BOOL), &Type::Bool);
    assert_eq!(table.get(TypeId::VOID), &Type::Void);
    assert!(table.is_empty());
}

#[test]
fn interning_dedupes_structural_types() {
    let mut table = TypeTable::new();
    let a = table.slice(TypeId::INT);
    let b = table.slice(TypeId::INT);
    let c = table.slice(TypeId::RUNE);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(table.len(), 8);
}

#[test]
fn results_collapse_single_and_empty() {
    let mut table = TypeTable::new();
    assert_eq!(table.results(&[]), TypeId::VOID);
    assert_eq!(table.results(&[TypeId::INT]), TypeId::INT);
    let pair = table.results(&[TypeId::INT, TypeId::STRING]);
    assert_eq!(
        table.get(pair),
        &Type::Tuple {
            elems: vec![TypeId::INT, TypeId::STRING]
        }
    );
}

#[test]
fn comparability_follows_components() {
    let interner = StringInterner::new();
    let mut table = TypeTable::new();
    let ints = table.slice(TypeId::INT);
    let arr = table.array(TypeId::INT, 3);
    let plain = table.structure(vec![Field {
        name: interner.intern("a"),
        ty: arr,
    }]);
    let holds_slice = table.structure(vec![Field {
        name: interner.intern("s"),
        ty: ints,
    }]);

    assert!(table.get(arr).is_comparable(&table));
    assert!(table.get(plain).is_comparable(&table));
    assert!(!table.get(ints).is_comparable(&table));
    assert!(!table.get(holds_slice).is_comparable(&table));
}

#[test]
fn display_uses_go_spelling() {
    let interner = StringInterner::new();
    let mut table = TypeTable::new();
    let arr = table.array(TypeId::FLOAT, 10);
    let s = table.structure(vec![
        Field {
            name: interner.intern("x"),
            ty: TypeId::INT,
        },
        Field {
            name: interner.intern("ys"),
            ty: arr,
        },
    ]);
    assert_eq!(table.display(arr, &interner), "[10]float64");
    assert_eq!(table.display(s, &interner), "struct { x int; ys [10]float64 }");
}
