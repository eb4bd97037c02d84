//! Runtime values.
//!
//! `Value` is a closed enum; every operation dispatches with an exhaustive
//! `match`. Copy semantics fall out of `Clone`:
//!
//! - `Array` and `Struct` own their elements, so a clone is a deep copy
//!   (value types);
//! - `Slice` is a header around a shared buffer, so a clone shares the
//!   buffer (reference type).
//!
//! The evaluator clones at every assignment, parameter binding and return.

mod format;
mod slice;

use std::rc::Rc;

use golite_ir::{Field, Name, Type, TypeId, TypeTable};

use crate::errors::{not_comparable, type_mismatch, EvalResult};

pub use format::format_float;
pub use slice::{GrowthPolicy, SliceValue};

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `int` (64-bit, wrapping).
    Int(i64),
    /// `rune` (32-bit, wrapping).
    Rune(i32),
    /// `float64`
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    /// `[N]T`
    Array(Vec<Value>),
    Struct(StructValue),
    /// `[]T`
    Slice(SliceValue),
    /// Results of a call to a function with several results.
    Tuple(Vec<Value>),
    /// Result of a call to a function without results.
    Void,
}

impl Value {
    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Rune(_) => "rune",
            Value::Float(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Slice(_) => "slice",
            Value::Tuple(_) => "tuple",
            Value::Void => "void",
        }
    }

    /// String value from text.
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(type_mismatch("bool", other.type_name())),
        }
    }

    /// Integer value usable as an index or shift count.
    pub fn as_index(&self) -> EvalResult<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Rune(r) => Ok(i64::from(*r)),
            other => Err(type_mismatch("integer", other.type_name())),
        }
    }

    /// Structural equality (`==`).
    ///
    /// Slices, tuples and void are not comparable; well-typed programs never
    /// reach those arms.
    pub fn equals(&self, other: &Value) -> EvalResult<bool> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a == b),
            (Value::Rune(a), Value::Rune(b)) => Ok(a == b),
            #[allow(clippy::float_cmp, reason = "Go `==` on floats is exact IEEE equality")]
            (Value::Float(a), Value::Float(b)) => Ok(a == b),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Str(a), Value::Str(b)) => Ok(a == b),
            (Value::Array(a), Value::Array(b)) => elements_equal(a, b),
            (Value::Struct(a), Value::Struct(b)) => elements_equal(&a.fields, &b.fields),
            (Value::Slice(_), _) | (_, Value::Slice(_)) => Err(not_comparable("slice")),
            (left, right) if left.type_name() == right.type_name() => {
                Err(not_comparable(left.type_name()))
            }
            (left, right) => Err(type_mismatch(left.type_name(), right.type_name())),
        }
    }
}

fn elements_equal(a: &[Value], b: &[Value]) -> EvalResult<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !x.equals(y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Struct value: shared field layout plus owned field values.
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    names: Rc<[Name]>,
    fields: Vec<Value>,
}

impl StructValue {
    pub fn new(names: Rc<[Name]>, fields: Vec<Value>) -> Self {
        debug_assert_eq!(names.len(), fields.len());
        StructValue { names, fields }
    }

    fn slot(&self, field: Name) -> Option<usize> {
        self.names.iter().position(|&n| n == field)
    }

    pub fn get(&self, field: Name) -> Option<&Value> {
        self.slot(field).and_then(|i| self.fields.get(i))
    }

    pub fn get_mut(&mut self, field: Name) -> Option<&mut Value> {
        self.slot(field).and_then(|i| self.fields.get_mut(i))
    }

    /// Field names in declaration order.
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    /// Field values in declaration order.
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }
}

/// Zero value of a static type.
///
/// Structs and arrays are zeroed recursively; slices are nil.
pub fn zero_value(ty: TypeId, types: &TypeTable) -> Value {
    match types.get(ty) {
        Type::Int => Value::Int(0),
        Type::Float => Value::Float(0.0),
        Type::Rune => Value::Rune(0),
        Type::String => Value::string(""),
        Type::Bool => Value::Bool(false),
        Type::Void => Value::Void,
        Type::Array { elem, len } => {
            let zero = zero_value(*elem, types);
            Value::Array(vec![zero; *len as usize])
        }
        Type::Slice { .. } => Value::Slice(SliceValue::nil()),
        Type::Struct { fields } => Value::Struct(zero_struct(fields, types)),
        Type::Tuple { elems } => Value::Tuple(elems.iter().map(|&e| zero_value(e, types)).collect()),
    }
}

fn zero_struct(fields: &[Field], types: &TypeTable) -> StructValue {
    let names: Rc<[Name]> = fields.iter().map(|f| f.name).collect();
    let values = fields.iter().map(|f| zero_value(f.ty, types)).collect();
    StructValue::new(names, values)
}

#[cfg(test)]
mod tests;
