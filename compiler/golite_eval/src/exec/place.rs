//! Projection paths and assignment places.
//!
//! An addressable expression such as `a.b[i].c` is resolved once into a
//! root plus a list of projections with every index already evaluated.
//! Reads walk the path by reference; writes walk it mutably, going through
//! the shared buffer when the path crosses a slice.
//!
//! A `Place` is the resolved target of an assignment. When the path crosses
//! a slice, the place captures the innermost slice header itself, so a later
//! assignment to the variable in the same statement does not redirect the
//! write.

use golite_ir::{Name, Span, StringInterner};
use smallvec::SmallVec;

use crate::errors::{index_out_of_bounds, not_indexable, undefined_field, EvalError, EvalResult};
use crate::{SliceValue, Value};

/// One step of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// `[index]` on an array or slice.
    Index { index: i64, span: Span },
    /// `.name` on a struct.
    Field { name: Name, span: Span },
}

impl Projection {
    pub fn span(&self) -> Span {
        match self {
            Projection::Index { span, .. } | Projection::Field { span, .. } => *span,
        }
    }
}

/// Projections of a resolved path.
pub type Projections = SmallVec<[Projection; 4]>;

/// Where a path starts.
#[derive(Clone, Debug, PartialEq)]
pub enum PathRoot {
    /// A variable, read in place.
    Var(Name, Span),
    /// A computed value, such as a call result.
    Value(Value),
}

/// Resolved assignment target.
#[derive(Clone, Debug, PartialEq)]
pub enum Place {
    /// `_`
    Blank,
    /// A variable, or a path into it that crosses no slice.
    Var {
        name: Name,
        span: Span,
        projections: Projections,
    },
    /// Element `index` of a slice, then `projections` inside that element.
    Element {
        slice: SliceValue,
        index: i64,
        span: Span,
        projections: Projections,
    },
}

fn index_fault(err: impl Into<EvalError>, span: Span) -> EvalError {
    err.into().with_span(span)
}

fn field_error(value: &Value, name: Name, span: Span, interner: &StringInterner) -> EvalError {
    undefined_field(interner.lookup(name), value.type_name()).with_span(span)
}

/// Read the value at `projections` below `value`.
pub fn read_projected(
    value: &Value,
    projections: &[Projection],
    interner: &StringInterner,
) -> EvalResult {
    let Some((first, rest)) = projections.split_first() else {
        return Ok(value.clone());
    };
    match (value, *first) {
        (Value::Array(items), Projection::Index { index, span }) => {
            let item = usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i))
                .ok_or_else(|| index_fault(index_out_of_bounds(index, items.len()), span))?;
            read_projected(item, rest, interner)
        }
        (Value::Slice(slice), Projection::Index { index, span }) => slice
            .with_element(index, |item| read_projected(item, rest, interner))
            .map_err(|kind| index_fault(kind, span))?,
        (Value::Str(s), Projection::Index { index, span }) if rest.is_empty() => {
            let byte = usize::try_from(index)
                .ok()
                .and_then(|i| s.as_bytes().get(i))
                .ok_or_else(|| index_fault(index_out_of_bounds(index, s.len()), span))?;
            Ok(Value::Int(i64::from(*byte)))
        }
        (Value::Struct(fields), Projection::Field { name, span }) => {
            let item = fields
                .get(name)
                .ok_or_else(|| field_error(value, name, span, interner))?;
            read_projected(item, rest, interner)
        }
        (other, Projection::Index { span, .. }) => {
            Err(not_indexable(other.type_name()).with_span(span))
        }
        (other, Projection::Field { name, span }) => Err(field_error(other, name, span, interner)),
    }
}

/// Overwrite the value at `projections` below `target`.
///
/// Bounds are checked here, at write time.
pub fn write_projected(
    target: &mut Value,
    projections: &[Projection],
    value: Value,
    interner: &StringInterner,
) -> EvalResult<()> {
    let Some((first, rest)) = projections.split_first() else {
        *target = value;
        return Ok(());
    };
    match (target, *first) {
        (Value::Array(items), Projection::Index { index, span }) => {
            let length = items.len();
            let item = usize::try_from(index)
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| index_fault(index_out_of_bounds(index, length), span))?;
            write_projected(item, rest, value, interner)
        }
        (Value::Slice(slice), Projection::Index { index, span }) => slice
            .with_element_mut(index, |item| write_projected(item, rest, value, interner))
            .map_err(|kind| index_fault(kind, span))?,
        (Value::Struct(fields), Projection::Field { name, span }) => match fields.get_mut(name) {
            Some(item) => write_projected(item, rest, value, interner),
            None => Err(undefined_field(interner.lookup(name), "struct").with_span(span)),
        },
        (other, Projection::Index { span, .. }) => {
            Err(not_indexable(other.type_name()).with_span(span))
        }
        (other, Projection::Field { name, span }) => Err(field_error(other, name, span, interner)),
    }
}

/// The innermost slice the path indexes, if any.
///
/// Returns the slice header and the position of its `Index` projection.
/// Never faults: an unreachable step ends the search, and the write that
/// follows reports the fault.
pub fn last_slice(value: &Value, projections: &[Projection]) -> Option<(SliceValue, usize)> {
    let (first, rest) = projections.split_first()?;
    let deeper = |found: Option<(SliceValue, usize)>| found.map(|(slice, at)| (slice, at + 1));
    match (value, *first) {
        (Value::Slice(slice), Projection::Index { index, .. }) => {
            let inner = slice
                .with_element(index, |item| last_slice(item, rest))
                .ok()
                .flatten();
            Some(deeper(inner).unwrap_or_else(|| (slice.clone(), 0)))
        }
        (Value::Array(items), Projection::Index { index, .. }) => {
            let item = usize::try_from(index).ok().and_then(|i| items.get(i))?;
            deeper(last_slice(item, rest))
        }
        (Value::Struct(fields), Projection::Field { name, .. }) => {
            deeper(last_slice(fields.get(name)?, rest))
        }
        _ => None,
    }
}

/// Build the place for a path rooted at a variable holding `current`.
pub fn place_for_var(name: Name, span: Span, current: &Value, projections: Projections) -> Place {
    match last_slice(current, &projections) {
        Some((slice, at)) => element_place(slice, at, projections),
        None => Place::Var {
            name,
            span,
            projections,
        },
    }
}

/// Build the place for a path rooted at a computed value.
///
/// Only a path through a slice is addressable.
pub fn place_for_value(value: &Value, projections: Projections) -> Option<Place> {
    let (slice, at) = last_slice(value, &projections)?;
    Some(element_place(slice, at, projections))
}

fn element_place(slice: SliceValue, at: usize, projections: Projections) -> Place {
    let (index, span) = match projections.get(at) {
        Some(Projection::Index { index, span }) => (*index, *span),
        _ => (0, Span::DUMMY),
    };
    Place::Element {
        slice,
        index,
        span,
        projections: projections.iter().skip(at + 1).copied().collect(),
    }
}
