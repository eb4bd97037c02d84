//! Slice headers over shared backing buffers.
//!
//! A slice is `(buffer, offset, len, cap)`. Copying a header shares the
//! buffer, so writes through one header are visible through every other
//! header on the same buffer. `append` writes in place while there is
//! spare capacity and reallocates once `len == cap`, which is the only
//! point where two headers stop aliasing.
//!
//! The buffer `Vec` holds the high-water mark of written elements; its
//! length never exceeds the capacity recorded in the headers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::errors::FaultKind;

type Buffer = Rc<RefCell<Vec<Value>>>;

/// Capacity growth applied when `append` runs out of room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrowthPolicy {
    /// New capacity is `max(1, 2 * cap)`.
    #[default]
    Doubling,
    /// New capacity is exactly the new length; every append past the
    /// length reallocates.
    Exact,
}

impl GrowthPolicy {
    /// Capacity of the buffer allocated to hold `needed` elements.
    #[inline]
    pub fn grow(self, cap: usize, needed: usize) -> usize {
        match self {
            GrowthPolicy::Doubling => cap.saturating_mul(2).max(1).max(needed),
            GrowthPolicy::Exact => needed,
        }
    }
}

/// Slice header.
#[derive(Clone, Default)]
pub struct SliceValue {
    buffer: Option<Buffer>,
    offset: usize,
    len: usize,
    cap: usize,
}

impl SliceValue {
    /// The nil slice: no buffer, length and capacity 0.
    pub fn nil() -> Self {
        Self::default()
    }

    /// A slice over a fresh buffer holding `items`, with `cap == len`.
    pub fn from_values(items: Vec<Value>) -> Self {
        let len = items.len();
        SliceValue {
            buffer: Some(Rc::new(RefCell::new(items))),
            offset: 0,
            len,
            cap: len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        self.buffer.is_none()
    }

    /// Whether both headers reference the same backing buffer.
    pub fn shares_buffer(&self, other: &SliceValue) -> bool {
        match (&self.buffer, &other.buffer) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Buffer position of `index`, bounds-checked against the length.
    fn position(&self, index: i64) -> Result<usize, FaultKind> {
        if self.buffer.is_none() {
            return Err(FaultKind::NilDereference);
        }
        match usize::try_from(index) {
            Ok(i) if i < self.len => Ok(self.offset + i),
            _ => Err(FaultKind::IndexOutOfBounds {
                index,
                length: self.len,
            }),
        }
    }

    /// Copy of the element at `index`.
    pub fn get(&self, index: i64) -> Result<Value, FaultKind> {
        let pos = self.position(index)?;
        let buffer = self.buffer.as_ref().ok_or(FaultKind::NilDereference)?;
        let items = buffer.borrow();
        items.get(pos).cloned().ok_or(FaultKind::IndexOutOfBounds {
            index,
            length: self.len,
        })
    }

    /// Run `f` on a borrow of the element at `index`.
    pub fn with_element<R>(&self, index: i64, f: impl FnOnce(&Value) -> R) -> Result<R, FaultKind> {
        let pos = self.position(index)?;
        let buffer = self.buffer.as_ref().ok_or(FaultKind::NilDereference)?;
        let items = buffer.borrow();
        let slot = items.get(pos).ok_or(FaultKind::IndexOutOfBounds {
            index,
            length: self.len,
        })?;
        Ok(f(slot))
    }

    /// Run `f` on the element at `index` in the shared buffer.
    pub fn with_element_mut<R>(
        &self,
        index: i64,
        f: impl FnOnce(&mut Value) -> R,
    ) -> Result<R, FaultKind> {
        let pos = self.position(index)?;
        let buffer = self.buffer.as_ref().ok_or(FaultKind::NilDereference)?;
        let mut items = buffer.borrow_mut();
        let slot = items.get_mut(pos).ok_or(FaultKind::IndexOutOfBounds {
            index,
            length: self.len,
        })?;
        Ok(f(slot))
    }

    /// Overwrite the element at `index`.
    pub fn set(&self, index: i64, value: Value) -> Result<(), FaultKind> {
        self.with_element_mut(index, |slot| *slot = value)
    }

    /// `append(s, value)`.
    ///
    /// With spare capacity the value lands in the shared buffer and the
    /// returned header aliases `self`. Otherwise the visible elements are
    /// copied into a new buffer sized by `policy`.
    #[must_use]
    pub fn append(&self, value: Value, policy: GrowthPolicy) -> SliceValue {
        let new_len = self.len.saturating_add(1);

        if let Some(buffer) = self.buffer.as_ref().filter(|_| self.len < self.cap) {
            let pos = self.offset + self.len;
            let mut items = buffer.borrow_mut();
            if pos < items.len() {
                items[pos] = value;
            } else {
                items.push(value);
            }
            return SliceValue {
                buffer: Some(Rc::clone(buffer)),
                offset: self.offset,
                len: new_len,
                cap: self.cap,
            };
        }

        let cap = policy.grow(self.cap, new_len);
        let mut items = Vec::with_capacity(cap);
        items.extend(self.to_vec());
        items.push(value);
        tracing::trace!(old_cap = self.cap, new_cap = cap, "slice buffer reallocated");
        SliceValue {
            buffer: Some(Rc::new(RefCell::new(items))),
            offset: 0,
            len: new_len,
            cap,
        }
    }

    /// Copies of the visible elements.
    pub fn to_vec(&self) -> Vec<Value> {
        match &self.buffer {
            Some(buffer) => {
                let items = buffer.borrow();
                let end = (self.offset + self.len).min(items.len());
                items
                    .get(self.offset..end)
                    .map(<[Value]>::to_vec)
                    .unwrap_or_default()
            }
            None => Vec::new(),
        }
    }
}

/// Header identity: same buffer, same window.
impl PartialEq for SliceValue {
    fn eq(&self, other: &Self) -> bool {
        let same_buffer = self.shares_buffer(other) || (self.is_nil() && other.is_nil());
        same_buffer && self.offset == other.offset && self.len == other.len && self.cap == other.cap
    }
}

impl fmt::Debug for SliceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slice(len={}, cap={}) ", self.len, self.cap)?;
        f.debug_list().entries(self.to_vec()).finish()
    }
}
