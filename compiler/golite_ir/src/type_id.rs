//! Interned type identifier.
//!
//! Static types are interned into the program's [`TypeTable`](crate::TypeTable);
//! the primitive types occupy fixed slots so they can be named as constants.

use std::fmt;

/// Interned type identifier.
///
/// # Pre-interned Types
/// VOID, INT, FLOAT, RUNE, STRING, BOOL occupy slots 0 to 5 of every table.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const VOID: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const FLOAT: TypeId = TypeId(2);
    pub const RUNE: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const BOOL: TypeId = TypeId(5);

    /// First ID for composite types interned on demand.
    pub const FIRST_COMPOUND: u32 = 6;

    /// Create a `TypeId` from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Index into the type table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is one of the pre-interned primitive types.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_COMPOUND
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::VOID => write!(f, "TypeId::VOID"),
            Self::INT => write!(f, "TypeId::INT"),
            Self::FLOAT => write!(f, "TypeId::FLOAT"),
            Self::RUNE => write!(f, "TypeId::RUNE"),
            Self::STRING => write!(f, "TypeId::STRING"),
            Self::BOOL => write!(f, "TypeId::BOOL"),
            Self(raw) => write!(f, "TypeId({raw})"),
        }
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::VOID
    }
}
