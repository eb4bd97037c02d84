//! Interned identifier.
//!
//! Every identifier and string literal in a program is stored once in the
//! [`StringInterner`](crate::StringInterner) and referred to by a 32-bit
//! `Name`, so equality and hashing are integer operations.

use std::fmt;

/// Interned string identifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Pre-interned blank identifier `_`.
    pub const BLANK: Name = Name(1);

    /// Pre-interned `main`.
    pub const MAIN: Name = Name(2);

    /// Pre-interned `init`.
    pub const INIT: Name = Name(3);

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the blank identifier.
    #[inline]
    pub const fn is_blank(self) -> bool {
        self.0 == Self::BLANK.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
