//! Static types and the per-program type table.
//!
//! Named types are resolved by the front end to their underlying structure,
//! so the table only ever holds structural types. Interning dedupes: two
//! structurally equal types share a `TypeId`.

use crate::{Name, StringInterner, TypeId};
use rustc_hash::FxHashMap;

/// A struct field: name and type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: Name,
    pub ty: TypeId,
}

/// Structural type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// Result type of a function without results.
    Void,
    Int,
    Float,
    Rune,
    String,
    Bool,
    /// `[len]elem`
    Array { elem: TypeId, len: u32 },
    /// `[]elem`
    Slice { elem: TypeId },
    /// `struct { fields }`
    Struct { fields: Vec<Field> },
    /// Results of a function with more than one result.
    Tuple { elems: Vec<TypeId> },
}

impl Type {
    /// Whether values of this type support `==`.
    ///
    /// Slices never do; structs and arrays do when all their parts do.
    pub fn is_comparable(&self, table: &TypeTable) -> bool {
        match self {
            Type::Int | Type::Float | Type::Rune | Type::String | Type::Bool => true,
            Type::Void | Type::Slice { .. } | Type::Tuple { .. } => false,
            Type::Array { elem, .. } => table.get(*elem).is_comparable(table),
            Type::Struct { fields } => fields.iter().all(|f| table.get(f.ty).is_comparable(table)),
        }
    }
}

/// Type table: interned structural types addressed by `TypeId`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeTable {
    types: Vec<Type>,
    #[cfg_attr(feature = "serde", serde(skip))]
    lookup: FxHashMap<Type, TypeId>,
}

impl TypeTable {
    /// Create a table holding the primitive types at their fixed slots.
    pub fn new() -> Self {
        let mut table = TypeTable {
            types: Vec::with_capacity(32),
            lookup: FxHashMap::default(),
        };
        for ty in [
            Type::Void,
            Type::Int,
            Type::Float,
            Type::Rune,
            Type::String,
            Type::Bool,
        ] {
            table.intern(ty);
        }
        table
    }

    /// Intern a type, returning the existing id for structurally equal types.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.lookup.get(&ty) {
            return id;
        }
        let id = TypeId::new(
            u32::try_from(self.types.len()).unwrap_or_else(|_| panic!("type table overflow")),
        );
        self.types.push(ty.clone());
        self.lookup.insert(ty, id);
        id
    }

    /// Get the type for an id.
    ///
    /// Ids from a different table resolve to `Void`.
    pub fn get(&self, id: TypeId) -> &Type {
        self.types.get(id.index()).unwrap_or(&Type::Void)
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the table holds only the primitive types.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= TypeId::FIRST_COMPOUND as usize
    }

    /// `[len]elem`
    pub fn array(&mut self, elem: TypeId, len: u32) -> TypeId {
        self.intern(Type::Array { elem, len })
    }

    /// `[]elem`
    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.intern(Type::Slice { elem })
    }

    /// `struct { fields }`
    pub fn structure(&mut self, fields: Vec<Field>) -> TypeId {
        self.intern(Type::Struct { fields })
    }

    /// Result type of a function: void, the single result, or a tuple.
    pub fn results(&mut self, results: &[TypeId]) -> TypeId {
        match results {
            [] => TypeId::VOID,
            [single] => *single,
            many => self.intern(Type::Tuple {
                elems: many.to_vec(),
            }),
        }
    }

    /// Rebuild the dedupe index after deserialization.
    #[cfg(feature = "serde")]
    pub fn reindex(&mut self) {
        self.lookup = self
            .types
            .iter()
            .enumerate()
            .filter_map(|(i, ty)| Some((ty.clone(), TypeId::new(u32::try_from(i).ok()?))))
            .collect();
    }

    /// Render a type the way Go spells it.
    pub fn display(&self, id: TypeId, interner: &StringInterner) -> String {
        match self.get(id) {
            Type::Void => "void".to_string(),
            Type::Int => "int".to_string(),
            Type::Float => "float64".to_string(),
            Type::Rune => "rune".to_string(),
            Type::String => "string".to_string(),
            Type::Bool => "bool".to_string(),
            Type::Array { elem, len } => format!("[{len}]{}", self.display(*elem, interner)),
            Type::Slice { elem } => format!("[]{}", self.display(*elem, interner)),
            Type::Struct { fields } => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{} {}", interner.lookup(f.name), self.display(f.ty, interner)))
                    .collect();
                format!("struct {{ {} }}", fields.join("; "))
            }
            Type::Tuple { elems } => {
                let elems: Vec<String> = elems.iter().map(|e| self.display(*e, interner)).collect();
                format!("({})", elems.join(", "))
            }
        }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
