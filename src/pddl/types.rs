use std::collections::HashSet;

use super::TypeDecl;

pub type TypeId = usize;

type TypeSet = HashSet<TypeId>;

/// The implicit root of every type hierarchy.
pub const OBJECT: &str = "object";

/// `Types` is the collection of all types found from the `:types` section
/// within a PDDL domain, along with the parent relation between them.
///
/// Type names are case sensitive.  A type that only ever appears as the
/// parent of another is known but not declared, so it is not part of the
/// defined-type set.
#[derive(Debug)]
pub struct Types {
    types: Vec<String>,    // Type names where the index into the vector is the TypeId.
    declared: Vec<bool>,   // Whether the type was declared (or is `object`).  Indexed by TypeId.
    parents: Vec<TypeSet>, // Immediate parent TypeIds.  Vector is indexed by the child TypeId.
}

impl Default for Types {
    fn default() -> Self {
        let mut t = Types {
            types: vec![],
            declared: vec![],
            parents: vec![],
        };
        t.declare(OBJECT);
        t
    }
}

impl Types {
    /// `from_decls` builds the type forest of the `:types` declarations in
    /// `decls`.  `object` is always present.
    pub fn from_decls(decls: &[TypeDecl]) -> Self {
        let mut types = Types::default();

        for d in decls {
            let child = types.declare(&d.name);
            if let Some(parent) = &d.parent {
                let parent = types.insert(parent);
                types.relate(child, parent);
            }
        }
        types
    }

    /// `get` returns the `TypeId` of `name` if it exists.
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.types.iter().position(|s| s == name)
    }

    /// `name_of` returns the type name for of the given `id`.
    pub fn name_of(&self, id: TypeId) -> &str {
        &self.types[id]
    }

    /// `insert` inserts `s` and assigns it a `TypeId` if it hasn't already
    /// been seen.
    pub fn insert(&mut self, s: &str) -> TypeId {
        if let Some(id) = self.get(s) {
            id
        } else {
            self.types.push(s.to_string());
            self.declared.push(false);
            self.parents.push(TypeSet::new());
            self.types.len() - 1
        }
    }

    /// `declare` is like `insert` but also marks the type as declared.
    pub fn declare(&mut self, s: &str) -> TypeId {
        let id = self.insert(s);
        self.declared[id] = true;
        id
    }

    /// `is_declared` returns true if `name` is `object` or was declared
    /// within `:types`.
    pub fn is_declared(&self, name: &str) -> bool {
        self.get(name).map_or(false, |id| self.declared[id])
    }

    /// `relate` records `parent` as one of `child`'s parents.
    pub fn relate(&mut self, child: TypeId, parent: TypeId) {
        self.parents[child].insert(parent);
    }

    /// `is_ancestor_of` returns true if `ancestor` can be reached by
    /// following parent links from `child`.
    pub fn is_ancestor_of(&self, ancestor: TypeId, child: TypeId) -> bool {
        let mut seen = TypeSet::new();
        let mut stack: Vec<TypeId> = self.parents[child].iter().copied().collect();

        while let Some(id) = stack.pop() {
            if id == ancestor {
                return true;
            }
            if seen.insert(id) {
                stack.extend(self.parents[id].iter().copied());
            }
        }
        false
    }

    /// `has_circular_types` returns true if `id` ends up inheriting from itself.
    pub fn has_circular_types(&self, id: TypeId) -> bool {
        self.is_ancestor_of(id, id)
    }

    /// `circular` returns the declared types that inherit from themselves,
    /// ordered by where each name first appeared.
    pub fn circular(&self) -> Vec<&str> {
        (0..self.types.len())
            .filter(|&id| self.declared[id] && self.has_circular_types(id))
            .map(|id| self.name_of(id))
            .collect()
    }
}
