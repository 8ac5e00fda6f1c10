// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Substitutable-type registry.
//!
//! A type is *substitutable* when it is immutable and value-equal: any two
//! equal instances are interchangeable for every reader of the stream. The
//! boxed scalars and strings qualify; user record types can be added.
//!
//! Two levels:
//!
//! - [`SubstitutableTypes`]: an owned set handed to each stream through its
//!   configuration.
//! - A process-wide append-only catalog ([`register`], [`snapshot`]) seeded
//!   with the built-ins. Streams copy it when they are constructed, so types
//!   must be registered before the writers that rely on them are created.

use std::collections::HashSet;
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::object::{Object, TypeDescriptor};

/// Built-in substitutable types.
pub const BUILTIN_TYPES: [TypeDescriptor; 9] = [
    TypeDescriptor::BOOLEAN,
    TypeDescriptor::BYTE,
    TypeDescriptor::SHORT,
    TypeDescriptor::CHAR,
    TypeDescriptor::INTEGER,
    TypeDescriptor::LONG,
    TypeDescriptor::FLOAT,
    TypeDescriptor::DOUBLE,
    TypeDescriptor::STRING,
];

/// Set of types whose equal instances may be collapsed into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutableTypes {
    types: HashSet<TypeDescriptor>,
}

impl SubstitutableTypes {
    /// No substitutable types: every write passes through unchanged.
    pub fn empty() -> Self {
        Self {
            types: HashSet::new(),
        }
    }

    /// The boxed scalars and `String`.
    pub fn builtin() -> Self {
        Self {
            types: BUILTIN_TYPES.into_iter().collect(),
        }
    }

    /// Add `ty`. Returns false if it was already present.
    pub fn register(&mut self, ty: impl Into<TypeDescriptor>) -> bool {
        self.types.insert(ty.into())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, ty: impl Into<TypeDescriptor>) -> Self {
        self.register(ty);
        self
    }

    /// Exact type-identity check for the runtime type of `obj`.
    pub fn is_substitutable(&self, obj: &Object) -> bool {
        self.types.contains(obj.type_name())
    }

    pub fn contains_type(&self, ty: &TypeDescriptor) -> bool {
        self.types.contains(ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }
}

impl Default for SubstitutableTypes {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<T: Into<TypeDescriptor>> Extend<T> for SubstitutableTypes {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.types.extend(iter.into_iter().map(Into::into));
    }
}

fn global() -> &'static RwLock<SubstitutableTypes> {
    static GLOBAL: OnceLock<RwLock<SubstitutableTypes>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(SubstitutableTypes::builtin()))
}

/// Add `ty` to the process-wide catalog. Idempotent.
///
/// Streams constructed afterwards (with the default configuration) treat
/// `ty` as substitutable; streams that already exist are unaffected.
pub fn register(ty: impl Into<TypeDescriptor>) -> bool {
    let ty = ty.into();
    let added = global().write().register(ty.clone());
    if added {
        log::debug!("[soos] registered substitutable type {}", ty);
    }
    added
}

/// Whether `ty` is in the process-wide catalog.
pub fn is_registered(ty: &TypeDescriptor) -> bool {
    global().read().contains_type(ty)
}

/// Copy of the process-wide catalog.
pub fn snapshot() -> SubstitutableTypes {
    global().read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ClassDesc, ObjectRef, Record};
    use std::sync::Arc;

    #[test]
    fn test_builtin_population() {
        let types = SubstitutableTypes::builtin();
        assert_eq!(types.len(), 9);
        for ty in BUILTIN_TYPES.iter() {
            assert!(types.contains_type(ty), "{} should be built in", ty);
        }
        assert!(!types.contains_type(&TypeDescriptor::OBJECT_ARRAY));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut types = SubstitutableTypes::empty();
        assert!(types.register("demo.Money"));
        assert!(!types.register("demo.Money"));
        assert_eq!(types.len(), 1);
    }

    #[test]
    fn test_membership_is_exact_type_identity() {
        let types = SubstitutableTypes::builtin().with("demo.Money");
        let money = Record::new(Arc::new(ClassDesc::new("demo.Money", Vec::new())), Vec::new())
            .expect("empty record");
        let other = Record::new(Arc::new(ClassDesc::new("demo.Moneys", Vec::new())), Vec::new())
            .expect("empty record");

        assert!(types.is_substitutable(&ObjectRef::from("x")));
        assert!(types.is_substitutable(&ObjectRef::from(1i64)));
        assert!(types.is_substitutable(&ObjectRef::record(money)));
        assert!(!types.is_substitutable(&ObjectRef::record(other)));
        assert!(!types.is_substitutable(&ObjectRef::array(Vec::new())));
    }

    #[test]
    fn test_global_catalog_is_append_only_snapshot() {
        let before = snapshot();
        assert!(register("registry_test.Unique"));
        assert!(!register("registry_test.Unique"));
        assert!(is_registered(&TypeDescriptor::named("registry_test.Unique")));
        assert!(!before.contains_type(&TypeDescriptor::named("registry_test.Unique")));
        assert!(snapshot().contains_type(&TypeDescriptor::STRING));
    }
}
