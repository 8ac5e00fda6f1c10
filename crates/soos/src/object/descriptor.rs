// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type identity for stream objects.
//!
//! A `TypeDescriptor` names exactly one runtime type. Two descriptors match
//! only when their names are identical; no structural comparison is done.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

/// Name-based type identity.
///
/// Hashes exactly like the underlying `str`, so sets of descriptors can be
/// probed with `&str` (see `Object::type_name`) without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor(Cow<'static, str>);

impl TypeDescriptor {
    pub const BOOLEAN: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::BOOLEAN));
    pub const BYTE: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::BYTE));
    pub const SHORT: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::SHORT));
    pub const CHAR: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::CHAR));
    pub const INTEGER: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::INTEGER));
    pub const LONG: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::LONG));
    pub const FLOAT: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::FLOAT));
    pub const DOUBLE: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::DOUBLE));
    pub const STRING: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::STRING));
    pub const OBJECT_ARRAY: TypeDescriptor = TypeDescriptor(Cow::Borrowed(names::OBJECT_ARRAY));

    /// Descriptor for a user record class (matches `ClassDesc::name`).
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        TypeDescriptor(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeDescriptor {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeDescriptor {
    fn from(name: &'static str) -> Self {
        TypeDescriptor(Cow::Borrowed(name))
    }
}

impl From<String> for TypeDescriptor {
    fn from(name: String) -> Self {
        TypeDescriptor(Cow::Owned(name))
    }
}

impl From<&Arc<str>> for TypeDescriptor {
    fn from(name: &Arc<str>) -> Self {
        TypeDescriptor(Cow::Owned(name.to_string()))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire names of the built-in types.
pub mod names {
    pub const BOOLEAN: &str = "soos.Boolean";
    pub const BYTE: &str = "soos.Byte";
    pub const SHORT: &str = "soos.Short";
    pub const CHAR: &str = "soos.Char";
    pub const INTEGER: &str = "soos.Integer";
    pub const LONG: &str = "soos.Long";
    pub const FLOAT: &str = "soos.Float";
    pub const DOUBLE: &str = "soos.Double";
    pub const STRING: &str = "soos.String";
    pub const OBJECT_ARRAY: &str = "soos.Object[]";

    /// Names reserved for built-in types; user record classes may not use them.
    pub fn is_builtin(name: &str) -> bool {
        [
            BOOLEAN,
            BYTE,
            SHORT,
            CHAR,
            INTEGER,
            LONG,
            FLOAT,
            DOUBLE,
            STRING,
            OBJECT_ARRAY,
        ]
        .contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_str_matches_descriptor() {
        let mut set = HashSet::new();
        set.insert(TypeDescriptor::STRING);
        set.insert(TypeDescriptor::named("demo.Point"));

        assert!(set.contains("soos.String"));
        assert!(set.contains("demo.Point"));
        assert!(!set.contains("demo.point"));
        assert!(set.contains(&TypeDescriptor::from(String::from("demo.Point"))));
    }

    #[test]
    fn test_borrowed_and_owned_names_are_equal() {
        let owned = TypeDescriptor::from(String::from(names::INTEGER));
        assert_eq!(owned, TypeDescriptor::INTEGER);
        assert_eq!(TypeDescriptor::INTEGER.to_string(), "soos.Integer");
    }

    #[test]
    fn test_builtin_names_are_reserved() {
        assert!(names::is_builtin("soos.Integer"));
        assert!(names::is_builtin("soos.Object[]"));
        assert!(!names::is_builtin("demo.Integer"));
    }
}
