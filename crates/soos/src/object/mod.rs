// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object model written to and read from object streams.
//!
//! Every value handed to `write_object` is an [`ObjectRef`]: a shared,
//! reference-counted [`Object`]. The handle carries two notions of sameness:
//!
//! - **Identity** (`ObjectRef::ptr_eq`): the object stream encodes a second
//!   write of the *same* instance as a back-reference.
//! - **Equality** (`PartialEq`/`Hash`): the type's own value contract, used
//!   to find an interchangeable instance that was already written.
//!
//! `ObjectRef` is `!Send`; streams and their object graphs live on one thread.

pub mod class;
pub mod descriptor;

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

pub use class::{ClassDesc, FieldDesc, FieldKind, FieldValue, Record};
pub use descriptor::{names, TypeDescriptor};

/// A value that can be written with `write_object`.
pub enum Object {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Record(Record),
    /// Object array; interior-mutable so graphs can contain cycles.
    Array(RefCell<Vec<Option<ObjectRef>>>),
}

impl Object {
    /// Runtime type name, as matched against the substitutable-type set.
    pub fn type_name(&self) -> &str {
        match self {
            Object::Boolean(_) => names::BOOLEAN,
            Object::Byte(_) => names::BYTE,
            Object::Short(_) => names::SHORT,
            Object::Char(_) => names::CHAR,
            Object::Integer(_) => names::INTEGER,
            Object::Long(_) => names::LONG,
            Object::Float(_) => names::FLOAT,
            Object::Double(_) => names::DOUBLE,
            Object::String(_) => names::STRING,
            Object::Record(record) => record.desc().name(),
            Object::Array(_) => names::OBJECT_ARRAY,
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        match self {
            Object::Record(record) => record.desc().type_descriptor(),
            Object::Array(_) => TypeDescriptor::OBJECT_ARRAY,
            _ => TypeDescriptor::from(self.type_name().to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Object::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&RefCell<Vec<Option<ObjectRef>>>> {
        match self {
            Object::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Boxed scalar as a field value (used for the single `value` field).
    pub(crate) fn scalar_value(&self) -> Option<FieldValue> {
        Some(match *self {
            Object::Boolean(v) => FieldValue::Boolean(v),
            Object::Byte(v) => FieldValue::Byte(v),
            Object::Short(v) => FieldValue::Short(v),
            Object::Char(v) => FieldValue::Char(v),
            Object::Integer(v) => FieldValue::Int(v),
            Object::Long(v) => FieldValue::Long(v),
            Object::Float(v) => FieldValue::Float(v),
            Object::Double(v) => FieldValue::Double(v),
            _ => return None,
        })
    }

    pub(crate) fn from_scalar(value: FieldValue) -> Option<Object> {
        Some(match value {
            FieldValue::Boolean(v) => Object::Boolean(v),
            FieldValue::Byte(v) => Object::Byte(v),
            FieldValue::Short(v) => Object::Short(v),
            FieldValue::Char(v) => Object::Char(v),
            FieldValue::Int(v) => Object::Integer(v),
            FieldValue::Long(v) => Object::Long(v),
            FieldValue::Float(v) => Object::Float(v),
            FieldValue::Double(v) => Object::Double(v),
            FieldValue::Object(_) => return None,
        })
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Byte(a), Object::Byte(b)) => a == b,
            (Object::Short(a), Object::Short(b)) => a == b,
            (Object::Char(a), Object::Char(b)) => a == b,
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Long(a), Object::Long(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a.to_bits() == b.to_bits(),
            (Object::Double(a), Object::Double(b)) => a.to_bits() == b.to_bits(),
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Record(a), Object::Record(b)) => a == b,
            // Arrays are mutable containers: equal only to themselves.
            (Object::Array(_), Object::Array(_)) => std::ptr::eq(self, other),
            _ => false,
        }
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name().hash(state);
        match self {
            Object::Boolean(v) => v.hash(state),
            Object::Byte(v) => v.hash(state),
            Object::Short(v) => v.hash(state),
            Object::Char(v) => v.hash(state),
            Object::Integer(v) => v.hash(state),
            Object::Long(v) => v.hash(state),
            Object::Float(v) => v.to_bits().hash(state),
            Object::Double(v) => v.to_bits().hash(state),
            Object::String(v) => v.hash(state),
            Object::Record(v) => v.hash(state),
            Object::Array(_) => std::ptr::hash(self, state),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Boolean(v) => write!(f, "Boolean({})", v),
            Object::Byte(v) => write!(f, "Byte({})", v),
            Object::Short(v) => write!(f, "Short({})", v),
            Object::Char(v) => write!(f, "Char({:#06x})", v),
            Object::Integer(v) => write!(f, "Integer({})", v),
            Object::Long(v) => write!(f, "Long({})", v),
            Object::Float(v) => write!(f, "Float({})", v),
            Object::Double(v) => write!(f, "Double({})", v),
            Object::String(v) => write!(f, "String({:?})", v),
            Object::Record(record) => f
                .debug_struct("Record")
                .field("class", &record.desc().name())
                .field("values", &record.values())
                .finish(),
            // Elements are not printed: arrays may contain themselves.
            Object::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array(len={})", items.len()),
                Err(_) => write!(f, "Array(<borrowed>)"),
            },
        }
    }
}

/// Shared handle to an [`Object`].
#[derive(Clone)]
pub struct ObjectRef(Rc<Object>);

impl ObjectRef {
    pub fn new(object: Object) -> Self {
        ObjectRef(Rc::new(object))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Object::String(value.into()))
    }

    pub fn record(record: Record) -> Self {
        Self::new(Object::Record(record))
    }

    pub fn array(items: Vec<Option<ObjectRef>>) -> Self {
        Self::new(Object::Array(RefCell::new(items)))
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(a: &ObjectRef, b: &ObjectRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Address of the instance, stable for as long as a handle is alive.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl std::ops::Deref for ObjectRef {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.0
    }
}

impl AsRef<Object> for ObjectRef {
    fn as_ref(&self) -> &Object {
        &self.0
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for ObjectRef {}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Object> for ObjectRef {
    fn from(object: Object) -> Self {
        ObjectRef::new(object)
    }
}

impl From<&str> for ObjectRef {
    fn from(value: &str) -> Self {
        ObjectRef::string(value)
    }
}

impl From<String> for ObjectRef {
    fn from(value: String) -> Self {
        ObjectRef::string(value)
    }
}

impl From<Record> for ObjectRef {
    fn from(record: Record) -> Self {
        ObjectRef::record(record)
    }
}

macro_rules! impl_from_scalar {
    ($type:ty, $variant:ident) => {
        impl From<$type> for ObjectRef {
            fn from(value: $type) -> Self {
                ObjectRef::new(Object::$variant(value))
            }
        }
    };
}

impl_from_scalar!(bool, Boolean);
impl_from_scalar!(i8, Byte);
impl_from_scalar!(i16, Short);
impl_from_scalar!(i32, Integer);
impl_from_scalar!(i64, Long);
impl_from_scalar!(f32, Float);
impl_from_scalar!(f64, Double);
