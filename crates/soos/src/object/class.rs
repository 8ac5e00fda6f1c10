// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Class descriptors and record values.

use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use super::descriptor::{names, TypeDescriptor};
use super::ObjectRef;
use crate::error::{Result, StreamError};

/// Field type classification (one wire type code per kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Object,
}

impl FieldKind {
    pub const fn type_code(self) -> u8 {
        match self {
            FieldKind::Boolean => b'Z',
            FieldKind::Byte => b'B',
            FieldKind::Short => b'S',
            FieldKind::Char => b'C',
            FieldKind::Int => b'I',
            FieldKind::Long => b'J',
            FieldKind::Float => b'F',
            FieldKind::Double => b'D',
            FieldKind::Object => b'L',
        }
    }

    pub fn from_type_code(code: u8) -> Option<Self> {
        Some(match code {
            b'Z' => FieldKind::Boolean,
            b'B' => FieldKind::Byte,
            b'S' => FieldKind::Short,
            b'C' => FieldKind::Char,
            b'I' => FieldKind::Int,
            b'J' => FieldKind::Long,
            b'F' => FieldKind::Float,
            b'D' => FieldKind::Double,
            b'L' => FieldKind::Object,
            _ => return None,
        })
    }
}

/// Layout of a single field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDesc {
    pub name: Arc<str>,
    pub kind: FieldKind,
}

impl FieldDesc {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: Arc::from(name),
            kind,
        }
    }
}

/// Class descriptor: name plus ordered field layout.
///
/// Written once per stream (until reset) and back-referenced afterwards.
/// Two descriptors with the same name but different layouts are distinct
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassDesc {
    name: Arc<str>,
    fields: Box<[FieldDesc]>,
}

impl ClassDesc {
    pub fn new(name: &str, fields: Vec<FieldDesc>) -> Self {
        Self {
            name: Arc::from(name),
            fields: fields.into_boxed_slice(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDesc] {
        &self.fields
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::from(&self.name)
    }

    /// Descriptor shared by every boxed scalar of `kind`.
    ///
    /// Returns `None` for `FieldKind::Object`.
    pub fn scalar(kind: FieldKind) -> Option<&'static ClassDesc> {
        static SCALARS: OnceLock<[ClassDesc; 8]> = OnceLock::new();
        let scalars = SCALARS.get_or_init(|| {
            let one = |name: &str, kind| ClassDesc::new(name, vec![FieldDesc::new("value", kind)]);
            [
                one(names::BOOLEAN, FieldKind::Boolean),
                one(names::BYTE, FieldKind::Byte),
                one(names::SHORT, FieldKind::Short),
                one(names::CHAR, FieldKind::Char),
                one(names::INTEGER, FieldKind::Int),
                one(names::LONG, FieldKind::Long),
                one(names::FLOAT, FieldKind::Float),
                one(names::DOUBLE, FieldKind::Double),
            ]
        });
        let index = match kind {
            FieldKind::Boolean => 0,
            FieldKind::Byte => 1,
            FieldKind::Short => 2,
            FieldKind::Char => 3,
            FieldKind::Int => 4,
            FieldKind::Long => 5,
            FieldKind::Float => 6,
            FieldKind::Double => 7,
            FieldKind::Object => return None,
        };
        Some(&scalars[index])
    }

    /// Descriptor written in front of object arrays.
    pub fn object_array() -> &'static ClassDesc {
        static ARRAY: OnceLock<ClassDesc> = OnceLock::new();
        ARRAY.get_or_init(|| ClassDesc::new(names::OBJECT_ARRAY, Vec::new()))
    }

    /// Kind of the boxed scalar this descriptor encodes, if it is one.
    pub(crate) fn scalar_kind(&self) -> Option<FieldKind> {
        match self.fields.as_ref() {
            [field] if field.kind != FieldKind::Object => {
                let builtin = ClassDesc::scalar(field.kind)?;
                (builtin == self).then_some(field.kind)
            }
            _ => None,
        }
    }
}

/// A single field value. Floats compare by bit pattern.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Object(Option<ObjectRef>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Byte(_) => FieldKind::Byte,
            FieldValue::Short(_) => FieldKind::Short,
            FieldValue::Char(_) => FieldKind::Char,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Long(_) => FieldKind::Long,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Double(_) => FieldKind::Double,
            FieldValue::Object(_) => FieldKind::Object,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            FieldValue::Object(obj) => obj.as_ref(),
            _ => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a == b,
            (FieldValue::Byte(a), FieldValue::Byte(b)) => a == b,
            (FieldValue::Short(a), FieldValue::Short(b)) => a == b,
            (FieldValue::Char(a), FieldValue::Char(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Long(a), FieldValue::Long(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Double(a), FieldValue::Double(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Object(a), FieldValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            FieldValue::Boolean(v) => v.hash(state),
            FieldValue::Byte(v) => v.hash(state),
            FieldValue::Short(v) => v.hash(state),
            FieldValue::Char(v) => v.hash(state),
            FieldValue::Int(v) => v.hash(state),
            FieldValue::Long(v) => v.hash(state),
            FieldValue::Float(v) => v.to_bits().hash(state),
            FieldValue::Double(v) => v.to_bits().hash(state),
            FieldValue::Object(v) => v.hash(state),
        }
    }
}

/// Instance of a user class: descriptor plus one value per field.
///
/// Immutable once built, which is what makes registered record types safe
/// to substitute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    desc: Arc<ClassDesc>,
    values: Box<[FieldValue]>,
}

impl Record {
    /// Build a record, checking arity and field kinds against `desc`.
    ///
    /// Classes named like a built-in type are rejected: on the wire they
    /// would decode as that type instead of as a record.
    pub fn new(desc: Arc<ClassDesc>, values: Vec<FieldValue>) -> Result<Self> {
        if names::is_builtin(desc.name()) {
            return Err(StreamError::invalid(format!(
                "class name {} is reserved for a built-in type",
                desc.name()
            )));
        }
        if desc.fields().len() != values.len() {
            return Err(StreamError::invalid(format!(
                "class {} declares {} fields, got {}",
                desc.name(),
                desc.fields().len(),
                values.len()
            )));
        }
        for (field, value) in desc.fields().iter().zip(&values) {
            if field.kind != value.kind() {
                return Err(StreamError::invalid(format!(
                    "field {}.{} is {:?}, got {:?}",
                    desc.name(),
                    field.name,
                    field.kind,
                    value.kind()
                )));
            }
        }
        Ok(Self {
            desc,
            values: values.into_boxed_slice(),
        })
    }

    pub fn desc(&self) -> &Arc<ClassDesc> {
        &self.desc
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.desc
            .fields()
            .iter()
            .position(|field| &*field.name == name)
            .map(|index| &self.values[index])
    }
}
