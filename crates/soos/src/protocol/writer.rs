// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object stream encoder.

use std::collections::HashSet;
use std::io::Write;

use super::block::BlockOutput;
use super::constants::*;
use super::handles::HandleTable;
use crate::error::{Result, StreamError};
use crate::object::{ClassDesc, FieldValue, Object, ObjectRef, Record};
use crate::output::{forward_primitives, ObjectOutput};

/// Encoder: writes the versioned object stream format.
///
/// Every object instance is numbered the first time it is written; writing
/// the same instance again (by identity) emits a back-reference. `reset`
/// forgets all numbered instances and tells the reader to do the same.
///
/// Graphs the reader cannot rebuild are refused with `InvalidData`: a record
/// reached again from inside its own fields (records are immutable, so the
/// reader cannot hand out a reference before the fields are read), and
/// nesting deeper than `MAX_NESTING_DEPTH`.
pub struct ObjectWriter<W: Write> {
    out: BlockOutput<W>,
    handles: HandleTable,
    /// Addresses of records whose fields are being written
    incomplete: HashSet<usize>,
    depth: usize,
}

impl<W: Write> ObjectWriter<W> {
    /// Create a new writer and emit the stream header.
    pub fn new(sink: W) -> Result<Self> {
        Self::with_block_size(sink, DEFAULT_BLOCK_SIZE)
    }

    pub fn with_block_size(sink: W, block_size: usize) -> Result<Self> {
        let mut out = BlockOutput::new(sink, block_size);
        out.write_u16(STREAM_MAGIC)?;
        out.write_u16(STREAM_VERSION)?;
        out.set_block_mode(true)?;
        log::trace!("[soos] object writer ready (block_size={})", out.block_size());
        Ok(Self {
            out,
            handles: HandleTable::default(),
            incomplete: HashSet::new(),
            depth: 0,
        })
    }

    /// Handles assigned since construction or the last reset.
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn is_closed(&self) -> bool {
        self.out.is_closed()
    }

    /// The sink, unless the writer has been closed.
    pub fn get_ref(&self) -> Option<&W> {
        self.out.get_ref()
    }

    /// Flush staged data and return the sink.
    pub fn into_inner(self) -> Result<W> {
        self.out.into_inner()
    }

    fn write_object0(&mut self, obj: Option<&ObjectRef>) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(StreamError::invalid(format!(
                "object nesting exceeds {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        let result = self.write_content(obj);
        self.depth -= 1;
        result
    }

    fn write_content(&mut self, obj: Option<&ObjectRef>) -> Result<()> {
        let Some(obj) = obj else {
            return self.out.write_u8(TC_NULL);
        };
        if let Some(handle) = self.handles.lookup_object(obj) {
            if self.incomplete.contains(&obj.addr()) {
                return Err(StreamError::invalid(format!(
                    "{} instance refers to itself through its own fields",
                    obj.type_name()
                )));
            }
            self.out.write_u8(TC_REFERENCE)?;
            return self.out.write_u32(handle);
        }
        match &**obj {
            Object::String(s) => self.write_string(obj, s),
            Object::Record(record) => self.write_record(obj, record),
            Object::Array(items) => {
                let items = items
                    .try_borrow()
                    .map_err(|_| StreamError::invalid("array is mutably borrowed"))?;
                self.write_array(obj, &items)
            }
            scalar => match scalar.scalar_value() {
                Some(value) => self.write_scalar(obj, value),
                None => Err(StreamError::invalid("unsupported object kind")),
            },
        }
    }

    fn write_string(&mut self, obj: &ObjectRef, s: &str) -> Result<()> {
        self.handles.assign_object(obj);
        if s.len() <= MAX_SHORT_STRING {
            self.out.write_u8(TC_STRING)?;
            self.out.write_u16(s.len() as u16)?;
        } else {
            self.out.write_u8(TC_LONGSTRING)?;
            self.out.write_u64(s.len() as u64)?;
        }
        self.out.write_bytes(s.as_bytes())
    }

    fn write_scalar(&mut self, obj: &ObjectRef, value: FieldValue) -> Result<()> {
        let desc = ClassDesc::scalar(value.kind())
            .ok_or_else(|| StreamError::invalid("boxed value has no scalar descriptor"))?;
        self.out.write_u8(TC_OBJECT)?;
        self.write_class_desc(desc)?;
        self.handles.assign_object(obj);
        self.write_field_value(&value)
    }

    fn write_record(&mut self, obj: &ObjectRef, record: &Record) -> Result<()> {
        self.out.write_u8(TC_OBJECT)?;
        self.write_class_desc(record.desc())?;
        self.handles.assign_object(obj);
        self.incomplete.insert(obj.addr());
        let result = record
            .values()
            .iter()
            .try_for_each(|value| self.write_field_value(value));
        self.incomplete.remove(&obj.addr());
        result
    }

    fn write_array(&mut self, obj: &ObjectRef, items: &[Option<ObjectRef>]) -> Result<()> {
        let len = i32::try_from(items.len())
            .map_err(|_| StreamError::invalid("array length exceeds i32::MAX"))?;
        self.out.write_u8(TC_ARRAY)?;
        self.write_class_desc(ClassDesc::object_array())?;
        self.handles.assign_object(obj);
        self.out.write_i32(len)?;
        for item in items {
            self.write_object0(item.as_ref())?;
        }
        Ok(())
    }

    fn write_class_desc(&mut self, desc: &ClassDesc) -> Result<()> {
        if let Some(handle) = self.handles.lookup_class(desc) {
            self.out.write_u8(TC_REFERENCE)?;
            return self.out.write_u32(handle);
        }
        let count = u16::try_from(desc.fields().len())
            .map_err(|_| StreamError::invalid("too many fields in class descriptor"))?;
        self.out.write_u8(TC_CLASSDESC)?;
        self.out.write_utf(desc.name())?;
        self.out.write_u16(count)?;
        for field in desc.fields() {
            self.out.write_u8(field.kind.type_code())?;
            self.out.write_utf(&field.name)?;
        }
        self.handles.assign_class(desc);
        Ok(())
    }

    fn write_field_value(&mut self, value: &FieldValue) -> Result<()> {
        match value {
            FieldValue::Boolean(v) => self.out.write_bool(*v),
            FieldValue::Byte(v) => self.out.write_i8(*v),
            FieldValue::Short(v) => self.out.write_i16(*v),
            FieldValue::Char(v) => self.out.write_char(*v),
            FieldValue::Int(v) => self.out.write_i32(*v),
            FieldValue::Long(v) => self.out.write_i64(*v),
            FieldValue::Float(v) => self.out.write_f32(*v),
            FieldValue::Double(v) => self.out.write_f64(*v),
            FieldValue::Object(obj) => self.write_object0(obj.as_ref()),
        }
    }
}

impl<W: Write> ObjectOutput for ObjectWriter<W> {
    forward_primitives!(out);

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_bytes(bytes)
    }

    fn write_object(&mut self, obj: Option<&ObjectRef>) -> Result<()> {
        self.out.set_block_mode(false)?;
        let result = self.write_object0(obj);
        let restored = self.out.set_block_mode(true);
        result.and(restored.map(|_| ()))
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }

    fn reset(&mut self) -> Result<()> {
        self.out.set_block_mode(false)?;
        self.out.write_u8(TC_RESET)?;
        self.handles.clear();
        self.incomplete.clear();
        self.out.set_block_mode(true)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.handles.clear();
        self.incomplete.clear();
        self.out.close()
    }
}
