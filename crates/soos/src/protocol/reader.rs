// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object stream decoder.
//!
//! The reader mirrors the writer's handle numbering: every class descriptor
//! and object is assigned the next handle in the order it appears, and
//! `TC_RESET` clears the table. A back-reference therefore resolves to the
//! very same `ObjectRef` that was decoded the first time.

use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

use super::constants::*;
use crate::error::{Result, StreamError};
use crate::object::{names, ClassDesc, FieldDesc, FieldKind, FieldValue, Object, ObjectRef, Record};

/// Generate big-endian read methods over block data
macro_rules! impl_read_be {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            let mut bytes = [0u8; $size];
            self.read_block(&mut bytes)?;
            Ok(<$type>::from_be_bytes(bytes))
        }
    };
}

/// Counters describing what the reader has decoded so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReaderStats {
    /// Objects decoded from a full payload
    pub objects: usize,
    /// Objects resolved through a back-reference
    pub object_refs: usize,
    /// Class descriptors decoded from a full payload
    pub class_descs: usize,
    /// Class descriptors resolved through a back-reference
    pub class_refs: usize,
    /// `TC_RESET` markers consumed
    pub resets: usize,
}

/// One top-level element of a stream, as seen by `next_item`.
#[derive(Debug)]
pub enum StreamItem {
    Object(Option<ObjectRef>),
    BlockData(Vec<u8>),
    Reset,
}

enum Handle {
    Class(Arc<ClassDesc>),
    Object(ObjectRef),
}

/// Decoder: reads the versioned object stream format.
pub struct ObjectReader<R: Read> {
    input: BufReader<R>,
    block_remaining: usize,
    handles: Vec<Option<Handle>>,
    depth: usize,
    stats: ReaderStats,
}

impl<R: Read> ObjectReader<R> {
    /// Create a new reader, validating the stream header.
    pub fn new(source: R) -> Result<Self> {
        let mut reader = Self {
            input: BufReader::new(source),
            block_remaining: 0,
            handles: Vec::new(),
            depth: 0,
            stats: ReaderStats::default(),
        };
        let magic = u16::from_be_bytes(reader.raw()?);
        let version = u16::from_be_bytes(reader.raw()?);
        if magic != STREAM_MAGIC || version != STREAM_VERSION {
            return Err(StreamError::InvalidHeader { magic, version });
        }
        Ok(reader)
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// Handles currently resolvable.
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// True once every byte of the stream has been consumed.
    pub fn at_end(&mut self) -> Result<bool> {
        Ok(self.block_remaining == 0 && self.peek()?.is_none())
    }

    impl_read_be!(read_u8, u8, 1);
    impl_read_be!(read_i8, i8, 1);
    impl_read_be!(read_i16, i16, 2);
    impl_read_be!(read_char, u16, 2);
    impl_read_be!(read_i32, i32, 4);
    impl_read_be!(read_i64, i64, 8);
    impl_read_be!(read_f32, f32, 4);
    impl_read_be!(read_f64, f64, 8);

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Fill `buf` from block data (counterpart of `write_raw`/`write_str_bytes`).
    pub fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        self.read_block(buf)
    }

    /// Read `len` UTF-16 units written by `write_chars`.
    pub fn read_chars(&mut self, len: usize) -> Result<String> {
        let mut units = Vec::with_capacity(len.min(MAX_SHORT_STRING));
        for _ in 0..len {
            units.push(self.read_char()?);
        }
        String::from_utf16(&units).map_err(|_| StreamError::invalid("unpaired UTF-16 surrogate"))
    }

    pub fn read_utf(&mut self) -> Result<String> {
        let len = u16::from_be_bytes({
            let mut bytes = [0u8; 2];
            self.read_block(&mut bytes)?;
            bytes
        }) as usize;
        let mut bytes = vec![0u8; len];
        self.read_block(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| StreamError::invalid("UTF record is not valid UTF-8"))
    }

    /// Decode the next object.
    ///
    /// Fails with `PendingBlockData` if primitive data has to be read first.
    pub fn read_object(&mut self) -> Result<Option<ObjectRef>> {
        if self.block_remaining > 0 {
            return Err(StreamError::PendingBlockData {
                remaining: self.block_remaining,
            });
        }
        loop {
            match self.peek()? {
                Some(TC_RESET) => {
                    self.consume(1);
                    self.clear_handles();
                }
                Some(tag @ (TC_BLOCKDATA | TC_BLOCKDATALONG)) => {
                    return Err(StreamError::UnexpectedTag {
                        tag,
                        expected: "object",
                    })
                }
                Some(_) => return self.read_nested(),
                None => return Err(eof()),
            }
        }
    }

    /// Walk the stream without knowing its layout.
    ///
    /// Block data is returned in chunks of at most `BLOCK_ITEM_CHUNK` bytes,
    /// so a long block may span several items. Returns `None` at end of
    /// stream.
    pub fn next_item(&mut self) -> Result<Option<StreamItem>> {
        if self.block_remaining > 0 {
            return self.next_block_chunk().map(Some);
        }
        match self.peek()? {
            None => Ok(None),
            Some(TC_RESET) => {
                self.consume(1);
                self.clear_handles();
                Ok(Some(StreamItem::Reset))
            }
            Some(TC_BLOCKDATA | TC_BLOCKDATALONG) => {
                self.read_block_header()?;
                self.next_block_chunk().map(Some)
            }
            Some(_) => Ok(Some(StreamItem::Object(self.read_object()?))),
        }
    }

    fn next_block_chunk(&mut self) -> Result<StreamItem> {
        let mut bytes = vec![0u8; self.block_remaining.min(BLOCK_ITEM_CHUNK)];
        self.read_block(&mut bytes)?;
        Ok(StreamItem::BlockData(bytes))
    }

    fn read_nested(&mut self) -> Result<Option<ObjectRef>> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(StreamError::invalid(format!(
                "object nesting exceeds {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        let result = self.read_content();
        self.depth -= 1;
        result
    }

    fn read_content(&mut self) -> Result<Option<ObjectRef>> {
        let tag: u8 = self.raw::<1>()?[0];
        match tag {
            TC_NULL => Ok(None),
            TC_REFERENCE => {
                let handle = u32::from_be_bytes(self.raw()?);
                match self.lookup(handle)? {
                    Handle::Object(obj) => {
                        let obj = obj.clone();
                        self.stats.object_refs += 1;
                        Ok(Some(obj))
                    }
                    Handle::Class(_) => Err(StreamError::InvalidHandle(handle)),
                }
            }
            TC_STRING => {
                let len = u16::from_be_bytes(self.raw()?) as u64;
                self.read_string_body(len).map(Some)
            }
            TC_LONGSTRING => {
                let len = u64::from_be_bytes(self.raw()?);
                self.read_string_body(len).map(Some)
            }
            TC_OBJECT => self.read_plain_object().map(Some),
            TC_ARRAY => self.read_array().map(Some),
            other => Err(StreamError::UnexpectedTag {
                tag: other,
                expected: "object",
            }),
        }
    }

    fn read_string_body(&mut self, len: u64) -> Result<ObjectRef> {
        let mut bytes = Vec::new();
        (&mut self.input).take(len).read_to_end(&mut bytes)?;
        if bytes.len() as u64 != len {
            return Err(eof());
        }
        let s = String::from_utf8(bytes).map_err(|_| StreamError::invalid("string is not valid UTF-8"))?;
        let obj = ObjectRef::string(s);
        self.handles.push(Some(Handle::Object(obj.clone())));
        self.stats.objects += 1;
        Ok(obj)
    }

    fn read_plain_object(&mut self) -> Result<ObjectRef> {
        let desc = self.read_class_desc()?;
        // Reserve the handle before reading fields so numbering matches the writer.
        let slot = self.handles.len();
        self.handles.push(None);

        let obj = match desc.scalar_kind() {
            Some(kind) => {
                let value = self.read_field_value(kind)?;
                Object::from_scalar(value)
                    .map(ObjectRef::new)
                    .ok_or_else(|| StreamError::invalid("scalar descriptor with object field"))?
            }
            None => {
                let mut values = Vec::with_capacity(desc.fields().len());
                for field in desc.fields() {
                    values.push(self.read_field_value(field.kind)?);
                }
                ObjectRef::record(Record::new(desc, values)?)
            }
        };
        self.handles[slot] = Some(Handle::Object(obj.clone()));
        self.stats.objects += 1;
        Ok(obj)
    }

    fn read_array(&mut self) -> Result<ObjectRef> {
        let desc = self.read_class_desc()?;
        if desc.name() != names::OBJECT_ARRAY {
            return Err(StreamError::invalid(format!(
                "unsupported array class {}",
                desc.name()
            )));
        }
        // Registered before the elements, so elements may refer back to it.
        let array = ObjectRef::array(Vec::new());
        self.handles.push(Some(Handle::Object(array.clone())));
        self.stats.objects += 1;

        let len = i32::from_be_bytes(self.raw()?);
        if len < 0 {
            return Err(StreamError::invalid(format!("negative array length {}", len)));
        }
        for _ in 0..len {
            let item = self.read_nested()?;
            if let Some(items) = array.as_array() {
                items.borrow_mut().push(item);
            }
        }
        Ok(array)
    }

    fn read_class_desc(&mut self) -> Result<Arc<ClassDesc>> {
        let tag: u8 = self.raw::<1>()?[0];
        match tag {
            TC_CLASSDESC => {
                let name = self.read_raw_utf()?;
                let count = u16::from_be_bytes(self.raw()?);
                let mut fields = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let code = self.raw::<1>()?[0];
                    let kind = FieldKind::from_type_code(code).ok_or_else(|| {
                        StreamError::invalid(format!("unknown field type code {:#04X}", code))
                    })?;
                    let field_name = self.read_raw_utf()?;
                    fields.push(FieldDesc::new(&field_name, kind));
                }
                let desc = Arc::new(ClassDesc::new(&name, fields));
                self.handles.push(Some(Handle::Class(desc.clone())));
                self.stats.class_descs += 1;
                Ok(desc)
            }
            TC_REFERENCE => {
                let handle = u32::from_be_bytes(self.raw()?);
                match self.lookup(handle)? {
                    Handle::Class(desc) => {
                        let desc = desc.clone();
                        self.stats.class_refs += 1;
                        Ok(desc)
                    }
                    Handle::Object(_) => Err(StreamError::InvalidHandle(handle)),
                }
            }
            other => Err(StreamError::UnexpectedTag {
                tag: other,
                expected: "class descriptor",
            }),
        }
    }

    fn read_field_value(&mut self, kind: FieldKind) -> Result<FieldValue> {
        Ok(match kind {
            FieldKind::Boolean => FieldValue::Boolean(self.raw::<1>()?[0] != 0),
            FieldKind::Byte => FieldValue::Byte(i8::from_be_bytes(self.raw()?)),
            FieldKind::Short => FieldValue::Short(i16::from_be_bytes(self.raw()?)),
            FieldKind::Char => FieldValue::Char(u16::from_be_bytes(self.raw()?)),
            FieldKind::Int => FieldValue::Int(i32::from_be_bytes(self.raw()?)),
            FieldKind::Long => FieldValue::Long(i64::from_be_bytes(self.raw()?)),
            FieldKind::Float => FieldValue::Float(f32::from_be_bytes(self.raw()?)),
            FieldKind::Double => FieldValue::Double(f64::from_be_bytes(self.raw()?)),
            FieldKind::Object => FieldValue::Object(self.read_nested()?),
        })
    }

    fn lookup(&self, handle: u32) -> Result<&Handle> {
        handle
            .checked_sub(BASE_WIRE_HANDLE)
            .and_then(|index| self.handles.get(index as usize))
            .and_then(Option::as_ref)
            .ok_or(StreamError::InvalidHandle(handle))
    }

    fn clear_handles(&mut self) {
        self.handles.clear();
        self.stats.resets += 1;
    }

    /// Read block data, crossing block boundaries (and resets between blocks).
    fn read_block(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            if self.block_remaining == 0 {
                self.refill()?;
            }
            let take = (buf.len() - filled).min(self.block_remaining);
            self.input.read_exact(&mut buf[filled..filled + take])?;
            filled += take;
            self.block_remaining -= take;
        }
        Ok(())
    }

    fn refill(&mut self) -> Result<()> {
        while self.block_remaining == 0 {
            match self.peek()? {
                Some(TC_BLOCKDATA | TC_BLOCKDATALONG) => self.read_block_header()?,
                Some(TC_RESET) => {
                    self.consume(1);
                    self.clear_handles();
                }
                Some(tag) => {
                    return Err(StreamError::UnexpectedTag {
                        tag,
                        expected: "block data",
                    })
                }
                None => return Err(eof()),
            }
        }
        Ok(())
    }

    fn read_block_header(&mut self) -> Result<()> {
        let tag: u8 = self.raw::<1>()?[0];
        self.block_remaining = match tag {
            TC_BLOCKDATA => self.raw::<1>()?[0] as usize,
            TC_BLOCKDATALONG => {
                let len = i32::from_be_bytes(self.raw()?);
                usize::try_from(len)
                    .map_err(|_| StreamError::invalid(format!("negative block length {}", len)))?
            }
            other => {
                return Err(StreamError::UnexpectedTag {
                    tag: other,
                    expected: "block data",
                })
            }
        };
        Ok(())
    }

    fn read_raw_utf(&mut self) -> Result<String> {
        let len = u16::from_be_bytes(self.raw()?) as usize;
        let mut bytes = vec![0u8; len];
        self.input.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| StreamError::invalid("name is not valid UTF-8"))
    }

    /// Read `N` structure bytes (outside block data).
    fn raw<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.input.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    fn consume(&mut self, amount: usize) {
        self.input.consume(amount);
    }
}

fn eof() -> StreamError {
    StreamError::Io(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "unexpected end of stream",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ObjectOutput;
    use crate::protocol::ObjectWriter;

    fn encode(write: impl FnOnce(&mut ObjectWriter<Vec<u8>>)) -> Vec<u8> {
        let mut writer = ObjectWriter::new(Vec::new()).expect("header");
        write(&mut writer);
        writer.into_inner().expect("sink")
    }

    #[test]
    fn test_rejects_bad_header() {
        match ObjectReader::new(&[0xCA, 0xFE, 0x00, 0x05][..]) {
            Err(StreamError::InvalidHeader { magic, version }) => {
                assert_eq!(magic, 0xCAFE);
                assert_eq!(version, 5);
            }
            other => panic!("unexpected result {:?}", other.err()),
        }
    }

    #[test]
    fn test_back_reference_resolves_to_same_instance() {
        let hello = ObjectRef::string("hello");
        let bytes = encode(|w| {
            w.write_object(Some(&hello)).expect("write");
            w.write_object(Some(&hello)).expect("write again");
        });
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        let first = reader.read_object().expect("first").expect("non-null");
        let second = reader.read_object().expect("second").expect("non-null");
        assert!(ObjectRef::ptr_eq(&first, &second));
        assert_eq!(first.as_str(), Some("hello"));
        assert_eq!(reader.stats().object_refs, 1);
        assert!(reader.at_end().expect("peek"));
    }

    #[test]
    fn test_primitives_and_objects_interleave() {
        let bytes = encode(|w| {
            w.write_i32(-7).expect("int");
            w.write_utf("tag").expect("utf");
            w.write_object(Some(&ObjectRef::from(2.5f64))).expect("double");
            w.write_bool(true).expect("bool");
            w.write_chars("ok").expect("chars");
            w.write_object(None).expect("null");
        });
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert_eq!(reader.read_i32().expect("int"), -7);
        assert_eq!(reader.read_utf().expect("utf"), "tag");
        let double = reader.read_object().expect("double").expect("non-null");
        assert!(matches!(*double, Object::Double(v) if v == 2.5));
        assert!(reader.read_bool().expect("bool"));
        assert_eq!(reader.read_chars(2).expect("chars"), "ok");
        assert!(reader.read_object().expect("null").is_none());
    }

    #[test]
    fn test_read_object_with_pending_block_fails() {
        let bytes = encode(|w| {
            w.write_i64(1).expect("long");
            w.write_object(None).expect("null");
        });
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert!(matches!(
            reader.read_object(),
            Err(StreamError::UnexpectedTag { tag: TC_BLOCKDATA, .. })
        ));
        reader.read_i32().expect("half of the long");
        assert!(matches!(
            reader.read_object(),
            Err(StreamError::PendingBlockData { remaining: 4 })
        ));
    }

    #[test]
    fn test_reset_forgets_handles() {
        let hello = ObjectRef::string("hello");
        let bytes = encode(|w| {
            w.write_object(Some(&hello)).expect("write");
            w.reset().expect("reset");
            w.write_object(Some(&hello)).expect("write after reset");
        });
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        let first = reader.read_object().expect("first").expect("non-null");
        let second = reader.read_object().expect("second").expect("non-null");
        assert!(!ObjectRef::ptr_eq(&first, &second));
        assert_eq!(first, second);
        let stats = reader.stats();
        assert_eq!(stats.objects, 2);
        assert_eq!(stats.object_refs, 0);
        assert_eq!(stats.resets, 1);
    }

    #[test]
    fn test_cyclic_array_roundtrip() {
        let array = ObjectRef::array(vec![Some(ObjectRef::from("leaf"))]);
        if let Some(items) = array.as_array() {
            items.borrow_mut().push(Some(array.clone()));
        }
        let bytes = encode(|w| w.write_object(Some(&array)).expect("write"));
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        let decoded = reader.read_object().expect("array").expect("non-null");
        let items = decoded.as_array().expect("array").borrow();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().and_then(|o| o.as_str()), Some("leaf"));
        assert!(ObjectRef::ptr_eq(items[1].as_ref().expect("self"), &decoded));
    }

    #[test]
    fn test_records_roundtrip_with_shared_descriptor() {
        let desc = Arc::new(ClassDesc::new(
            "demo.Point",
            vec![
                FieldDesc::new("x", FieldKind::Int),
                FieldDesc::new("label", FieldKind::Object),
            ],
        ));
        let point = |x| {
            ObjectRef::record(
                Record::new(
                    desc.clone(),
                    vec![
                        FieldValue::Int(x),
                        FieldValue::Object(Some(ObjectRef::from("p"))),
                    ],
                )
                .expect("valid record"),
            )
        };
        let bytes = encode(|w| {
            w.write_object(Some(&point(1))).expect("first");
            w.write_object(Some(&point(2))).expect("second");
        });
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        let first = reader.read_object().expect("first").expect("non-null");
        let second = reader.read_object().expect("second").expect("non-null");
        assert_eq!(first, point(1));
        assert_eq!(second, point(2));
        let stats = reader.stats();
        assert_eq!(stats.class_descs, 1);
        assert_eq!(stats.class_refs, 1);
    }

    #[test]
    fn test_next_item_walks_stream() {
        let bytes = encode(|w| {
            w.write_i16(3).expect("short");
            w.write_object(Some(&ObjectRef::from(true))).expect("bool");
            w.reset().expect("reset");
        });
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert!(matches!(
            reader.next_item().expect("block"),
            Some(StreamItem::BlockData(ref b)) if b == &[0, 3]
        ));
        assert!(matches!(
            reader.next_item().expect("object"),
            Some(StreamItem::Object(Some(_)))
        ));
        assert!(matches!(
            reader.next_item().expect("reset"),
            Some(StreamItem::Reset)
        ));
        assert!(reader.next_item().expect("end").is_none());
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let mut bytes = STREAM_MAGIC.to_be_bytes().to_vec();
        bytes.extend_from_slice(&STREAM_VERSION.to_be_bytes());
        bytes.push(TC_REFERENCE);
        bytes.extend_from_slice(&(BASE_WIRE_HANDLE + 3).to_be_bytes());
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert!(matches!(
            reader.read_object(),
            Err(StreamError::InvalidHandle(h)) if h == BASE_WIRE_HANDLE + 3
        ));
    }

    fn header_bytes() -> Vec<u8> {
        let mut bytes = STREAM_MAGIC.to_be_bytes().to_vec();
        bytes.extend_from_slice(&STREAM_VERSION.to_be_bytes());
        bytes
    }

    #[test]
    fn test_excessive_nesting_is_rejected() {
        // Each array holds the next one; the descriptor is sent once.
        let mut bytes = header_bytes();
        bytes.extend_from_slice(&[TC_ARRAY, TC_CLASSDESC]);
        bytes.extend_from_slice(&(names::OBJECT_ARRAY.len() as u16).to_be_bytes());
        bytes.extend_from_slice(names::OBJECT_ARRAY.as_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 0, 0, 1]);
        for _ in 0..MAX_NESTING_DEPTH * 4 {
            bytes.extend_from_slice(&[TC_ARRAY, TC_REFERENCE]);
            bytes.extend_from_slice(&BASE_WIRE_HANDLE.to_be_bytes());
            bytes.extend_from_slice(&1i32.to_be_bytes());
        }
        bytes.push(TC_NULL);

        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert!(matches!(
            reader.read_object(),
            Err(StreamError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_nesting_within_limit_roundtrips() {
        let mut nested = ObjectRef::array(vec![Some(ObjectRef::from("core"))]);
        for _ in 0..100 {
            nested = ObjectRef::array(vec![Some(nested)]);
        }
        let bytes = encode(|w| w.write_object(Some(&nested)).expect("write"));
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        let mut current = reader.read_object().expect("nested").expect("non-null");
        for _ in 0..100 {
            let next = current.as_array().expect("array").borrow()[0]
                .clone()
                .expect("inner array");
            current = next;
        }
        let core = current.as_array().expect("array").borrow()[0].clone();
        assert_eq!(core.as_ref().and_then(|o| o.as_str()), Some("core"));
    }

    #[test]
    fn test_next_item_splits_long_blocks() {
        let mut writer = ObjectWriter::with_block_size(Vec::new(), 100_000).expect("header");
        writer.write_raw(&vec![0x5A; 70_000]).expect("raw");
        let bytes = writer.into_inner().expect("sink");
        assert_eq!(bytes[4], TC_BLOCKDATALONG);

        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        let mut sizes = Vec::new();
        while let Some(item) = reader.next_item().expect("item") {
            match item {
                StreamItem::BlockData(chunk) => sizes.push(chunk.len()),
                other => panic!("unexpected item {:?}", other),
            }
        }
        assert_eq!(sizes, [BLOCK_ITEM_CHUNK, 70_000 - BLOCK_ITEM_CHUNK]);
    }

    #[test]
    fn test_oversized_block_header_on_short_input_is_eof() {
        let mut bytes = header_bytes();
        bytes.push(TC_BLOCKDATALONG);
        bytes.extend_from_slice(&i32::MAX.to_be_bytes());
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert!(matches!(reader.next_item(), Err(StreamError::Io(_))));
    }

    #[test]
    fn test_builtin_name_with_foreign_layout_is_rejected() {
        let mut bytes = header_bytes();
        bytes.extend_from_slice(&[TC_OBJECT, TC_CLASSDESC]);
        bytes.extend_from_slice(&(names::INTEGER.len() as u16).to_be_bytes());
        bytes.extend_from_slice(names::INTEGER.as_bytes());
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.push(FieldKind::Long.type_code());
        bytes.extend_from_slice(&5u16.to_be_bytes());
        bytes.extend_from_slice(b"value");
        bytes.extend_from_slice(&5i64.to_be_bytes());
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert!(matches!(
            reader.read_object(),
            Err(StreamError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_truncated_string_is_eof() {
        let mut bytes = STREAM_MAGIC.to_be_bytes().to_vec();
        bytes.extend_from_slice(&STREAM_VERSION.to_be_bytes());
        bytes.extend_from_slice(&[TC_STRING, 0, 10, b'a']);
        let mut reader = ObjectReader::new(bytes.as_slice()).expect("header");
        assert!(matches!(reader.read_object(), Err(StreamError::Io(_))));
    }
}
