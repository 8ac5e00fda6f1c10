// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The write surface shared by every object output stream.

use crate::error::Result;
use crate::object::ObjectRef;

/// Primitive writers, the generic object writer and lifecycle operations.
///
/// Primitive values are written as block data; `write_object` serializes an
/// object graph, encoding repeated instances as back-references.
pub trait ObjectOutput {
    fn write_bool(&mut self, value: bool) -> Result<()>;
    fn write_i8(&mut self, value: i8) -> Result<()>;
    fn write_u8(&mut self, value: u8) -> Result<()>;
    fn write_i16(&mut self, value: i16) -> Result<()>;
    /// UTF-16 code unit.
    fn write_char(&mut self, value: u16) -> Result<()>;
    fn write_i32(&mut self, value: i32) -> Result<()>;
    fn write_i64(&mut self, value: i64) -> Result<()>;
    fn write_f32(&mut self, value: f32) -> Result<()>;
    fn write_f64(&mut self, value: f64) -> Result<()>;

    /// Low byte of each UTF-16 unit of `s`; lossy outside Latin-1.
    fn write_str_bytes(&mut self, s: &str) -> Result<()>;
    /// Every UTF-16 unit of `s`, two bytes each.
    fn write_chars(&mut self, s: &str) -> Result<()>;
    /// Length-prefixed UTF-8; fails with `UtfTooLong` past 65535 bytes.
    fn write_utf(&mut self, s: &str) -> Result<()>;
    fn write_raw(&mut self, bytes: &[u8]) -> Result<()>;

    /// Serialize `obj` (or a null marker for `None`).
    fn write_object(&mut self, obj: Option<&ObjectRef>) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
    /// Forget every object written so far; later writes are encoded in full.
    fn reset(&mut self) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

/// Forward every primitive writer of `ObjectOutput` to `self.$field`.
macro_rules! forward_primitives {
    ($field:ident) => {
        fn write_bool(&mut self, value: bool) -> $crate::error::Result<()> {
            self.$field.write_bool(value)
        }

        fn write_i8(&mut self, value: i8) -> $crate::error::Result<()> {
            self.$field.write_i8(value)
        }

        fn write_u8(&mut self, value: u8) -> $crate::error::Result<()> {
            self.$field.write_u8(value)
        }

        fn write_i16(&mut self, value: i16) -> $crate::error::Result<()> {
            self.$field.write_i16(value)
        }

        fn write_char(&mut self, value: u16) -> $crate::error::Result<()> {
            self.$field.write_char(value)
        }

        fn write_i32(&mut self, value: i32) -> $crate::error::Result<()> {
            self.$field.write_i32(value)
        }

        fn write_i64(&mut self, value: i64) -> $crate::error::Result<()> {
            self.$field.write_i64(value)
        }

        fn write_f32(&mut self, value: f32) -> $crate::error::Result<()> {
            self.$field.write_f32(value)
        }

        fn write_f64(&mut self, value: f64) -> $crate::error::Result<()> {
            self.$field.write_f64(value)
        }

        fn write_str_bytes(&mut self, s: &str) -> $crate::error::Result<()> {
            self.$field.write_str_bytes(s)
        }

        fn write_chars(&mut self, s: &str) -> $crate::error::Result<()> {
            self.$field.write_chars(s)
        }

        fn write_utf(&mut self, s: &str) -> $crate::error::Result<()> {
            self.$field.write_utf(s)
        }
    };
}

pub(crate) use forward_primitives;
