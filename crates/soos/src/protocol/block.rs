// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Block-data output buffering.
//!
//! Primitive values written between objects are staged and emitted as
//! `TC_BLOCKDATA`/`TC_BLOCKDATALONG` chunks. Object structure (tags, class
//! descriptors, field data) bypasses staging and goes straight to the sink.

use std::io::Write;

use super::constants::{
    DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, MAX_SHORT_BLOCK, TC_BLOCKDATA, TC_BLOCKDATALONG,
};
use crate::error::{Result, StreamError};

/// Generate big-endian write methods for primitive types
macro_rules! impl_write_be {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> Result<()> {
            self.write_bytes(&value.to_be_bytes())
        }
    };
}

/// Byte sink with block-data staging.
///
/// Dropping the inner sink (on `close`) turns every later write into
/// `StreamError::Closed`.
pub struct BlockOutput<W: Write> {
    sink: Option<W>,
    pending: Vec<u8>,
    block_size: usize,
    block_mode: bool,
}

impl<W: Write> BlockOutput<W> {
    /// Create a new output in structure (non-block) mode.
    ///
    /// `block_size` is clamped to `1..=MAX_BLOCK_SIZE`.
    pub fn new(sink: W, block_size: usize) -> Self {
        let block_size = block_size.clamp(1, MAX_BLOCK_SIZE);
        Self {
            sink: Some(sink),
            pending: Vec::with_capacity(block_size.min(DEFAULT_BLOCK_SIZE)),
            block_size,
            block_mode: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Bytes staged but not yet emitted as a block.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Switch block-data mode, draining staged bytes when leaving it.
    ///
    /// Returns the previous mode.
    pub fn set_block_mode(&mut self, on: bool) -> Result<bool> {
        if self.block_mode == on {
            return Ok(on);
        }
        if !on {
            self.drain()?;
        }
        self.block_mode = on;
        Ok(!on)
    }

    pub fn write_bytes(&mut self, mut data: &[u8]) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(StreamError::Closed)?;
        if !self.block_mode {
            sink.write_all(data)?;
            return Ok(());
        }
        while !data.is_empty() {
            if self.pending.len() >= self.block_size {
                self.drain()?;
            }
            let take = (self.block_size - self.pending.len()).min(data.len());
            self.pending.extend_from_slice(&data[..take]);
            data = &data[take..];
        }
        Ok(())
    }

    impl_write_be!(write_u8, u8);
    impl_write_be!(write_i8, i8);
    impl_write_be!(write_u16, u16);
    impl_write_be!(write_i16, i16);
    impl_write_be!(write_u32, u32);
    impl_write_be!(write_i32, i32);
    impl_write_be!(write_u64, u64);
    impl_write_be!(write_i64, i64);
    impl_write_be!(write_f32, f32);
    impl_write_be!(write_f64, f64);

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_char(&mut self, value: u16) -> Result<()> {
        self.write_u16(value)
    }

    /// Low byte of each UTF-16 unit.
    pub fn write_str_bytes(&mut self, s: &str) -> Result<()> {
        let bytes: Vec<u8> = s.encode_utf16().map(|unit| unit as u8).collect();
        self.write_bytes(&bytes)
    }

    /// Each UTF-16 unit as a big-endian `u16`.
    pub fn write_chars(&mut self, s: &str) -> Result<()> {
        let bytes: Vec<u8> = s.encode_utf16().flat_map(u16::to_be_bytes).collect();
        self.write_bytes(&bytes)
    }

    /// 16-bit length prefix followed by UTF-8 bytes.
    pub fn write_utf(&mut self, s: &str) -> Result<()> {
        let len = u16::try_from(s.len()).map_err(|_| StreamError::UtfTooLong { len: s.len() })?;
        self.write_u16(len)?;
        self.write_bytes(s.as_bytes())
    }

    /// Emit staged bytes as one block.
    pub fn drain(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let sink = self.sink.as_mut().ok_or(StreamError::Closed)?;
        let len = self.pending.len();
        if len <= MAX_SHORT_BLOCK {
            sink.write_all(&[TC_BLOCKDATA, len as u8])?;
        } else {
            let len = i32::try_from(len)
                .map_err(|_| StreamError::invalid("block exceeds i32::MAX bytes"))?;
            sink.write_all(&[TC_BLOCKDATALONG])?;
            sink.write_all(&len.to_be_bytes())?;
        }
        sink.write_all(&self.pending)?;
        self.pending.clear();
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.drain()?;
        self.sink.as_mut().ok_or(StreamError::Closed)?.flush()?;
        Ok(())
    }

    /// Flush and release the sink. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.sink.is_none() {
            return Ok(());
        }
        let result = self.flush();
        self.sink = None;
        self.pending.clear();
        result
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        self.sink.take().ok_or(StreamError::Closed)
    }
}
