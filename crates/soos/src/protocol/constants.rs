// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object stream wire constants.
//!
//! All multi-byte values on the wire are big-endian.

/// Stream magic, first two bytes of every stream
pub const STREAM_MAGIC: u16 = 0xACED;
/// Wire format version
pub const STREAM_VERSION: u16 = 0x0005;

pub const TC_NULL: u8 = 0x70;
pub const TC_REFERENCE: u8 = 0x71;
pub const TC_CLASSDESC: u8 = 0x72;
pub const TC_OBJECT: u8 = 0x73;
pub const TC_STRING: u8 = 0x74;
pub const TC_ARRAY: u8 = 0x75;
pub const TC_BLOCKDATA: u8 = 0x77;
pub const TC_RESET: u8 = 0x79;
pub const TC_BLOCKDATALONG: u8 = 0x7A;
pub const TC_LONGSTRING: u8 = 0x7C;

/// First handle assigned after construction or reset
pub const BASE_WIRE_HANDLE: u32 = 0x7E_0000;

/// Default primitive block size (bytes staged before a block is emitted)
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Largest block size; a `TC_BLOCKDATALONG` length is an `i32`
pub const MAX_BLOCK_SIZE: usize = i32::MAX as usize;

/// Largest payload of a short `TC_BLOCKDATA` block
pub const MAX_SHORT_BLOCK: usize = 0xFF;

/// Largest string encoded with `TC_STRING` (16-bit length)
pub const MAX_SHORT_STRING: usize = 0xFFFF;

/// Deepest object nesting written or accepted (top-level object is depth 1)
pub const MAX_NESTING_DEPTH: usize = 256;

/// Largest block-data chunk returned by one `ObjectReader::next_item` call
pub const BLOCK_ITEM_CHUNK: usize = 64 * 1024;

/// Human-readable tag name (inspection and error messages).
pub fn tag_name(tag: u8) -> &'static str {
    match tag {
        TC_NULL => "TC_NULL",
        TC_REFERENCE => "TC_REFERENCE",
        TC_CLASSDESC => "TC_CLASSDESC",
        TC_OBJECT => "TC_OBJECT",
        TC_STRING => "TC_STRING",
        TC_ARRAY => "TC_ARRAY",
        TC_BLOCKDATA => "TC_BLOCKDATA",
        TC_RESET => "TC_RESET",
        TC_BLOCKDATALONG => "TC_BLOCKDATALONG",
        TC_LONGSTRING => "TC_LONGSTRING",
        _ => "unknown",
    }
}
