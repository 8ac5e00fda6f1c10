// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Versioned binary object stream: encoder, decoder and wire constants.
//!
//! ```text
//! stream   := magic(u16) version(u16) content*
//! content  := object | blockdata | TC_RESET
//! object   := TC_NULL
//!           | TC_REFERENCE handle(u32)
//!           | TC_STRING len(u16) utf8 | TC_LONGSTRING len(u64) utf8
//!           | TC_OBJECT classdesc field*
//!           | TC_ARRAY classdesc len(i32) object*
//! classdesc:= TC_CLASSDESC name fields | TC_REFERENCE handle(u32)
//! ```

pub mod block;
pub mod constants;
mod handles;
pub mod reader;
pub mod writer;

pub use reader::{ObjectReader, ReaderStats, StreamItem};
pub use writer::ObjectWriter;
