// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Substitutable object output stream.
//!
//! An object output stream that shrinks its output by interning values of
//! *substitutable* types: immutable, value-equal types such as strings and
//! boxed scalars. The second and later writes of an equal value are encoded
//! as back-references to the first one. The bytes stay in the standard
//! object stream format, so the ordinary [`ObjectReader`] decodes them.
//!
//! # Architecture
//!
//! ```text
//! caller
//!   |  write_object(value)
//!   v
//! SubstitutingWriter  -- registry: is the runtime type substitutable?
//!   |                 -- intern cache: swap for the canonical instance
//!   v
//! ObjectWriter        -- handle table: repeated instance -> TC_REFERENCE
//!   |
//!   v
//! io::Write sink
//! ```
//!
//! # Example
//!
//! ```
//! use soos::{ObjectOutput, ObjectReader, ObjectRef, SubstitutingWriter};
//!
//! let mut buf = Vec::new();
//! let mut out = SubstitutingWriter::new(&mut buf)?;
//! out.write_i32(2)?;
//! out.write_object(Some(&ObjectRef::string("hello")))?;
//! out.write_object(Some(&ObjectRef::string("hello")))?;
//! out.close()?;
//! drop(out);
//!
//! let mut input = ObjectReader::new(buf.as_slice())?;
//! assert_eq!(input.read_i32()?, 2);
//! let a = input.read_object()?.expect("non-null");
//! let b = input.read_object()?.expect("non-null");
//! assert_eq!(a.as_str(), Some("hello"));
//! assert!(ObjectRef::ptr_eq(&a, &b));
//! # Ok::<(), soos::StreamError>(())
//! ```

pub mod config;
pub mod error;
pub mod object;
pub mod output;
pub mod protocol;
pub mod registry;
pub mod substitute;

pub use config::{ConfigError, StreamConfig};
pub use error::{Result, StreamError};
pub use object::{
    ClassDesc, FieldDesc, FieldKind, FieldValue, Object, ObjectRef, Record, TypeDescriptor,
};
pub use output::ObjectOutput;
pub use protocol::{ObjectReader, ObjectWriter, ReaderStats, StreamItem};
pub use registry::SubstitutableTypes;
pub use substitute::{InternCache, SubstitutingWriter};
