// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Interning object output stream.
//!
//! Wraps an [`ObjectWriter`] and, for objects of substitutable types, swaps
//! each value for the first equal instance already written on this stream.
//! The writer then sees the *same* instance twice and emits a back-reference
//! instead of a second payload. Readers need no changes: they already
//! resolve back-references.
//!
//! The intern cache mirrors the writer's handle table. Both are cleared by
//! `reset` and `close`, and at no other time; a canonical instance is only
//! useful while the writer still holds a handle for it.

use std::collections::HashSet;
use std::io::Write;

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::object::ObjectRef;
use crate::output::{forward_primitives, ObjectOutput};
use crate::protocol::ObjectWriter;
use crate::registry::SubstitutableTypes;

/// Per-stream map from a value to its canonical (first written) instance.
///
/// A set keyed by value equality: the stored element *is* the canonical
/// instance.
#[derive(Debug, Default)]
pub struct InternCache {
    canonical: HashSet<ObjectRef>,
    hits: u64,
}

impl InternCache {
    /// Return the canonical instance for `obj`, making `obj` canonical on a miss.
    pub fn intern(&mut self, obj: &ObjectRef) -> ObjectRef {
        if let Some(canonical) = self.canonical.get(obj) {
            self.hits += 1;
            return canonical.clone();
        }
        self.canonical.insert(obj.clone());
        obj.clone()
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Lookups answered with an earlier instance.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.canonical.clear();
    }
}

/// Object output stream that interns substitutable values.
///
/// # Example
///
/// ```
/// use soos::{ObjectOutput, ObjectReader, ObjectRef, SubstitutingWriter};
///
/// let mut buf = Vec::new();
/// let mut out = SubstitutingWriter::new(&mut buf)?;
/// for _ in 0..3 {
///     out.write_object(Some(&ObjectRef::string("hello")))?;
/// }
/// out.close()?;
/// drop(out);
///
/// let mut input = ObjectReader::new(buf.as_slice())?;
/// let first = input.read_object()?.expect("non-null");
/// let second = input.read_object()?.expect("non-null");
/// assert!(ObjectRef::ptr_eq(&first, &second));
/// # Ok::<(), soos::StreamError>(())
/// ```
pub struct SubstitutingWriter<W: Write> {
    inner: ObjectWriter<W>,
    substitutable: SubstitutableTypes,
    cache: InternCache,
}

impl<W: Write> SubstitutingWriter<W> {
    /// Create a writer over `sink` using the process-wide registry.
    ///
    /// Writes the stream header; fails if that write fails.
    pub fn new(sink: W) -> Result<Self> {
        Self::with_config(sink, StreamConfig::default())
    }

    pub fn with_config(sink: W, config: StreamConfig) -> Result<Self> {
        let inner = ObjectWriter::with_block_size(sink, config.block_size)?;
        log::debug!(
            "[soos] substituting writer ready ({} substitutable types)",
            config.substitutable.len()
        );
        Ok(Self {
            inner,
            substitutable: config.substitutable,
            cache: InternCache::default(),
        })
    }

    /// Distinct values currently interned.
    pub fn interned_len(&self) -> usize {
        self.cache.len()
    }

    /// Writes replaced by an earlier equal instance since construction.
    pub fn substitutions(&self) -> u64 {
        self.cache.hits()
    }

    pub fn substitutable(&self) -> &SubstitutableTypes {
        &self.substitutable
    }

    /// The underlying object writer.
    pub fn get_ref(&self) -> &ObjectWriter<W> {
        &self.inner
    }

    /// Flush and return the sink.
    pub fn into_inner(self) -> Result<W> {
        self.inner.into_inner()
    }
}

impl<W: Write> ObjectOutput for SubstitutingWriter<W> {
    forward_primitives!(inner);

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_raw(bytes)
    }

    fn write_object(&mut self, obj: Option<&ObjectRef>) -> Result<()> {
        if self.inner.is_closed() {
            return Err(StreamError::Closed);
        }
        match obj {
            Some(obj) if self.substitutable.is_substitutable(obj) => {
                let canonical = self.cache.intern(obj);
                if !ObjectRef::ptr_eq(&canonical, obj) {
                    log::trace!("[soos] substituted {} instance", obj.type_name());
                }
                self.inner.write_object(Some(&canonical))
            }
            other => self.inner.write_object(other),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    fn reset(&mut self) -> Result<()> {
        log::debug!(
            "[soos] reset: dropping {} interned values",
            self.cache.len()
        );
        self.cache.clear();
        self.inner.reset()
    }

    fn close(&mut self) -> Result<()> {
        if !self.inner.is_closed() {
            log::debug!(
                "[soos] close: {} interned values, {} substitutions",
                self.cache.len(),
                self.cache.hits()
            );
        }
        self.cache.clear();
        self.inner.close()
    }
}
