// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Re-encode an existing stream through the interning writer.

use std::io::{Read, Write};

use soos::{ObjectOutput, ObjectReader, Result, StreamConfig, StreamItem, SubstitutingWriter};

/// Counts gathered while copying one stream into another.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkReport {
    pub objects: usize,
    pub block_bytes: usize,
    pub resets: usize,
    pub substitutions: u64,
}

/// Copy every item of `input` to `output`, interning per `config`.
///
/// Block data is copied as raw bytes, so block boundaries may move; the
/// sequence of primitive bytes and objects is unchanged.
pub fn shrink<R: Read, W: Write>(input: R, output: W, config: StreamConfig) -> Result<ShrinkReport> {
    let mut reader = ObjectReader::new(input)?;
    let mut writer = SubstitutingWriter::with_config(output, config)?;
    let mut report = ShrinkReport::default();

    while let Some(item) = reader.next_item()? {
        match item {
            StreamItem::Object(obj) => {
                writer.write_object(obj.as_ref())?;
                report.objects += 1;
            }
            StreamItem::BlockData(bytes) => {
                writer.write_raw(&bytes)?;
                report.block_bytes += bytes.len();
            }
            StreamItem::Reset => {
                writer.reset()?;
                report.resets += 1;
            }
        }
    }
    report.substitutions = writer.substitutions();
    writer.close()?;
    log::debug!("shrink finished: {:?}", report);
    Ok(report)
}
