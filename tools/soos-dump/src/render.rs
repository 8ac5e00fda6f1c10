// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! One-line text rendering of decoded objects.

use soos::{FieldValue, Object, ObjectRef};

/// Strings longer than this are cut in the listing.
const MAX_STRING: usize = 48;

/// Array elements shown before `...`.
const MAX_ITEMS: usize = 8;

pub fn describe(obj: Option<&ObjectRef>, depth: usize) -> String {
    let Some(obj) = obj else {
        return "null".to_string();
    };
    match &**obj {
        Object::Boolean(v) => format!("Boolean({})", v),
        Object::Byte(v) => format!("Byte({})", v),
        Object::Short(v) => format!("Short({})", v),
        Object::Char(v) => match char::from_u32(u32::from(*v)) {
            Some(c) => format!("Char({:?})", c),
            None => format!("Char(\\u{{{:04x}}})", v),
        },
        Object::Integer(v) => format!("Integer({})", v),
        Object::Long(v) => format!("Long({})", v),
        Object::Float(v) => format!("Float({})", v),
        Object::Double(v) => format!("Double({})", v),
        Object::String(s) => quote(s),
        Object::Record(record) => {
            let name = record.desc().name();
            if depth == 0 {
                return format!("{} {{..}}", name);
            }
            let fields: Vec<String> = record
                .desc()
                .fields()
                .iter()
                .zip(record.values())
                .map(|(field, value)| format!("{}: {}", field.name, field_value(value, depth - 1)))
                .collect();
            format!("{} {{ {} }}", name, fields.join(", "))
        }
        Object::Array(items) => {
            let Ok(items) = items.try_borrow() else {
                return "Object[?]".to_string();
            };
            if depth == 0 {
                return format!("Object[{}]", items.len());
            }
            let mut shown: Vec<String> = items
                .iter()
                .take(MAX_ITEMS)
                .map(|item| describe(item.as_ref(), depth - 1))
                .collect();
            if items.len() > MAX_ITEMS {
                shown.push("...".to_string());
            }
            format!("Object[{}] [{}]", items.len(), shown.join(", "))
        }
    }
}

fn field_value(value: &FieldValue, depth: usize) -> String {
    match value {
        FieldValue::Boolean(v) => v.to_string(),
        FieldValue::Byte(v) => v.to_string(),
        FieldValue::Short(v) => v.to_string(),
        FieldValue::Char(v) => format!("{:#06x}", v),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Long(v) => v.to_string(),
        FieldValue::Float(v) => v.to_string(),
        FieldValue::Double(v) => v.to_string(),
        FieldValue::Object(obj) => describe(obj.as_ref(), depth),
    }
}

fn quote(s: &str) -> String {
    let mut cut: String = s.chars().take(MAX_STRING).collect();
    if cut.len() < s.len() {
        cut.push_str("...");
    }
    format!("{:?}", cut)
}

/// Hex preview of block data.
pub fn hex(bytes: &[u8], limit: usize) -> String {
    let mut out: Vec<String> = bytes
        .iter()
        .take(limit)
        .map(|b| format!("{:02x}", b))
        .collect();
    if bytes.len() > limit {
        out.push("..".to_string());
    }
    out.join(" ")
}
