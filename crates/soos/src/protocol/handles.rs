// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Writer-side handle table.
//!
//! Objects are keyed by instance address, class descriptors by value. The
//! table retains every object it has numbered, so an address cannot be
//! reused by a new allocation while its handle is live.

use std::collections::HashMap;

use super::constants::BASE_WIRE_HANDLE;
use crate::object::{ClassDesc, ObjectRef};

#[derive(Default)]
pub(crate) struct HandleTable {
    objects: HashMap<usize, u32>,
    classes: HashMap<ClassDesc, u32>,
    retained: Vec<ObjectRef>,
    next: u32,
}

impl HandleTable {
    pub(crate) fn lookup_object(&self, obj: &ObjectRef) -> Option<u32> {
        self.objects.get(&obj.addr()).copied()
    }

    pub(crate) fn assign_object(&mut self, obj: &ObjectRef) -> u32 {
        let handle = self.allocate();
        self.objects.insert(obj.addr(), handle);
        self.retained.push(obj.clone());
        handle
    }

    pub(crate) fn lookup_class(&self, desc: &ClassDesc) -> Option<u32> {
        self.classes.get(desc).copied()
    }

    pub(crate) fn assign_class(&mut self, desc: &ClassDesc) -> u32 {
        let handle = self.allocate();
        self.classes.insert(desc.clone(), handle);
        handle
    }

    pub(crate) fn len(&self) -> usize {
        self.next as usize
    }

    pub(crate) fn clear(&mut self) {
        self.objects.clear();
        self.classes.clear();
        self.retained.clear();
        self.next = 0;
    }

    fn allocate(&mut self) -> u32 {
        let handle = BASE_WIRE_HANDLE + self.next;
        self.next += 1;
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_follow_identity_not_value() {
        let mut table = HandleTable::default();
        let a = ObjectRef::string("same");
        let b = ObjectRef::string("same");

        let handle = table.assign_object(&a);
        assert_eq!(handle, BASE_WIRE_HANDLE);
        assert_eq!(table.lookup_object(&a.clone()), Some(handle));
        assert_eq!(table.lookup_object(&b), None);
    }

    #[test]
    fn test_classes_and_objects_share_numbering() {
        let mut table = HandleTable::default();
        let desc = ClassDesc::new("demo.Empty", Vec::new());
        assert_eq!(table.assign_class(&desc), BASE_WIRE_HANDLE);
        assert_eq!(
            table.assign_object(&ObjectRef::from(1i32)),
            BASE_WIRE_HANDLE + 1
        );
        assert_eq!(table.lookup_class(&desc), Some(BASE_WIRE_HANDLE));
        assert_eq!(table.len(), 2);

        table.clear();
        assert_eq!(table.len(), 0);
        assert_eq!(table.lookup_class(&desc), None);
        assert_eq!(table.assign_class(&desc), BASE_WIRE_HANDLE);
    }
}
