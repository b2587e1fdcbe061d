//! In-memory slots for tests and previews.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{SlotStamp, SlotStorage};
use crate::error::Result;

/// Slots held in a map, with a revision counter per key.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: RefCell<HashMap<String, (String, u64)>>,
    revision: Cell<u64>,
    fail_writes: Cell<bool>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail, as a full disk would.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn next_revision(&self) -> u64 {
        let next = self.revision.get() + 1;
        self.revision.set(next);
        next
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).map(|(value, _)| value.clone()))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(std::io::Error::new(std::io::ErrorKind::StorageFull, "storage quota exceeded").into());
        }
        let revision = self.next_revision();
        self.slots
            .borrow_mut()
            .insert(key.to_string(), (value.to_string(), revision));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    fn stamp(&self, key: &str) -> Option<SlotStamp> {
        self.slots
            .borrow()
            .get(key)
            .map(|(_, revision)| SlotStamp::Revision(*revision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bumps_stamp() {
        let slots = MemorySlots::new();
        slots.write("k", "a").unwrap();
        let first = slots.stamp("k");
        slots.write("k", "a").unwrap();
        assert_ne!(first, slots.stamp("k"));
    }

    #[test]
    fn test_failed_write_keeps_old_value() {
        let slots = MemorySlots::new();
        slots.write("k", "old").unwrap();
        slots.fail_writes(true);
        assert!(slots.write("k", "new").is_err());
        assert_eq!(slots.read("k").unwrap().as_deref(), Some("old"));
    }
}
