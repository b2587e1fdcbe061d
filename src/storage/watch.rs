//! Change detection for slots written by other app instances.

use super::{SlotStamp, SlotStorage};

/// Remembers the last seen stamp of one slot.
#[derive(Debug, Clone)]
pub struct SlotWatcher {
    key: String,
    last: Option<SlotStamp>,
}

impl SlotWatcher {
    /// Watch `key`, treating its current state as already seen.
    pub fn new(key: impl Into<String>, storage: &impl SlotStorage) -> Self {
        let key = key.into();
        let last = storage.stamp(&key);
        Self { key, last }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns `true` once per observed change, including creation and removal.
    pub fn poll(&mut self, storage: &impl SlotStorage) -> bool {
        let current = storage.stamp(&self.key);
        if current == self.last {
            return false;
        }
        tracing::debug!("Slot '{}' changed", self.key);
        self.last = current;
        true
    }
}
