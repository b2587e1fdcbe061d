//! Named persisted slots.
//!
//! A slot is a whole-value key/value location: every write replaces the
//! previous content. Stores built on top read, modify and rewrite the full
//! value, so they are only correct with a single writer.

pub mod file;
pub mod memory;
pub mod watch;

use std::time::SystemTime;

use crate::error::Result;

pub use file::FileSlots;
pub use memory::MemorySlots;
pub use watch::SlotWatcher;

/// Opaque change marker for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStamp {
    /// File modification time, length and content digest. The digest catches
    /// same-length rewrites inside the filesystem's mtime granularity.
    Modified(SystemTime, u64, u64),
    /// In-memory revision counter.
    Revision(u64),
}

/// String-keyed persisted storage.
pub trait SlotStorage {
    /// Read the slot content, `None` if the slot was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the slot content.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the slot. Removing an absent slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Current change marker, `None` when the slot does not exist.
    fn stamp(&self, key: &str) -> Option<SlotStamp>;
}

/// Storage with nothing behind it: reads find nothing and writes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSlots;

impl SlotStorage for DetachedSlots {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, key: &str, _value: &str) -> Result<()> {
        tracing::trace!("Detached storage: dropping write to '{}'", key);
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn stamp(&self, _key: &str) -> Option<SlotStamp> {
        None
    }
}

impl<S: SlotStorage + ?Sized> SlotStorage for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn stamp(&self, key: &str) -> Option<SlotStamp> {
        (**self).stamp(key)
    }
}

impl<S: SlotStorage + ?Sized> SlotStorage for std::rc::Rc<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn stamp(&self, key: &str) -> Option<SlotStamp> {
        (**self).stamp(key)
    }
}

/// Slot keys become file names, so only `[A-Za-z0-9_-]` is allowed.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
