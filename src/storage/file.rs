//! File-backed slots: one JSON file per key.

use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{SlotStamp, SlotStorage, is_valid_key};
use crate::error::{AppError, Result};

/// Slots stored as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlots {
    root: PathBuf,
}

impl FileSlots {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(AppError::validation(format!("Invalid slot key '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl SlotStorage for FileSlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temp file and rename, so readers never see a half
    /// written slot and a failed write keeps the old content.
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        let tmp = self.root.join(format!(".{}.json.tmp", key));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!("Wrote slot '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn stamp(&self, key: &str) -> Option<SlotStamp> {
        let path = self.path_for(key).ok()?;
        let meta = fs::metadata(&path).ok()?;
        let content = fs::read(&path).ok()?;
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        Some(SlotStamp::Modified(meta.modified().ok()?, meta.len(), hasher.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slot_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path());
        assert!(slots.read("appointments").unwrap().is_none());
        assert!(slots.stamp("appointments").is_none());
    }

    #[test]
    fn test_write_creates_root_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path().join("data"));

        slots.write("appointments", "[1]").unwrap();
        slots.write("appointments", "[1,2]").unwrap();

        assert_eq!(slots.read("appointments").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.path().join("data").join("appointments.json").exists());
        assert!(!dir.path().join("data").join(".appointments.json.tmp").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path());
        slots.write("session", "{}").unwrap();
        slots.remove("session").unwrap();
        slots.remove("session").unwrap();
        assert!(slots.read("session").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path());
        assert!(matches!(slots.write("../x", "{}"), Err(AppError::Validation(_))));
        assert!(slots.stamp("../x").is_none());
    }

    #[test]
    fn test_stamp_changes_with_length() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path());
        slots.write("session", "{}").unwrap();
        let before = slots.stamp("session");
        slots.write("session", "{\"is_authenticated\":true}").unwrap();
        assert_ne!(before, slots.stamp("session"));
    }

    #[test]
    fn test_stamp_changes_on_same_length_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path());
        slots.write("session", r#"{"user_email":"ann@x.io"}"#).unwrap();
        let before = slots.stamp("session");
        slots.write("session", r#"{"user_email":"bob@x.io"}"#).unwrap();
        assert_ne!(before, slots.stamp("session"));
    }
}
