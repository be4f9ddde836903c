// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The durable medium: a single named slot holding one serialized blob.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::storage::StorageError;

/// Key-value persistence medium holding the whole collection as one blob.
///
/// Mirrors a browser-style storage slot: read the blob, overwrite it
/// wholesale, or remove it. No schema is enforced at this level; the bridge
/// owns interpretation of the payload.
pub trait SlotStore {
    /// Current payload, or `None` if the slot holds nothing.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot with a new payload.
    fn write(&self, payload: &str) -> Result<(), StorageError>;

    /// Remove the slot entirely. Removing an absent slot is not an error.
    fn remove(&self) -> Result<(), StorageError>;
}

/// File-backed slot.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SlotStore for FileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Io(err.to_string()))?;
        }
        fs::write(&self.path, payload).map_err(|err| StorageError::Io(err.to_string()))
    }

    fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }
}

/// In-memory slot for tests and offline runs.
///
/// Clones share the underlying payload, so a test can keep a handle and
/// inspect what the engine persisted.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    payload: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, StorageError> {
        self.payload
            .lock()
            .map_err(|_| StorageError::Io("slot mutex poisoned".to_string()))
    }
}

impl SlotStore for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.clone())
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        *self.lock()? = Some(payload.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_slot_clones_share_payload() {
        let slot = MemorySlot::new();
        let twin = slot.clone();
        slot.write("[]").expect("write");
        assert_eq!(twin.read().expect("read").as_deref(), Some("[]"));
        twin.remove().expect("remove");
        assert_eq!(slot.read().expect("read"), None);
    }

    #[test]
    fn test_file_slot_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("mapfit_slot_{}", std::process::id()))
            .join("workouts.json");
        let slot = FileSlot::new(&path);

        assert_eq!(slot.read().expect("read"), None);
        slot.write("{\"probe\":1}").expect("write");
        assert_eq!(slot.read().expect("read").as_deref(), Some("{\"probe\":1}"));
        slot.remove().expect("remove");
        assert_eq!(slot.read().expect("read"), None);
        // removing an already-absent slot stays quiet
        slot.remove().expect("remove");
    }
}
