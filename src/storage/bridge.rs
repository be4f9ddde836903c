// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Serialization bridge between the in-memory collection and the durable
//! slot.
//!
//! The slot is overwritten wholesale on every save; on load, every record is
//! pushed back through entity construction so derived fields come out
//! consistent even when the persisted copy was stale or hand-edited.

use crate::models::Workout;
use crate::storage::{SlotStore, StorageError};

/// Persistence bridge over a durable slot.
pub struct StorageBridge<S: SlotStore> {
    slot: S,
}

impl<S: SlotStore> StorageBridge<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Serialize the full collection (derived fields included) and
    /// overwrite the slot.
    pub fn save(&self, workouts: &[Workout]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(workouts)
            .map_err(|err| StorageError::Encode(err.to_string()))?;
        self.slot.write(&payload)
    }

    /// Load previously persisted workouts.
    ///
    /// A missing slot is no prior data, not an error. Content that does not
    /// parse as a collection is treated the same way: the failure is logged
    /// and an empty sequence is returned, so startup proceeds.
    pub fn load(&self) -> Result<Vec<Workout>, StorageError> {
        let Some(payload) = self.slot.read()? else {
            return Ok(Vec::new());
        };
        match Self::decode(&payload) {
            Ok(workouts) => Ok(workouts),
            Err(err) => {
                tracing::warn!(error = %err, "Discarding unreadable workout store");
                Ok(Vec::new())
            }
        }
    }

    /// Remove the persisted record entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.slot.remove()
    }

    fn decode(payload: &str) -> Result<Vec<Workout>, StorageError> {
        let records: Vec<Workout> =
            serde_json::from_str(payload).map_err(|err| StorageError::Parse(err.to_string()))?;
        Ok(records.into_iter().map(Workout::rehydrate).collect())
    }
}
