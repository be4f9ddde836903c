// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: the durable slot and the bridge that serializes the
//! collection into it.

pub mod bridge;
pub mod slot;

pub use bridge::StorageBridge;
pub use slot::{FileSlot, MemorySlot, SlotStore};

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access the durable store: {0}")]
    Io(String),

    #[error("failed to serialize the collection: {0}")]
    Encode(String),

    #[error("stored content is not a valid collection: {0}")]
    Parse(String),
}
