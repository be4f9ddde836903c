// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.

use crate::storage::StorageError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A submitted numeric value failed creation-time validation. Carries
    /// the first offending field, in form declaration order.
    #[error("{field} not valid")]
    Validation { field: &'static str },

    #[error("workout not found: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Field named by a validation failure, if any.
    pub fn offending_field(&self) -> Option<&'static str> {
        match self {
            AppError::Validation { field } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, AppError>;
