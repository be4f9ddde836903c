// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapfit-Tracker: map-pinned workout log
//!
//! Core engine for tracking running and cycling workouts: the entity model
//! with derived metrics, an insertion-ordered identity-indexed collection,
//! a persistence bridge that keeps a durable slot synchronized after every
//! mutation, and read-only sort projections for the list view.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{AppError, Result};
