// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod engine;
pub mod map;
pub mod projection;

pub use engine::{ResetOutcome, WorkoutDraft, WorkoutEngine};
pub use map::{MapSurface, MarkerHandle, MarkerRegistry, NullMap};
pub use projection::{project, SortCriterion};
