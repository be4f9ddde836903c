// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod collection;
pub mod workout;

pub use collection::{CollectionError, WorkoutCollection};
pub use workout::{EditableField, LatLng, Workout, WorkoutId, WorkoutKind, WorkoutType};
