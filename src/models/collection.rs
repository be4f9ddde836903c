// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered, identity-indexed collection of workouts.

use std::collections::HashMap;

use crate::models::workout::{Workout, WorkoutId};

/// In-memory workout collection.
///
/// Insertion order is the canonical order. A side index maps each id to its
/// position so per-click flows (edit, marker removal) resolve in O(1)
/// amortized time instead of scanning.
#[derive(Debug, Default)]
pub struct WorkoutCollection {
    workouts: Vec<Workout>,
    index: HashMap<WorkoutId, usize>,
}

/// Errors from collection mutations.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("duplicate workout id: {0}")]
    DuplicateId(WorkoutId),
}

impl WorkoutCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Workouts in canonical insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.workouts
    }

    /// Append a workout, preserving id uniqueness.
    pub fn append(&mut self, workout: Workout) -> Result<&Workout, CollectionError> {
        if self.index.contains_key(workout.id()) {
            return Err(CollectionError::DuplicateId(workout.id().clone()));
        }
        let position = self.workouts.len();
        self.index.insert(workout.id().clone(), position);
        self.workouts.push(workout);
        Ok(&self.workouts[position])
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.index.get(id).map(|&position| &self.workouts[position])
    }

    pub fn find_mut(&mut self, id: &WorkoutId) -> Option<&mut Workout> {
        let position = *self.index.get(id)?;
        Some(&mut self.workouts[position])
    }

    /// Remove a workout by id; `None` if absent. Later entries keep their
    /// relative order and the index is repaired in place.
    pub fn remove(&mut self, id: &WorkoutId) -> Option<Workout> {
        let position = self.index.remove(id)?;
        let removed = self.workouts.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Replace the whole collection, used only when loading from
    /// persistence. On a duplicate id the collection is left empty.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) -> Result<(), CollectionError> {
        self.workouts.clear();
        self.index.clear();
        for workout in workouts {
            if let Err(err) = self.append(workout) {
                self.workouts.clear();
                self.index.clear();
                return Err(err);
            }
        }
        Ok(())
    }
}
