// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only sort projections over the collection.

use crate::models::{Workout, WorkoutCollection, WorkoutType};

/// Sort criteria accepted by the list view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    /// Canonical insertion order.
    InsertionOrder,
    /// Ascending by distance.
    Distance,
    /// Ascending by duration.
    Duration,
    /// All running workouts first, then all cycling, each partition in
    /// relative insertion order.
    TypeGrouped,
}

impl SortCriterion {
    /// Parse a selector value as submitted by the list view.
    pub fn from_selector(value: &str) -> Option<Self> {
        match value {
            "time" => Some(SortCriterion::InsertionOrder),
            "distance" => Some(SortCriterion::Distance),
            "duration" => Some(SortCriterion::Duration),
            "type" => Some(SortCriterion::TypeGrouped),
            _ => None,
        }
    }
}

/// Produce a display ordering of the collection.
///
/// Pure function of current contents: canonical order and the entities
/// themselves are never touched.
pub fn project(collection: &WorkoutCollection, criterion: SortCriterion) -> Vec<&Workout> {
    let mut view: Vec<&Workout> = collection.iter().collect();
    match criterion {
        SortCriterion::InsertionOrder => {}
        SortCriterion::Distance => {
            view.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
        }
        SortCriterion::Duration => {
            view.sort_by(|a, b| a.duration().total_cmp(&b.duration()));
        }
        SortCriterion::TypeGrouped => {
            view = collection
                .iter()
                .filter(|w| w.workout_type() == WorkoutType::Running)
                .chain(
                    collection
                        .iter()
                        .filter(|w| w.workout_type() == WorkoutType::Cycling),
                )
                .collect();
        }
    }
    view
}
