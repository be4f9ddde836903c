// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mutation engine: orchestrates the create, edit, delete, reset and
//! navigate flows.
//!
//! Each mutation follows the same contract:
//! 1. Validate or coerce the raw input
//! 2. Apply the change to the collection, re-deriving dependent metrics
//! 3. Re-synchronize the durable store before returning
//! 4. Signal the map surface and keep the marker side-table aligned
//!
//! The engine receives its collaborators at construction, so it can be
//! exercised in isolation with an in-memory slot and a recording surface.

use crate::error::{AppError, Result};
use crate::models::{
    EditableField, LatLng, Workout, WorkoutCollection, WorkoutId, WorkoutType,
};
use crate::services::map::{MapSurface, MarkerRegistry};
use crate::services::projection::{self, SortCriterion};
use crate::storage::{SlotStore, StorageBridge};

/// Raw form submission, exactly as the input surface collected it.
///
/// Field values arrive as text; coercion and validation belong to the
/// engine, never to the surface.
#[derive(Debug, Clone)]
pub struct WorkoutDraft {
    pub workout_type: WorkoutType,
    pub coords: LatLng,
    pub distance: String,
    pub duration: String,
    /// Read only for running submissions.
    pub cadence: String,
    /// Read only for cycling submissions.
    pub elevation_gain: String,
}

/// Outcome of a reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The collection was already empty; nothing was touched.
    AlreadyEmpty,
    /// The persisted record was cleared. The owning process restarts rather
    /// than patching in-memory state.
    RestartRequired,
}

/// Orchestrator owning the collection, the storage bridge and the map
/// surface wiring.
pub struct WorkoutEngine<S: SlotStore, M: MapSurface> {
    collection: WorkoutCollection,
    storage: StorageBridge<S>,
    map: M,
    markers: MarkerRegistry,
    map_zoom: u8,
}

impl<S: SlotStore, M: MapSurface> WorkoutEngine<S, M> {
    /// Reconstruct the collection from the durable store and wire the
    /// collaborators. Runs before any rendering; markers for restored
    /// workouts are placed here.
    pub fn bootstrap(storage: StorageBridge<S>, map: M, map_zoom: u8) -> Result<Self> {
        let records = storage.load()?;
        let mut collection = WorkoutCollection::new();
        if let Err(err) = collection.replace_all(records) {
            tracing::warn!(error = %err, "Persisted collection is inconsistent; starting empty");
        }
        tracing::info!(count = collection.len(), "Workout collection restored");

        let mut engine = Self {
            collection,
            storage,
            map,
            markers: MarkerRegistry::new(),
            map_zoom,
        };
        engine.place_restored_markers();
        Ok(engine)
    }

    /// Validate a submission, construct the entity, and synchronize every
    /// collaborator.
    ///
    /// Validation is first-offending-field in declaration order: distance,
    /// duration, then the variant field. A rejected submission leaves the
    /// collection and the store untouched.
    pub fn create_workout(&mut self, draft: WorkoutDraft) -> Result<&Workout> {
        let distance = coerce_field("distance", &draft.distance)?;
        let duration = coerce_field("duration", &draft.duration)?;
        let workout = match draft.workout_type {
            WorkoutType::Running => {
                let cadence = coerce_field("cadence", &draft.cadence)?;
                Workout::running(draft.coords, distance, duration, cadence)
            }
            WorkoutType::Cycling => {
                let elevation_gain = coerce_field("elevationGain", &draft.elevation_gain)?;
                Workout::cycling(draft.coords, distance, duration, elevation_gain)
            }
        };

        let id = workout.id().clone();
        let coords = workout.coords();
        let label = workout.marker_label();
        self.collection
            .append(workout)
            .map_err(|err| AppError::Internal(anyhow::anyhow!(err)))?;
        self.persist()?;

        let handle = self.map.place_marker(coords, &label);
        self.markers.insert(id.clone(), handle);
        tracing::info!(id = %id, kind = %draft.workout_type, "Workout created");

        self.collection
            .find(&id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Apply a raw value to one editable field and return the refreshed
    /// derived metric for display.
    ///
    /// Unlike creation, edits carry no positivity or finiteness guard; an
    /// unparseable value coerces to NaN.
    pub fn edit_field(&mut self, id: &WorkoutId, field_name: &str, raw_value: &str) -> Result<f64> {
        let field = EditableField::from_name(field_name)
            .ok_or_else(|| AppError::BadRequest(format!("field '{field_name}' is not editable")))?;
        let workout = self
            .collection
            .find_mut(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        let value: f64 = raw_value.trim().parse().unwrap_or(f64::NAN);
        let derived = workout
            .apply_edit(field, value)
            .map_err(|err| AppError::BadRequest(err.to_string()))?;
        self.persist()?;
        tracing::info!(id = %id, field = field.name(), "Workout field updated");
        Ok(derived)
    }

    /// Remove a workout, its persisted record and its marker.
    ///
    /// Emptying the collection persists an empty sequence; the slot itself
    /// is only cleared by an explicit [`Self::reset_all`].
    pub fn delete_workout(&mut self, id: &WorkoutId) -> Result<Workout> {
        let removed = self
            .collection
            .remove(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        self.persist()?;
        if let Some(handle) = self.markers.take(id) {
            self.map.remove_marker(handle);
        }
        tracing::info!(id = %id, "Workout deleted");
        Ok(removed)
    }

    /// Center the map on a workout and record the click-through.
    pub fn visit_workout(&mut self, id: &WorkoutId) -> Result<&Workout> {
        let coords = {
            let workout = self
                .collection
                .find_mut(id)
                .ok_or_else(|| AppError::NotFound(id.to_string()))?;
            workout.register_interaction();
            workout.coords()
        };
        self.persist()?;
        self.map.center_on(coords, self.map_zoom);
        tracing::debug!(id = %id, "Workout visited");
        self.collection
            .find(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Clear the persisted record. No-op on an empty collection.
    ///
    /// In-memory state is left alone; the caller restarts the owning
    /// process to come back up clean.
    pub fn reset_all(&mut self) -> Result<ResetOutcome> {
        if self.collection.is_empty() {
            return Ok(ResetOutcome::AlreadyEmpty);
        }
        self.storage.clear()?;
        tracing::info!("Workout store cleared; restart required");
        Ok(ResetOutcome::RestartRequired)
    }

    /// Center the map on an externally supplied position (e.g. the user's
    /// own location at startup).
    pub fn center_map(&mut self, coords: LatLng) {
        self.map.center_on(coords, self.map_zoom);
    }

    /// Read-only display ordering of the current collection.
    pub fn project(&self, criterion: SortCriterion) -> Vec<&Workout> {
        projection::project(&self.collection, criterion)
    }

    pub fn collection(&self) -> &WorkoutCollection {
        &self.collection
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(self.collection.as_slice())?;
        Ok(())
    }

    fn place_restored_markers(&mut self) {
        for workout in self.collection.iter() {
            let handle = self.map.place_marker(workout.coords(), &workout.marker_label());
            self.markers.insert(workout.id().clone(), handle);
        }
    }
}

/// Coerce a raw form value, rejecting anything that is not a finite,
/// strictly positive number. The error carries the offending field name.
fn coerce_field(field: &'static str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation { field })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_field_accepts_positive_finite() {
        assert_eq!(coerce_field("distance", "10.5").expect("valid"), 10.5);
        assert_eq!(coerce_field("distance", " 3 ").expect("valid"), 3.0);
    }

    #[test]
    fn test_coerce_field_names_the_offender() {
        for raw in ["", "abc", "-1", "0", "inf", "NaN"] {
            let err = coerce_field("duration", raw).unwrap_err();
            assert_eq!(err.offending_field(), Some("duration"), "input {raw:?}");
        }
    }
}
