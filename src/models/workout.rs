// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout entity model: the two activity variants and their derived metrics.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic position as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

impl LatLng {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.0, self.1)
    }
}

/// Opaque stable workout identifier.
///
/// Assigned once at creation and never reassigned. It is the sole join key
/// between the collection, the persisted record, the rendered list row and
/// the map marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Mint a fresh identifier: the last ten digits of a millisecond
    /// wall-clock stamp. A process-wide high-water mark keeps stamps
    /// strictly increasing, so two creations in the same millisecond still
    /// get distinct ids.
    fn generate() -> Self {
        static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

        let now = Utc::now().timestamp_millis();
        let mut prev = LAST_STAMP.load(Ordering::Relaxed);
        let stamp = loop {
            let candidate = now.max(prev + 1);
            match LAST_STAMP.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break candidate,
                Err(actual) => prev = actual,
            }
        };

        let digits = stamp.to_string();
        let tail = digits.len().saturating_sub(10);
        WorkoutId(digits[tail..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(raw: &str) -> Self {
        WorkoutId(raw.to_string())
    }
}

/// Activity discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    /// Capitalized label used in descriptions.
    pub fn title(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    /// Marker icon for this activity.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }

    /// Parse the form's type selector value.
    pub fn from_input(value: &str) -> Option<Self> {
        match value {
            "running" => Some(WorkoutType::Running),
            "cycling" => Some(WorkoutType::Cycling),
            _ => None,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutType::Running => f.write_str("running"),
            WorkoutType::Cycling => f.write_str("cycling"),
        }
    }
}

/// Variant payload: the discriminant decides which input field and which
/// derived metric exist. The derived value is never written directly; it is
/// refreshed from `distance`/`duration` via [`Workout::recompute_metric`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per unit distance, `duration / distance`
        pace: f64,
    },
    Cycling {
        /// Meters climbed
        elevation_gain: f64,
        /// Distance per hour, `distance / (duration / 60)`
        speed: f64,
    },
}

/// Fields that may be rewritten after creation.
///
/// `id`, `type`, `coords` and `description` are never editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Distance,
    Duration,
    Cadence,
    ElevationGain,
}

impl EditableField {
    /// Parse a field name as submitted by the list row editor.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "distance" => Some(EditableField::Distance),
            "duration" => Some(EditableField::Duration),
            "cadence" => Some(EditableField::Cadence),
            "elevationGain" => Some(EditableField::ElevationGain),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditableField::Distance => "distance",
            EditableField::Duration => "duration",
            EditableField::Cadence => "cadence",
            EditableField::ElevationGain => "elevationGain",
        }
    }
}

/// Errors from field edits.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("field '{field}' does not exist on a {variant} workout")]
    FieldMismatch {
        field: &'static str,
        variant: &'static str,
    },
}

/// A single logged workout.
///
/// The serialized shape is the persisted record: base fields in camelCase
/// with the variant payload flattened next to them, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: LatLng,
    distance: f64,
    duration: f64,
    #[serde(flatten)]
    kind: WorkoutKind,
    description: String,
    #[serde(default)]
    interaction_count: u32,
}

impl Workout {
    /// Construct a running workout from already-validated inputs.
    pub fn running(coords: LatLng, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::new(
            coords,
            distance,
            duration,
            WorkoutKind::Running { cadence, pace: 0.0 },
        )
    }

    /// Construct a cycling workout from already-validated inputs.
    pub fn cycling(coords: LatLng, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self::new(
            coords,
            distance,
            duration,
            WorkoutKind::Cycling {
                elevation_gain,
                speed: 0.0,
            },
        )
    }

    fn new(coords: LatLng, distance: f64, duration: f64, kind: WorkoutKind) -> Self {
        let mut workout = Self {
            id: WorkoutId::generate(),
            created_at: Utc::now(),
            coords,
            distance,
            duration,
            kind,
            description: String::new(),
            interaction_count: 0,
        };
        workout.recompute_metric();
        workout.description = Self::compose_description(workout.workout_type(), workout.created_at);
        workout
    }

    /// Rebuild an entity from a persisted record.
    ///
    /// Identity, timestamp, raw inputs and the interaction count are taken
    /// from the record as-is; the derived metric and the description are
    /// recomputed, so a stale or hand-edited store never surfaces
    /// inconsistent values.
    pub fn rehydrate(mut record: Workout) -> Workout {
        record.recompute_metric();
        record.description = Self::compose_description(record.workout_type(), record.created_at);
        record
    }

    /// Re-derive `pace`/`speed` from the current distance and duration.
    ///
    /// The only sanctioned path to keep the derived metric consistent after
    /// a field mutation.
    pub fn recompute_metric(&mut self) {
        match &mut self.kind {
            WorkoutKind::Running { pace, .. } => *pace = self.duration / self.distance,
            WorkoutKind::Cycling { speed, .. } => *speed = self.distance / (self.duration / 60.0),
        }
    }

    /// Apply a raw value to one editable field and re-derive the dependent
    /// metric. Returns the refreshed derived value for display.
    pub fn apply_edit(&mut self, field: EditableField, value: f64) -> Result<f64, EditError> {
        match field {
            EditableField::Distance => self.distance = value,
            EditableField::Duration => self.duration = value,
            EditableField::Cadence => match &mut self.kind {
                WorkoutKind::Running { cadence, .. } => *cadence = value,
                WorkoutKind::Cycling { .. } => {
                    return Err(EditError::FieldMismatch {
                        field: field.name(),
                        variant: "cycling",
                    })
                }
            },
            EditableField::ElevationGain => match &mut self.kind {
                WorkoutKind::Cycling { elevation_gain, .. } => *elevation_gain = value,
                WorkoutKind::Running { .. } => {
                    return Err(EditError::FieldMismatch {
                        field: field.name(),
                        variant: "running",
                    })
                }
            },
        }
        self.recompute_metric();
        Ok(self.derived_metric())
    }

    /// Record one click-through on this workout.
    pub fn register_interaction(&mut self) {
        self.interaction_count += 1;
    }

    /// Label text for the map marker: icon plus description.
    pub fn marker_label(&self) -> String {
        format!("{} {}", self.workout_type().icon(), self.description)
    }

    /// "Running on April 14". Fixed at construction, never recomposed on
    /// edit.
    fn compose_description(workout_type: WorkoutType, created_at: DateTime<Utc>) -> String {
        format!("{} on {}", workout_type.title(), created_at.format("%B %-d"))
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> LatLng {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// Current derived metric: pace for running, speed for cycling.
    pub fn derived_metric(&self) -> f64 {
        match self.kind {
            WorkoutKind::Running { pace, .. } => pace,
            WorkoutKind::Cycling { speed, .. } => speed,
        }
    }

    /// Current variant input field: cadence for running, elevation gain for
    /// cycling.
    pub fn variant_field(&self) -> f64 {
        match self.kind {
            WorkoutKind::Running { cadence, .. } => cadence,
            WorkoutKind::Cycling { elevation_gain, .. } => elevation_gain,
        }
    }
}
