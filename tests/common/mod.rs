// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test fixtures: an engine wired to an in-memory slot and a map
//! surface that records every call.

use std::cell::RefCell;
use std::rc::Rc;

use mapfit_tracker::models::{LatLng, WorkoutType};
use mapfit_tracker::services::{MapSurface, MarkerHandle, WorkoutDraft, WorkoutEngine};
use mapfit_tracker::storage::{MemorySlot, StorageBridge};

#[allow(dead_code)]
pub const TEST_ZOOM: u8 = 13;

/// Map calls observed during a test.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Placed {
        handle: u64,
        lat: f64,
        lng: f64,
        label: String,
    },
    Removed {
        handle: u64,
    },
    Centered {
        lat: f64,
        lng: f64,
        zoom: u8,
    },
}

#[derive(Debug, Default)]
struct RecorderState {
    next_handle: u64,
    events: Vec<MapEvent>,
}

/// Map surface that records every call. Clones share the event log, so a
/// test can keep a handle while the engine owns the surface.
#[derive(Debug, Clone, Default)]
pub struct RecordingMap {
    state: Rc<RefCell<RecorderState>>,
}

impl RecordingMap {
    #[allow(dead_code)]
    pub fn events(&self) -> Vec<MapEvent> {
        self.state.borrow().events.clone()
    }

    /// Handles placed and not yet removed.
    #[allow(dead_code)]
    pub fn live_handles(&self) -> Vec<u64> {
        let state = self.state.borrow();
        let mut live = Vec::new();
        for event in &state.events {
            match event {
                MapEvent::Placed { handle, .. } => live.push(*handle),
                MapEvent::Removed { handle } => live.retain(|h| h != handle),
                MapEvent::Centered { .. } => {}
            }
        }
        live
    }
}

impl MapSurface for RecordingMap {
    fn place_marker(&mut self, coords: LatLng, label: &str) -> MarkerHandle {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = state.next_handle;
        state.events.push(MapEvent::Placed {
            handle,
            lat: coords.lat(),
            lng: coords.lng(),
            label: label.to_string(),
        });
        MarkerHandle(handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.state
            .borrow_mut()
            .events
            .push(MapEvent::Removed { handle: handle.0 });
    }

    fn center_on(&mut self, coords: LatLng, zoom: u8) {
        self.state.borrow_mut().events.push(MapEvent::Centered {
            lat: coords.lat(),
            lng: coords.lng(),
            zoom,
        });
    }
}

/// Engine over a fresh in-memory slot, plus handles to both collaborators.
#[allow(dead_code)]
pub fn test_engine() -> (
    WorkoutEngine<MemorySlot, RecordingMap>,
    MemorySlot,
    RecordingMap,
) {
    let slot = MemorySlot::new();
    let map = RecordingMap::default();
    let engine = WorkoutEngine::bootstrap(StorageBridge::new(slot.clone()), map.clone(), TEST_ZOOM)
        .expect("bootstrap");
    (engine, slot, map)
}

/// Engine bootstrapped over an existing slot, as on a process restart.
#[allow(dead_code)]
pub fn reload_engine(slot: &MemorySlot) -> (WorkoutEngine<MemorySlot, RecordingMap>, RecordingMap) {
    let map = RecordingMap::default();
    let engine = WorkoutEngine::bootstrap(StorageBridge::new(slot.clone()), map.clone(), TEST_ZOOM)
        .expect("bootstrap");
    (engine, map)
}

#[allow(dead_code)]
pub fn running_draft(distance: &str, duration: &str, cadence: &str) -> WorkoutDraft {
    WorkoutDraft {
        workout_type: WorkoutType::Running,
        coords: LatLng(45.07, 7.68),
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: cadence.to_string(),
        elevation_gain: String::new(),
    }
}

#[allow(dead_code)]
pub fn cycling_draft(distance: &str, duration: &str, elevation_gain: &str) -> WorkoutDraft {
    WorkoutDraft {
        workout_type: WorkoutType::Cycling,
        coords: LatLng(45.18, 7.31),
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: String::new(),
        elevation_gain: elevation_gain.to_string(),
    }
}

/// Records currently persisted in the slot, as raw JSON values.
#[allow(dead_code)]
pub fn persisted_records(slot: &MemorySlot) -> Vec<serde_json::Value> {
    use mapfit_tracker::storage::SlotStore;

    let payload = slot.read().expect("read slot").unwrap_or_default();
    if payload.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(&payload).expect("persisted payload is a JSON array")
}
