// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map surface contract and the workout → marker side-table.

use std::collections::HashMap;

use crate::models::{LatLng, WorkoutId};

/// Opaque marker handle minted by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// External map collaborator.
///
/// The engine drives it after every create, delete and navigate action; how
/// markers are actually rendered is the surface's business.
pub trait MapSurface {
    /// Place a marker and return its handle.
    fn place_marker(&mut self, coords: LatLng, label: &str) -> MarkerHandle;

    /// Remove a previously placed marker.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Center the view on a position.
    fn center_on(&mut self, coords: LatLng, zoom: u8);
}

/// Side-table joining workout identity to the marker handle the surface
/// returned for it. The engine keeps it aligned with collection mutations.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    handles: HashMap<WorkoutId, MarkerHandle>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: WorkoutId, handle: MarkerHandle) {
        self.handles.insert(id, handle);
    }

    /// Detach and return the handle for a workout, if one was registered.
    pub fn take(&mut self, id: &WorkoutId) -> Option<MarkerHandle> {
        self.handles.remove(id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Surface that renders nothing, for headless runs and benches.
#[derive(Debug, Default)]
pub struct NullMap {
    next_handle: u64,
}

impl MapSurface for NullMap {
    fn place_marker(&mut self, _coords: LatLng, _label: &str) -> MarkerHandle {
        self.next_handle += 1;
        MarkerHandle(self.next_handle)
    }

    fn remove_marker(&mut self, _handle: MarkerHandle) {}

    fn center_on(&mut self, _coords: LatLng, _zoom: u8) {}
}
