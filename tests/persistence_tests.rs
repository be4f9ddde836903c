// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence contract: round-trips, identity stability across reloads,
//! and tolerance of a damaged or hand-edited store.

mod common;

use common::{cycling_draft, reload_engine, running_draft, test_engine};
use mapfit_tracker::models::{LatLng, Workout};
use mapfit_tracker::storage::{FileSlot, MemorySlot, SlotStore, StorageBridge};

#[test]
fn test_round_trip_reconstructs_field_equal_entities() {
    let (mut engine, slot, _map) = test_engine();
    engine
        .create_workout(running_draft("10", "50", "170"))
        .expect("create");
    engine
        .create_workout(cycling_draft("30", "90", "520"))
        .expect("create");
    let originals: Vec<Workout> = engine.collection().as_slice().to_vec();

    let (restored_engine, _map) = reload_engine(&slot);
    assert_eq!(restored_engine.collection().as_slice(), &originals[..]);
}

#[test]
fn test_identity_is_stable_across_reload() {
    let (mut engine, slot, _map) = test_engine();
    let id = engine
        .create_workout(running_draft("10", "50", "170"))
        .expect("create")
        .id()
        .clone();

    let (restored_engine, _map) = reload_engine(&slot);
    let restored = restored_engine.collection().find(&id).expect("find by id");
    assert_eq!(restored.id(), &id);
}

#[test]
fn test_interaction_count_survives_reload() {
    let (mut engine, slot, _map) = test_engine();
    let id = engine
        .create_workout(running_draft("10", "50", "170"))
        .expect("create")
        .id()
        .clone();
    engine.visit_workout(&id).expect("visit");

    let (restored_engine, _map) = reload_engine(&slot);
    let restored = restored_engine.collection().find(&id).expect("find by id");
    assert_eq!(restored.interaction_count(), 1);
}

#[test]
fn test_bootstrap_places_markers_for_restored_workouts() {
    let (mut engine, slot, _map) = test_engine();
    engine
        .create_workout(running_draft("10", "50", "170"))
        .expect("create");
    engine
        .create_workout(cycling_draft("30", "90", "520"))
        .expect("create");

    let (_restored_engine, restored_map) = reload_engine(&slot);
    assert_eq!(restored_map.live_handles().len(), 2);
}

#[test]
fn test_bootstrap_on_empty_slot_starts_empty() {
    let slot = MemorySlot::new();
    let (engine, map) = reload_engine(&slot);
    assert!(engine.collection().is_empty());
    assert!(map.events().is_empty());
}

#[test]
fn test_bootstrap_on_garbage_slot_starts_empty() {
    let slot = MemorySlot::new();
    slot.write("not a collection at all").expect("write");

    let (engine, _map) = reload_engine(&slot);
    assert!(engine.collection().is_empty());
}

#[test]
fn test_bootstrap_on_duplicate_ids_starts_empty() {
    let slot = MemorySlot::new();
    let workout = Workout::running(LatLng(45.0, 7.0), 10.0, 50.0, 170.0);
    StorageBridge::new(slot.clone())
        .save(&[workout.clone(), workout])
        .expect("save");

    let (engine, _map) = reload_engine(&slot);
    assert!(engine.collection().is_empty());
}

#[test]
fn test_stale_derived_field_is_recomputed_on_reload() {
    let (mut engine, slot, _map) = test_engine();
    engine
        .create_workout(running_draft("10", "50", "170"))
        .expect("create");

    let doctored = slot
        .read()
        .expect("read")
        .expect("payload")
        .replace("\"pace\":5.0", "\"pace\":42.0");
    slot.write(&doctored).expect("write");

    let (restored_engine, _map) = reload_engine(&slot);
    let restored = &restored_engine.collection().as_slice()[0];
    assert_eq!(restored.derived_metric(), 5.0);
}

#[test]
fn test_mutations_survive_a_full_restart_cycle() {
    let (mut engine, slot, _map) = test_engine();
    let id = engine
        .create_workout(running_draft("10", "50", "170"))
        .expect("create")
        .id()
        .clone();
    engine.edit_field(&id, "duration", "40").expect("edit");

    let (mut restored_engine, _map) = reload_engine(&slot);
    {
        let restored = restored_engine.collection().find(&id).expect("find");
        assert_eq!(restored.duration(), 40.0);
        assert_eq!(restored.derived_metric(), 4.0);
    }

    // keep mutating after the reload; the slot follows along
    restored_engine.delete_workout(&id).expect("delete");
    let (final_engine, _map) = reload_engine(&slot);
    assert!(final_engine.collection().is_empty());
}

#[test]
fn test_file_slot_backs_the_bridge() {
    let path = std::env::temp_dir()
        .join(format!("mapfit_bridge_{}", std::process::id()))
        .join("workouts.json");
    let slot = FileSlot::new(&path);
    slot.remove().expect("clean slate");

    let bridge = StorageBridge::new(slot.clone());
    let workouts = vec![Workout::cycling(LatLng(45.0, 7.0), 30.0, 90.0, 520.0)];
    bridge.save(&workouts).expect("save");
    assert_eq!(bridge.load().expect("load"), workouts);

    bridge.clear().expect("clear");
    assert_eq!(slot.read().expect("read"), None);
}
