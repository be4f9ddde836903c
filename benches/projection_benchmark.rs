use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mapfit_tracker::models::{LatLng, Workout, WorkoutCollection, WorkoutId};
use mapfit_tracker::services::{project, SortCriterion};

fn populate(count: usize) -> (WorkoutCollection, Vec<WorkoutId>) {
    let mut collection = WorkoutCollection::new();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let distance = 1.0 + (i % 40) as f64;
        let duration = 10.0 + (i % 90) as f64;
        let workout = if i % 2 == 0 {
            Workout::running(LatLng(45.0, 7.0), distance, duration, 160.0)
        } else {
            Workout::cycling(LatLng(45.0, 7.0), distance, duration, 300.0)
        };
        let stored = collection.append(workout).expect("append");
        ids.push(stored.id().clone());
    }
    (collection, ids)
}

fn benchmark_projection(c: &mut Criterion) {
    // Build the collection once; projections are read-only
    let (collection, ids) = populate(1_000);
    let middle_id = ids[ids.len() / 2].clone();

    let mut group = c.benchmark_group("collection");

    group.bench_function("project_distance_1k", |b| {
        b.iter(|| project(black_box(&collection), SortCriterion::Distance))
    });

    group.bench_function("project_type_grouped_1k", |b| {
        b.iter(|| project(black_box(&collection), SortCriterion::TypeGrouped))
    });

    group.bench_function("find_by_id_1k", |b| {
        b.iter(|| collection.find(black_box(&middle_id)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_projection);
criterion_main!(benches);
