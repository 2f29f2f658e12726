//! # ECS Performance Benchmark
//!
//! HOUSE REQUIREMENTS:
//! - 10,000 entities (the full id space)
//! - Dense query iteration must beat per-id probing by a wide margin
//! - 0 allocations during a tick
//!
//! Run with: `cargo bench --package kiln_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kiln_core::{Entity, Physics, Player, Transform, World, MAX_ENTITIES};
use kiln_shared::Vec2;

/// Every id the allocator can issue.
const ENTITY_COUNT: usize = MAX_ENTITIES - 1;

/// Prime stride used to hop around the id space out of order.
const HOSTILE_STRIDE: usize = 7919;

/// Builds a world with `count` entities carrying transform + physics.
fn build_world(count: usize) -> (World, Vec<Entity>) {
    let mut world = World::new();
    let entities: Vec<Entity> = (0..count).map(|_| world.spawn()).collect();

    for (i, &entity) in entities.iter().enumerate() {
        let f = i as f32;
        world.add_transform(entity, Transform::at(Vec2::new(f, -f)));
        world.add_physics(
            entity,
            Physics {
                velocity: Vec2::new(0.1, 0.2),
                ..Physics::default()
            },
        );
    }
    (world, entities)
}

/// Benchmark: Spawn and fully populate the id space.
fn bench_spawn_and_attach(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_and_attach");

    for count in [1_000, ENTITY_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let (world, _) = build_world(count);
                black_box(world.issued_entities())
            });
        });
    }

    group.finish();
}

/// THE CRITICAL BENCHMARK: one simulated tick over every body, driven by
/// the dense arrays. This is the cache-friendly path the design exists for.
fn bench_dense_query_tick(c: &mut Criterion) {
    let (mut world, _) = build_world(ENTITY_COUNT);

    c.bench_function("CRITICAL_dense_tick_10k_bodies", |b| {
        b.iter(|| {
            world.query2::<Transform, Physics>(|_, transform, physics| {
                transform.position += physics.velocity * 0.016;
            });
            black_box(world.issued_entities())
        });
    });
}

/// Anti-benchmark: the same tick, but probing entity by entity in a
/// stride-scrambled id order. Every lookup bounces through the sparse array
/// into a cold dense slot - this is the access pattern queries avoid.
fn bench_sparse_probe_tick(c: &mut Criterion) {
    let (mut world, entities) = build_world(ENTITY_COUNT);

    // Deterministic out-of-order visit sequence over all entities.
    let scrambled: Vec<Entity> = (0..entities.len())
        .map(|i| entities[(i * HOSTILE_STRIDE) % entities.len()])
        .collect();

    c.bench_function("sparse_probe_tick_10k_bodies", |b| {
        b.iter(|| {
            for &entity in &scrambled {
                let velocity = world.get_physics(entity).map(|p| p.velocity);
                if let (Some(velocity), Some(transform)) =
                    (velocity, world.get_transform_mut(entity))
                {
                    transform.position += velocity * 0.016;
                }
            }
            black_box(world.issued_entities())
        });
    });
}

/// Benchmark: 2-kind join where one side is much smaller.
///
/// The smaller set drives, so naming order must not matter for cost.
fn bench_asymmetric_join(c: &mut Criterion) {
    let (mut world, entities) = build_world(ENTITY_COUNT);
    // 100 players among 9,999 physics bodies.
    for &entity in entities.iter().step_by(100) {
        world.add_player(entity, Player::default());
    }

    let mut group = c.benchmark_group("asymmetric_join");

    group.bench_function("small_kind_first", |b| {
        b.iter(|| {
            let mut matches = 0_u32;
            world.query2::<Player, Physics>(|_, _, _| matches += 1);
            black_box(matches)
        });
    });

    group.bench_function("large_kind_first", |b| {
        b.iter(|| {
            let mut matches = 0_u32;
            world.query2::<Physics, Player>(|_, _, _| matches += 1);
            black_box(matches)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_spawn_and_attach,
    bench_dense_query_tick,
    bench_sparse_probe_tick,
    bench_asymmetric_join
);
criterion_main!(benches);
