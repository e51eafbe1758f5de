//! Scenario generation and benchmarking for the gref codec.
//!
//! This crate provides:
//!
//! - Deterministic scenario builders over the demo schema
//! - A benchmark harness with JSON summary output
//!
//! # Design Principles
//!
//! - **Reproducible** - Scenarios are fully deterministic; no randomness.
//! - **Shaped like saves** - Wide levels, shared targets, and reference
//!   rings model what real save files stress in the codec.

use demo_schema::{
    add_entity, link_ring, make_enemy, make_level, make_terrain, make_waypoint,
};
use graph::{SharedInstance, Value};

/// A level with `slabs` terrain entities: wide and shallow.
#[must_use]
pub fn wide_level(slabs: usize) -> SharedInstance {
    let level = make_level("wide");
    for index in 0..slabs {
        let x = (index as i64) * 32;
        add_entity(&level, &make_terrain(x, 768, 32, 32));
    }
    level
}

/// A level where every enemy targets the same waypoint: heavy on
/// reference nodes.
#[must_use]
pub fn shared_target_swarm(enemies: usize) -> SharedInstance {
    let level = make_level("swarm");
    let rally = make_waypoint(400, 400);
    add_entity(&level, &rally);
    for index in 0..enemies {
        let enemy = make_enemy((index as i64) * 16, 768);
        enemy
            .borrow_mut()
            .set("target", Value::Instance(rally.clone()));
        add_entity(&level, &enemy);
    }
    level
}

/// A closed ring of `length` waypoints: nests one instance node per hop, so
/// documents get as deep as the ring is long.
#[must_use]
pub fn waypoint_ring(length: usize) -> SharedInstance {
    let ring: Vec<SharedInstance> = (0..length)
        .map(|index| make_waypoint(index as i64, 0))
        .collect();
    link_ring(&ring);
    ring[0].clone()
}
