//! Reference game schema and world builders for the gref demo.
//!
//! A small platformer-flavored entity set exercising everything the codec
//! supports: nested instances, entity→level back-references (cycles by
//! construction), plain-record payloads, and a post-restore hook.

use graph::{Instance, SharedInstance, Value};
use registry::{SchemaRegistry, TypeDef};

pub const GRID_SIZE: f64 = 32.0;
pub const GRAVITY: f64 = 1000.0;

pub const LEVEL_TYPE: &str = "Level";
pub const TERRAIN_TYPE: &str = "Terrain";
pub const ENEMY_TYPE: &str = "Enemy";
pub const SPAWNER_TYPE: &str = "Spawner";
pub const DAMAGE_BOX_TYPE: &str = "DamageBox";
pub const WAYPOINT_TYPE: &str = "Waypoint";

/// Builds the demo registry with every demo type registered.
#[must_use]
pub fn demo_registry() -> SchemaRegistry {
    SchemaRegistry::builder()
        .register(
            TypeDef::new(LEVEL_TYPE, new_level)
                .with_fields(["x", "y", "width", "height", "entities", "name"])
                .post_restore(level_restored),
        )
        .register(
            TypeDef::new(TERRAIN_TYPE, new_terrain).with_fields(["x", "y", "width", "height"]),
        )
        .register(TypeDef::new(ENEMY_TYPE, new_enemy).with_fields([
            "x",
            "y",
            "dx",
            "dy",
            "health",
            "walk_speed",
            "jump_speed",
            "target",
            "move_target",
            "jump_target",
        ]))
        .register(
            TypeDef::new(SPAWNER_TYPE, new_spawner).with_fields(["enemy", "time_until_spawned"]),
        )
        .register(TypeDef::new(DAMAGE_BOX_TYPE, new_damage_box).with_fields([
            "target",
            "x",
            "y",
            "dx",
            "dy",
            "width",
            "height",
            "ttl",
        ]))
        .register(TypeDef::new(WAYPOINT_TYPE, new_waypoint).with_fields(["x", "y", "next"]))
        .build()
        .expect("demo registry must be valid")
}

fn new_level() -> Instance {
    Instance::new(LEVEL_TYPE)
        .with("x", 0)
        .with("y", 0)
        .with("width", 800)
        .with("height", 800)
        .with("entities", Value::Array(Vec::new()))
        .with("name", "unnamed level")
}

fn new_terrain() -> Instance {
    Instance::new(TERRAIN_TYPE)
        .with("x", 0)
        .with("y", 0)
        .with("width", 0)
        .with("height", 0)
}

fn new_enemy() -> Instance {
    Instance::new(ENEMY_TYPE)
        .with("x", 0)
        .with("y", 0)
        .with("dx", 0)
        .with("dy", 0)
        .with("health", 2)
        .with("walk_speed", 5.0 * GRID_SIZE)
        .with("jump_speed", GRAVITY / 3.0)
        .with("target", Value::Null)
        .with(
            "move_target",
            Value::map_from([("x", Value::Int(0)), ("y", Value::Int(0))]),
        )
        .with("jump_target", Value::Null)
}

fn new_spawner() -> Instance {
    Instance::new(SPAWNER_TYPE)
        .with("enemy", Value::Null)
        .with("time_until_spawned", 0.0)
}

fn new_damage_box() -> Instance {
    Instance::new(DAMAGE_BOX_TYPE)
        .with("target", "enemy")
        .with("x", 0)
        .with("y", 0)
        .with("dx", 0)
        .with("dy", 0)
        .with("width", GRID_SIZE)
        .with("height", GRID_SIZE)
        .with("ttl", 0.0)
}

fn new_waypoint() -> Instance {
    Instance::new(WAYPOINT_TYPE)
        .with("x", 0)
        .with("y", 0)
        .with("next", Value::Null)
}

/// Reattaches each restored entity's `level` back-reference and leaves the
/// level ready for lookups, like the original level rebuild after a load.
fn level_restored(level: &SharedInstance) {
    let entities = level.borrow().get("entities").cloned();
    let Some(Value::Array(entities)) = entities else {
        return;
    };
    for entity in &entities {
        if let Some(instance) = entity.as_instance() {
            instance
                .borrow_mut()
                .set("level", Value::Instance(level.clone()));
        }
    }
}

/// Creates an empty named level.
#[must_use]
pub fn make_level(name: &str) -> SharedInstance {
    let level = new_level().with("name", name);
    level.into_shared()
}

/// Creates a terrain slab.
#[must_use]
pub fn make_terrain(x: i64, y: i64, width: i64, height: i64) -> SharedInstance {
    new_terrain()
        .with("x", x)
        .with("y", y)
        .with("width", width)
        .with("height", height)
        .into_shared()
}

/// Creates an enemy at a position.
#[must_use]
pub fn make_enemy(x: i64, y: i64) -> SharedInstance {
    new_enemy().with("x", x).with("y", y).into_shared()
}

/// Creates a spawner holding a not-yet-active enemy.
#[must_use]
pub fn make_spawner(enemy: &SharedInstance, delay: f64) -> SharedInstance {
    new_spawner()
        .with("enemy", Value::Instance(enemy.clone()))
        .with("time_until_spawned", delay)
        .into_shared()
}

/// Creates a patrol waypoint.
#[must_use]
pub fn make_waypoint(x: i64, y: i64) -> SharedInstance {
    new_waypoint().with("x", x).with("y", y).into_shared()
}

/// Links waypoints into a closed patrol ring via their `next` fields.
pub fn link_ring(waypoints: &[SharedInstance]) {
    for (index, waypoint) in waypoints.iter().enumerate() {
        let next = &waypoints[(index + 1) % waypoints.len()];
        waypoint
            .borrow_mut()
            .set("next", Value::Instance(next.clone()));
    }
}

/// Adds an entity to a level and sets its back-reference, like the original
/// `Level.add`.
pub fn add_entity(level: &SharedInstance, entity: &SharedInstance) {
    entity
        .borrow_mut()
        .set("level", Value::Instance(level.clone()));
    let mut level = level.borrow_mut();
    let mut entities = match level.get("entities").cloned() {
        Some(Value::Array(entities)) => entities,
        _ => Vec::new(),
    };
    entities.push(Value::Instance(entity.clone()));
    level.set("entities", Value::Array(entities));
}

/// Builds a complete demo level: terrain, a patrolling enemy, a spawner, and
/// a waypoint ring. Every entity holds a `level` back-reference, so the
/// graph is cyclic by construction.
#[must_use]
pub fn build_demo_level() -> SharedInstance {
    let level = make_level("demo level");

    let ground = make_terrain(0, 768, 800, 32);
    let ledge = make_terrain(256, 512, 160, 32);
    add_entity(&level, &ground);
    add_entity(&level, &ledge);

    let ring: Vec<SharedInstance> = vec![
        make_waypoint(64, 768),
        make_waypoint(320, 512),
        make_waypoint(736, 768),
    ];
    link_ring(&ring);

    let patroller = make_enemy(64, 768);
    patroller
        .borrow_mut()
        .set("target", Value::Instance(ring[0].clone()));
    add_entity(&level, &patroller);
    for waypoint in &ring {
        add_entity(&level, waypoint);
    }

    let reinforcement = make_enemy(736, 768);
    let spawner = make_spawner(&reinforcement, 4.5);
    add_entity(&level, &spawner);

    level
}
