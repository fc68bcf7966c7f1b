//! Game content and world assembly.
//!
//! Everything specific to this particular game lives here: texture keys,
//! animation tables, object prototypes, level spawning, the update schedule
//! and the headless frame driver. Systems refer to textures and animations
//! only through the constants in [`tex`] and [`anim`].

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::gameobject::{
    BulletData, EnemyData, EnemyState, GameObject, ObjectKind, PlayerData, PlayerState,
};
use crate::components::layer::Layer;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::inputtrace::InputTrace;
use crate::resources::level::{LevelError, LevelGrid, TileCode};
use crate::resources::screensize::ScreenSize;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::camera::camera_follow;
use crate::systems::time::update_world_time;
use crate::systems::update::object_update;

/// Texture keys. The binary loads `<assets>/<key>.png` for each of them.
pub mod tex {
    pub const PLAYER_IDLE: &str = "player_idle";
    pub const PLAYER_RUN: &str = "player_run";
    pub const PLAYER_SLIDE: &str = "player_slide";
    pub const PLAYER_JUMP: &str = "player_jump";
    pub const PLAYER_SHOOT: &str = "player_shoot";
    pub const PLAYER_RUN_SHOOT: &str = "player_run_shoot";
    pub const PLAYER_SLIDE_SHOOT: &str = "player_slide_shoot";
    pub const ENEMY: &str = "enemy";
    pub const ENEMY_HIT: &str = "enemy_hit";
    pub const ENEMY_DIE: &str = "enemy_die";
    pub const BULLET: &str = "bullet";
    pub const BULLET_HIT: &str = "bullet_hit";
    pub const GROUND: &str = "ground";
    pub const PANEL: &str = "panel";
    pub const GRASS: &str = "grass";
    pub const BRICK: &str = "brick";

    pub const ALL: [&str; 16] = [
        PLAYER_IDLE,
        PLAYER_RUN,
        PLAYER_SLIDE,
        PLAYER_JUMP,
        PLAYER_SHOOT,
        PLAYER_RUN_SHOOT,
        PLAYER_SLIDE_SHOOT,
        ENEMY,
        ENEMY_HIT,
        ENEMY_DIE,
        BULLET,
        BULLET_HIT,
        GROUND,
        PANEL,
        GRASS,
        BRICK,
    ];
}

/// Indices into each kind's animation list.
pub mod anim {
    pub const PLAYER_IDLE: usize = 0;
    pub const PLAYER_RUN: usize = 1;
    pub const PLAYER_SLIDE: usize = 2;
    pub const PLAYER_SHOOT: usize = 3;
    pub const PLAYER_SLIDE_SHOOT: usize = 4;
    pub const PLAYER_JUMP: usize = 5;

    pub const ENEMY_WALK: usize = 0;
    pub const ENEMY_HIT: usize = 1;
    pub const ENEMY_DIE: usize = 2;

    pub const BULLET_MOVING: usize = 0;
    pub const BULLET_HIT: usize = 1;
}

/// Edge length of character sprites.
pub const SPRITE_SIZE: f32 = 32.0;
/// Edge length of the bullet sprite and its collider.
pub const BULLET_SIZE: f32 = 8.0;

fn player_animations() -> Vec<Animation> {
    vec![
        Animation::new(8, 1.6),
        Animation::new(4, 0.5),
        Animation::new(1, 1.0),
        Animation::new(4, 0.5),
        Animation::new(4, 0.5),
        Animation::new(1, 1.0),
    ]
}

fn enemy_animations() -> Vec<Animation> {
    vec![
        Animation::new(8, 1.0),
        Animation::new(8, 1.0),
        Animation::new(18, 2.0),
    ]
}

fn bullet_animations() -> Vec<Animation> {
    vec![Animation::new(4, 0.05), Animation::new(4, 0.15)]
}

pub fn player_object(position: Vector2, config: &GameConfig) -> GameObject {
    let mut obj = GameObject::new(ObjectKind::Player(PlayerData::new(config.weapon_cooldown)))
        .with_position(position)
        .with_collider(BoxCollider::new(10.0, 26.0).with_offset(Vector2::new(11.0, 6.0)))
        .with_texture(tex::PLAYER_IDLE, Vector2::new(SPRITE_SIZE, SPRITE_SIZE))
        .with_animations(player_animations(), anim::PLAYER_IDLE);
    obj.dynamic = true;
    obj.acceleration = Vector2::new(config.player_acceleration, 0.0);
    obj.max_speed_x = config.player_max_speed;
    obj
}

pub fn enemy_object(position: Vector2, config: &GameConfig) -> GameObject {
    let data = EnemyData::new(config.enemy_health, config.enemy_damaged_time);
    let mut obj = GameObject::new(ObjectKind::Enemy(data))
        .with_position(position)
        .with_collider(BoxCollider::new(12.0, 28.0).with_offset(Vector2::new(10.0, 4.0)))
        .with_texture(tex::ENEMY, Vector2::new(SPRITE_SIZE, SPRITE_SIZE))
        .with_animations(enemy_animations(), anim::ENEMY_WALK);
    obj.dynamic = true;
    obj.direction = -1.0;
    obj.acceleration = Vector2::new(config.enemy_acceleration, 0.0);
    obj.max_speed_x = config.enemy_max_speed;
    obj
}

pub fn bullet_object(
    position: Vector2,
    direction: f32,
    velocity: Vector2,
    config: &GameConfig,
) -> GameObject {
    let mut obj = GameObject::new(ObjectKind::Bullet(BulletData::default()))
        .with_position(position)
        .with_collider(BoxCollider::new(BULLET_SIZE, BULLET_SIZE))
        .with_texture(tex::BULLET, Vector2::new(BULLET_SIZE, BULLET_SIZE))
        .with_animations(bullet_animations(), anim::BULLET_MOVING);
    obj.direction = direction;
    obj.velocity = velocity;
    obj.max_speed_x = config.bullet_max_speed;
    obj
}

/// A level tile. Solid tiles get a full-tile collider.
pub fn tile_object(position: Vector2, texture: &'static str, tile_size: f32, solid: bool) -> GameObject {
    let mut obj = GameObject::new(ObjectKind::Level)
        .with_position(position)
        .with_texture(texture, Vector2::new(tile_size, tile_size));
    if solid {
        obj.collider = BoxCollider::new(tile_size, tile_size);
    }
    obj
}

/// Validate `level` and spawn its objects. Returns the player entity.
pub fn spawn_level(
    world: &mut World,
    level: &LevelGrid,
    config: &GameConfig,
) -> Result<Entity, LevelError> {
    level.validate()?;

    let ts = level.tile_size as f32;
    let mut player = None;
    let mut enemies = 0;
    let mut tiles = 0;
    for tile in level.tiles() {
        let origin = Vector2::new(tile.col as f32 * ts, tile.row as f32 * ts);
        // Characters stand on the bottom edge of their cell.
        let feet = Vector2::new(origin.x, origin.y + ts - SPRITE_SIZE);
        match tile.code {
            TileCode::Ground => {
                world.spawn((tile_object(origin, tex::GROUND, ts, true), Layer::Level));
                tiles += 1;
            }
            TileCode::Panel => {
                world.spawn((tile_object(origin, tex::PANEL, ts, true), Layer::Level));
                tiles += 1;
            }
            TileCode::Grass => {
                world.spawn((tile_object(origin, tex::GRASS, ts, false), Layer::Foreground));
            }
            TileCode::Brick => {
                world.spawn((tile_object(origin, tex::BRICK, ts, false), Layer::Background));
            }
            TileCode::EnemySpawn => {
                world.spawn((enemy_object(feet, config), Layer::Characters));
                enemies += 1;
            }
            TileCode::PlayerSpawn => {
                let id = world
                    .spawn((player_object(feet, config), Layer::Characters))
                    .id();
                player = Some(id);
            }
            TileCode::Empty => {}
        }
    }

    log::info!(
        "Level {}x{} spawned: {} solid tiles, {} enemies",
        level.width(),
        level.height(),
        tiles,
        enemies
    );
    player.ok_or(LevelError::PlayerSpawnCount(0))
}

/// Insert the simulation resources and spawn `level`. Returns the player.
pub fn setup_world(
    world: &mut World,
    config: GameConfig,
    level: &LevelGrid,
) -> Result<Entity, LevelError> {
    let screen = ScreenSize {
        w: config.render_width as i32,
        h: config.render_height as i32,
    };
    let (window_w, window_h) = config.window_size();
    let target = Vector2::new(screen.w as f32 * 0.5, screen.h as f32 * 0.5);

    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(InputState::default());
    world.insert_resource(SimRng::with_seed(config.seed));
    world.insert_resource(screen);
    world.insert_resource(Camera2DRes::new(target, screen, window_w, window_h));

    let player = spawn_level(world, level, &config)?;
    world.insert_resource(config);
    Ok(player)
}

/// Per-frame simulation: object update, then animation, then camera.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems((object_update, animation, camera_follow).chain());
    update
}

/// Advance the world by one frame of `dt` seconds.
pub fn step_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Run `frames` frames at a fixed `dt` with whatever input is currently set.
pub fn run_frames(world: &mut World, schedule: &mut Schedule, frames: u64, dt: f32) {
    for _ in 0..frames {
        step_frame(world, schedule, dt);
    }
}

/// Feed every frame of `trace` through the input resource and step.
pub fn run_trace(world: &mut World, schedule: &mut Schedule, trace: &InputTrace) {
    for frame in &trace.frames {
        frame.apply(&mut world.resource_mut::<InputState>());
        step_frame(world, schedule, frame.dt);
    }
}

/// Snapshot of the world state at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: f32,
    pub player_position: Option<Vector2>,
    pub player_state: Option<PlayerState>,
    pub bullets: usize,
    pub live_enemies: usize,
    pub dead_enemies: usize,
}

pub fn summarize(world: &mut World) -> RunSummary {
    let time = *world.resource::<WorldTime>();
    let mut summary = RunSummary {
        frames: time.frame_count,
        elapsed: time.elapsed,
        player_position: None,
        player_state: None,
        bullets: 0,
        live_enemies: 0,
        dead_enemies: 0,
    };
    let mut query = world.query::<&GameObject>();
    for obj in query.iter(world) {
        match &obj.kind {
            ObjectKind::Player(data) => {
                summary.player_position = Some(obj.position);
                summary.player_state = Some(data.state);
            }
            ObjectKind::Enemy(data) if data.state == EnemyState::Dead => summary.dead_enemies += 1,
            ObjectKind::Enemy(_) => summary.live_enemies += 1,
            ObjectKind::Bullet(_) => summary.bullets += 1,
            ObjectKind::Level => {}
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_indices_match_tables() {
        let player = player_animations();
        assert_eq!(player.len(), anim::PLAYER_JUMP + 1);
        assert_eq!(player[anim::PLAYER_IDLE].frame_count(), 8);
        assert_eq!(player[anim::PLAYER_RUN].frame_count(), 4);
        let enemy = enemy_animations();
        assert_eq!(enemy[anim::ENEMY_DIE].frame_count(), 18);
        assert_eq!(enemy[anim::ENEMY_DIE].length(), 2.0);
        assert_eq!(bullet_animations().len(), anim::BULLET_HIT + 1);
    }

    #[test]
    fn test_prototypes_use_config() {
        let config = GameConfig::new();
        let player = player_object(Vector2::zero(), &config);
        assert!(player.dynamic);
        assert_eq!(player.max_speed_x, config.player_max_speed);
        assert_eq!(player.current_animation, Some(anim::PLAYER_IDLE));

        let enemy = enemy_object(Vector2::zero(), &config);
        assert_eq!(enemy.enemy().unwrap().health, config.enemy_health);
        assert_eq!(enemy.max_speed_x, config.enemy_max_speed);
    }

    #[test]
    fn test_spawn_default_level() {
        let mut world = World::new();
        let level = LevelGrid::default_level();
        let player = setup_world(&mut world, GameConfig::new(), &level).unwrap();
        let obj = world.get::<GameObject>(player).unwrap();
        // Row 8, column 1 with 32 px tiles.
        assert_eq!(obj.position, Vector2::new(32.0, 256.0));

        let summary = summarize(&mut world);
        assert_eq!(summary.live_enemies, 4);
        assert_eq!(summary.bullets, 0);
        assert_eq!(summary.player_state, Some(PlayerState::Idle));
    }

    #[test]
    fn test_invalid_level_spawns_nothing() {
        let mut world = World::new();
        let level = LevelGrid {
            tile_size: 32,
            rows: vec![vec![1, 1]],
        };
        let err = setup_world(&mut world, GameConfig::new(), &level).unwrap_err();
        assert!(matches!(err, LevelError::PlayerSpawnCount(0)));
        let mut query = world.query::<&GameObject>();
        assert_eq!(query.iter(&world).count(), 0);
    }

    #[test]
    fn test_decorations_do_not_collide() {
        let mut world = World::new();
        let level = LevelGrid {
            tile_size: 32,
            rows: vec![vec![4, 5, 6], vec![1, 1, 1]],
        };
        spawn_level(&mut world, &level, &GameConfig::new()).unwrap();
        let mut query = world.query::<(&GameObject, &Layer)>();
        for (obj, layer) in query.iter(&world) {
            match layer {
                Layer::Foreground | Layer::Background => assert!(!obj.has_collider()),
                _ => assert!(obj.has_collider()),
            }
        }
    }
}
