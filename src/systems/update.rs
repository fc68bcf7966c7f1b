//! The per-frame object update pass.
//!
//! Objects are updated one at a time in a fixed order (layer, then entity),
//! and each one sees the positions the objects before it already committed
//! this frame. For each object:
//!
//! 1. kind-specific step (state machine, forces, integration)
//! 2. collision against the rest of the collision set, responding per pair
//! 3. ground sensing, with landing reported to the player
//!
//! Bullets fired during the pass are spawned and retired bullets despawned
//! through [`Commands`], so the set of objects being iterated never changes
//! mid-pass.

use bevy_ecs::prelude::*;
use raylib::prelude::{Rectangle, Vector2};

use crate::components::gameobject::{GameObject, GroundEdge, ObjectKind};
use crate::components::layer::Layer;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{self, ColliderSnapshot, Hit};
use crate::systems::{bullet, enemy, player};

/// Read-only inputs shared by every object step in a frame.
pub struct StepContext<'a> {
    pub dt: f32,
    pub input: &'a InputState,
    pub config: &'a GameConfig,
    /// Player position at the moment this object is updated.
    pub player_position: Option<Vector2>,
    /// Camera view in world space.
    pub view: Rectangle,
}

#[derive(Debug, Default)]
pub struct StepOutcome {
    pub spawned: Option<GameObject>,
    pub despawn: bool,
}

/// Step one object and resolve its collisions against `others`.
pub fn step_object(
    obj: &mut GameObject,
    others: &[ColliderSnapshot],
    ctx: &StepContext,
    rng: &mut SimRng,
    hits: &mut Vec<Hit>,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    match obj.kind {
        ObjectKind::Level => return outcome,
        ObjectKind::Player(_) => outcome.spawned = player::step_player(obj, ctx, rng),
        ObjectKind::Enemy(_) => enemy::step_enemy(obj, ctx),
        ObjectKind::Bullet(_) => {
            if bullet::is_inactive(obj) {
                outcome.despawn = true;
                return outcome;
            }
            bullet::step_bullet(obj, ctx);
        }
    }

    if collision::collide_with_all(obj, others, ctx.config, hits) == GroundEdge::Landed {
        player::on_landed(obj);
    }
    outcome.despawn = bullet::is_inactive(obj);
    outcome
}

/// Update every simulated object once, in layer then entity order.
#[allow(clippy::too_many_arguments)]
pub fn object_update(
    mut commands: Commands,
    mut objects: Query<(Entity, &mut GameObject, &Layer)>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    camera: Res<Camera2DRes>,
    screen: Res<ScreenSize>,
    mut rng: ResMut<SimRng>,
    mut order: Local<Vec<(Layer, Entity)>>,
    mut others: Local<Vec<ColliderSnapshot>>,
    mut hits: Local<Vec<Hit>>,
) {
    let view = camera.view_rect(*screen);

    order.clear();
    order.extend(
        objects
            .iter()
            .filter(|(_, obj, layer)| layer.is_simulated() && obj.kind != ObjectKind::Level)
            .map(|(entity, _, layer)| (*layer, entity)),
    );
    order.sort();

    for &(_, entity) in order.iter() {
        others.clear();
        let mut player_position = None;
        for (other, obj, layer) in objects.iter() {
            if obj.player().is_some() {
                player_position = Some(obj.position);
            }
            if other != entity && layer.in_collision_set() && obj.has_collider() {
                others.push(ColliderSnapshot::of(other, obj));
            }
        }

        let ctx = StepContext {
            dt: time.delta,
            input: &input,
            config: &config,
            player_position,
            view,
        };

        let outcome = {
            let Ok((_, mut obj, _)) = objects.get_mut(entity) else {
                continue;
            };
            step_object(&mut obj, &others, &ctx, &mut rng, &mut hits)
        };

        if let Some(bullet) = outcome.spawned {
            commands.spawn((bullet, Layer::Bullets));
        }
        if outcome.despawn {
            commands.entity(entity).despawn();
        }

        for hit in hits.drain(..) {
            match hit {
                Hit::Damage {
                    target,
                    direction,
                    amount,
                } => {
                    if let Ok((_, mut target_obj, _)) = objects.get_mut(target) {
                        enemy::take_hit(&mut target_obj, direction, amount);
                    }
                }
            }
        }
    }
}
