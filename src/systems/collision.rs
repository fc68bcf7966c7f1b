//! Axis-aligned collision detection and response.
//!
//! Each moving object is tested against every object of the collision set
//! (level tiles and characters) after its position has been integrated. This
//! is an all-pairs O(n²) scan per frame; fine for a few hundred tiles, and a
//! spatial grid keyed by tile size is the natural broad phase once levels grow
//! past that.
//!
//! Resolution is discrete: overlaps are detected at the end of a step and
//! undone along one axis. A fast object can pass through an obstacle thinner
//! than its per-frame displacement.

use bevy_ecs::prelude::Entity;
use raylib::prelude::Rectangle;

use crate::components::gameobject::{
    BulletState, GameObject, GroundEdge, ObjectKind, ObjectType,
};
use crate::resources::gameconfig::GameConfig;
use crate::systems::bullet;

/// Intersection of two rectangles, if both its width and height are positive.
///
/// Touching edges do not overlap, and the result is independent of argument
/// order.
pub fn overlap(a: &Rectangle, b: &Rectangle) -> Option<Rectangle> {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = (a.x + a.width).min(b.x + b.width);
    let bottom = (a.y + a.height).min(b.y + b.height);
    let width = right - left;
    let height = bottom - top;
    if width > 0.0 && height > 0.0 {
        Some(Rectangle::new(left, top, width, height))
    } else {
        None
    }
}

/// What the moving object sees of another object this frame.
#[derive(Debug, Clone, Copy)]
pub struct ColliderSnapshot {
    pub entity: Entity,
    pub object_type: ObjectType,
    /// Collider in world space.
    pub rect: Rectangle,
    pub live_enemy: bool,
}

impl ColliderSnapshot {
    pub fn of(entity: Entity, obj: &GameObject) -> Self {
        Self {
            entity,
            object_type: obj.object_type(),
            rect: obj.world_collider(),
            live_enemy: obj.is_live_enemy(),
        }
    }

    /// Whether standing on this object counts as being on the ground.
    pub fn supports(&self) -> bool {
        self.object_type == ObjectType::Level || self.live_enemy
    }
}

/// Effect of a collision on the *other* object, applied once the moving
/// object's own update is finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Damage {
        target: Entity,
        /// Facing of the bullet that hit.
        direction: f32,
        amount: i32,
    },
}

/// Push `obj` out of an overlap along the axis of least penetration.
///
/// A narrow intersection (width < height) is a side hit and is undone along X,
/// otherwise along Y. The push goes against the object's velocity on that
/// axis, and that velocity component is zeroed. With no velocity on that axis
/// the object is pushed away from the side the intersection lies on.
pub fn resolve(obj: &mut GameObject, intersection: &Rectangle) {
    let collider = obj.world_collider();
    if intersection.width < intersection.height {
        let away = collider.x + collider.width * 0.5 - (intersection.x + intersection.width * 0.5);
        obj.position.x -= push_sign(obj.velocity.x, away) * intersection.width;
        obj.velocity.x = 0.0;
    } else {
        let away = collider.y + collider.height * 0.5 - (intersection.y + intersection.height * 0.5);
        obj.position.y -= push_sign(obj.velocity.y, away) * intersection.height;
        obj.velocity.y = 0.0;
    }
}

/// Direction the object moved into the overlap: its velocity if any,
/// otherwise towards the intersection (`away` points from it to the object).
fn push_sign(velocity: f32, away: f32) -> f32 {
    if velocity != 0.0 {
        velocity.signum()
    } else if away != 0.0 {
        -away.signum()
    } else {
        0.0
    }
}

/// React to one overlap according to the kinds of both objects.
pub fn respond(
    obj: &mut GameObject,
    other: &ColliderSnapshot,
    intersection: &Rectangle,
    config: &GameConfig,
) -> Option<Hit> {
    match obj.kind {
        ObjectKind::Player(_) => {
            match other.object_type {
                ObjectType::Level => resolve(obj, intersection),
                ObjectType::Enemy if other.live_enemy => {
                    obj.velocity.x = -obj.direction * config.knockback_speed;
                    obj.velocity.y = 0.0;
                }
                _ => {}
            }
            None
        }
        ObjectKind::Enemy(_) => {
            resolve(obj, intersection);
            None
        }
        ObjectKind::Bullet(data) => {
            if data.state != BulletState::Moving {
                return None;
            }
            let hit = match other.object_type {
                ObjectType::Level => None,
                ObjectType::Enemy if other.live_enemy => Some(Hit::Damage {
                    target: other.entity,
                    direction: obj.direction,
                    amount: config.bullet_damage,
                }),
                // Dead enemies, players and other bullets are passed through.
                _ => return None,
            };
            resolve(obj, intersection);
            bullet::begin_impact(obj);
            hit
        }
        ObjectKind::Level => None,
    }
}

/// True if the one-pixel probe under `obj`'s collider touches a supporting object.
pub fn sense_ground(obj: &GameObject, others: &[ColliderSnapshot]) -> bool {
    if !obj.has_collider() {
        return false;
    }
    let probe = obj.collider.ground_probe(obj.position);
    others
        .iter()
        .filter(|other| other.supports())
        .any(|other| overlap(&probe, &other.rect).is_some())
}

/// Test `obj` against every snapshot in order, responding to each overlap,
/// then refresh its ground contact.
///
/// Every response moves only `obj`, and later tests see the corrected
/// position. Effects on other objects are appended to `hits`.
pub fn collide_with_all(
    obj: &mut GameObject,
    others: &[ColliderSnapshot],
    config: &GameConfig,
    hits: &mut Vec<Hit>,
) -> GroundEdge {
    if obj.has_collider() {
        for other in others {
            let rect = obj.world_collider();
            if let Some(intersection) = overlap(&rect, &other.rect) {
                if let Some(hit) = respond(obj, other, &intersection, config) {
                    hits.push(hit);
                }
            }
        }
    }
    let grounded = sense_ground(obj, others);
    obj.set_grounded(grounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::BoxCollider;
    use crate::components::gameobject::{BulletData, EnemyData, EnemyState, PlayerData};
    use bevy_ecs::world::World;
    use raylib::prelude::Vector2;

    fn entity() -> Entity {
        World::new().spawn_empty().id()
    }

    fn tile_at(x: f32, y: f32) -> ColliderSnapshot {
        ColliderSnapshot {
            entity: entity(),
            object_type: ObjectType::Level,
            rect: Rectangle::new(x, y, 32.0, 32.0),
            live_enemy: false,
        }
    }

    fn player_at(x: f32, y: f32) -> GameObject {
        let mut obj = GameObject::new(ObjectKind::Player(PlayerData::new(0.8)))
            .with_position(Vector2 { x, y })
            .with_collider(BoxCollider::new(10.0, 26.0).with_offset(Vector2 { x: 11.0, y: 6.0 }));
        obj.dynamic = true;
        obj
    }

    fn bullet_at(x: f32, y: f32, vx: f32) -> GameObject {
        let mut obj = GameObject::new(ObjectKind::Bullet(BulletData::default()))
            .with_position(Vector2 { x, y })
            .with_collider(BoxCollider::new(8.0, 8.0));
        obj.velocity.x = vx;
        obj
    }

    #[test]
    fn test_overlap_returns_intersection() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(6.0, 2.0, 10.0, 4.0);
        assert_eq!(overlap(&a, &b), Some(Rectangle::new(6.0, 2.0, 4.0, 4.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(overlap(&a, &b), None);
        let c = Rectangle::new(0.0, 10.0, 10.0, 10.0);
        assert_eq!(overlap(&a, &c), None);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let rects = [
            Rectangle::new(0.0, 0.0, 10.0, 10.0),
            Rectangle::new(5.5, -3.0, 2.0, 20.0),
            Rectangle::new(-4.0, 8.0, 30.0, 1.5),
            Rectangle::new(100.0, 100.0, 1.0, 1.0),
            Rectangle::new(2.0, 2.0, 3.0, 3.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(overlap(a, b), overlap(b, a));
            }
        }
    }

    #[test]
    fn test_resolve_horizontal_pushes_against_travel() {
        let mut obj = player_at(100.0, 0.0);
        obj.velocity.x = 100.0;
        resolve(&mut obj, &Rectangle::new(0.0, 0.0, 2.0, 20.0));
        assert_eq!(obj.position.x, 98.0);
        assert_eq!(obj.velocity.x, 0.0);

        obj.velocity.x = -50.0;
        resolve(&mut obj, &Rectangle::new(0.0, 0.0, 2.0, 20.0));
        assert_eq!(obj.position.x, 100.0);
    }

    #[test]
    fn test_resolve_vertical_when_wide() {
        let mut obj = player_at(0.0, 50.0);
        obj.velocity = Vector2 { x: 20.0, y: 80.0 };
        resolve(&mut obj, &Rectangle::new(0.0, 0.0, 10.0, 0.5));
        assert_eq!(obj.position.y, 49.5);
        assert_eq!(obj.velocity.y, 0.0);
        assert_eq!(obj.velocity.x, 20.0);
    }

    #[test]
    fn test_resolution_eliminates_overlap() {
        let tile = tile_at(64.0, 96.0);
        let config = GameConfig::new();

        // Landing on top.
        let mut obj = player_at(60.0, 64.5);
        obj.velocity.y = 100.0;
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[tile], &config, &mut hits);
        assert_eq!(overlap(&obj.world_collider(), &tile.rect), None);

        // Walking into the side.
        let mut obj = player_at(43.5, 80.0);
        obj.velocity.x = 100.0;
        collide_with_all(&mut obj, &[tile], &config, &mut hits);
        assert_eq!(overlap(&obj.world_collider(), &tile.rect), None);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_corner_clip_without_sideways_speed_is_pushed_out() {
        // Falling straight down: collider x 111..121, y 77..103 clips the
        // tile's top-left corner by 1 x 3 px.
        let tile = tile_at(120.0, 100.0);
        let mut obj = player_at(100.0, 71.0);
        obj.velocity = Vector2 { x: 0.0, y: 180.0 };
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[tile], &GameConfig::new(), &mut hits);

        assert_eq!(overlap(&obj.world_collider(), &tile.rect), None);
        assert_eq!(obj.position.x, 99.0);
        assert_eq!(obj.velocity.y, 180.0);
        assert!(!sense_ground(&obj, &[tile]));
    }

    #[test]
    fn test_resolve_at_rest_pushes_away_from_overlap() {
        // Intersection on the collider's bottom edge pushes up.
        let mut obj = player_at(0.0, 50.0);
        let collider = obj.world_collider();
        let bottom = collider.y + collider.height;
        resolve(&mut obj, &Rectangle::new(collider.x, bottom - 2.0, collider.width, 2.0));
        assert_eq!(obj.position.y, 48.0);
    }

    #[test]
    fn test_side_collision_scenario() {
        // Collider spans x 111..121; tile starts at 120: 1 px wide, 26 px tall.
        let tile = tile_at(120.0, 56.0);
        let mut obj = player_at(100.0, 50.0);
        obj.velocity.x = 100.0;
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[tile], &GameConfig::new(), &mut hits);
        assert_eq!(obj.velocity.x, 0.0);
        assert_eq!(obj.position.x, 99.0);
    }

    #[test]
    fn test_grounded_when_resting_on_tile() {
        // Collider bottom = 64 + 6 + 26 = 96 = tile top.
        let tile = tile_at(64.0, 96.0);
        let obj = player_at(60.0, 64.0);
        assert!(sense_ground(&obj, &[tile]));

        let lifted = player_at(60.0, 62.0);
        assert!(!sense_ground(&lifted, &[tile]));
    }

    #[test]
    fn test_landing_edge_reported_once() {
        let tile = tile_at(64.0, 96.0);
        let mut obj = player_at(60.0, 64.0);
        let mut hits = Vec::new();
        let config = GameConfig::new();
        assert_eq!(
            collide_with_all(&mut obj, &[tile], &config, &mut hits),
            GroundEdge::Landed
        );
        assert_eq!(
            collide_with_all(&mut obj, &[tile], &config, &mut hits),
            GroundEdge::Unchanged
        );
        obj.position.y -= 10.0;
        assert_eq!(
            collide_with_all(&mut obj, &[tile], &config, &mut hits),
            GroundEdge::LeftGround
        );
    }

    #[test]
    fn test_player_knocked_back_by_live_enemy() {
        let mut obj = player_at(0.0, 0.0);
        obj.velocity.x = 80.0;
        let enemy = ColliderSnapshot {
            entity: entity(),
            object_type: ObjectType::Enemy,
            rect: Rectangle::new(18.0, 0.0, 12.0, 32.0),
            live_enemy: true,
        };
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[enemy], &GameConfig::new(), &mut hits);
        assert_eq!(obj.velocity.x, -100.0);

        let mut obj = player_at(0.0, 0.0);
        obj.velocity.x = 80.0;
        let dead = ColliderSnapshot {
            live_enemy: false,
            ..enemy
        };
        collide_with_all(&mut obj, &[dead], &GameConfig::new(), &mut hits);
        assert_eq!(obj.velocity.x, 80.0);
    }

    #[test]
    fn test_bullet_hitting_enemy_reports_damage() {
        let target = entity();
        let enemy = ColliderSnapshot {
            entity: target,
            object_type: ObjectType::Enemy,
            rect: Rectangle::new(6.0, 0.0, 12.0, 28.0),
            live_enemy: true,
        };
        let mut obj = bullet_at(0.0, 4.0, 600.0);
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[enemy], &GameConfig::new(), &mut hits);
        assert_eq!(
            hits,
            vec![Hit::Damage {
                target,
                direction: 1.0,
                amount: 10
            }]
        );
        assert_eq!(obj.bullet().unwrap().state, BulletState::Colliding);
        assert_eq!(obj.velocity, Vector2::zero());
    }

    #[test]
    fn test_bullet_stops_on_level_without_hit() {
        let mut obj = bullet_at(28.0, 4.0, 600.0);
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[tile_at(32.0, 0.0)], &GameConfig::new(), &mut hits);
        assert!(hits.is_empty());
        assert_eq!(obj.bullet().unwrap().state, BulletState::Colliding);
    }

    #[test]
    fn test_bullet_passes_through_player_and_dead_enemy() {
        let player = ColliderSnapshot {
            entity: entity(),
            object_type: ObjectType::Player,
            rect: Rectangle::new(0.0, 0.0, 32.0, 32.0),
            live_enemy: false,
        };
        let dead = ColliderSnapshot {
            object_type: ObjectType::Enemy,
            ..player
        };
        let mut obj = bullet_at(4.0, 4.0, 600.0);
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[player, dead], &GameConfig::new(), &mut hits);
        assert!(hits.is_empty());
        assert_eq!(obj.bullet().unwrap().state, BulletState::Moving);
        assert_eq!(obj.velocity.x, 600.0);
    }

    #[test]
    fn test_enemy_blocked_by_everything() {
        let mut enemy = GameObject::new(ObjectKind::Enemy(EnemyData::new(20, 0.5)))
            .with_position(Vector2 { x: 0.0, y: 0.0 })
            .with_collider(BoxCollider::new(12.0, 28.0).with_offset(Vector2 { x: 10.0, y: 4.0 }));
        enemy.velocity.x = 15.0;
        let player = ColliderSnapshot {
            entity: entity(),
            object_type: ObjectType::Player,
            rect: Rectangle::new(21.0, 0.0, 10.0, 26.0),
            live_enemy: false,
        };
        let mut hits = Vec::new();
        collide_with_all(&mut enemy, &[player], &GameConfig::new(), &mut hits);
        assert_eq!(enemy.position.x, -1.0);
        assert_eq!(enemy.velocity.x, 0.0);
        assert_eq!(enemy.enemy().unwrap().state, EnemyState::Idle);
    }

    #[test]
    fn test_object_without_collider_is_never_grounded() {
        let mut obj = GameObject::new(ObjectKind::Level);
        let mut hits = Vec::new();
        collide_with_all(&mut obj, &[tile_at(0.0, 0.0)], &GameConfig::new(), &mut hits);
        assert!(!obj.grounded);
    }
}
