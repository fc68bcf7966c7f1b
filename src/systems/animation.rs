//! Animation system.
//!
//! Runs after the update pass. For every object it:
//! - advances the active animation by the frame delta,
//! - counts down the hit flash and clears it on timeout,
//! - settles one-shot animations that just finished (a dead enemy freezes on
//!   its last frame, a bullet whose hit animation ended is retired).
//!
//! Settling happens here, right after the step that completed the cycle, so
//! the wrapped first frame of a finished strip is never drawn.

use bevy_ecs::prelude::*;

use crate::components::gameobject::{BulletState, GameObject, ObjectKind};
use crate::resources::worldtime::WorldTime;
use crate::systems::enemy;

pub fn animation(mut query: Query<&mut GameObject>, time: Res<WorldTime>) {
    let dt = time.delta;
    for mut obj in query.iter_mut() {
        if let Some(anim) = obj.active_animation_mut() {
            anim.step(dt);
        }
        if obj.flash && obj.flash_timer.step(dt) > 0 {
            obj.flash = false;
        }
        enemy::settle_death(&mut obj);
        retire_finished_bullet(&mut obj);
    }
}

fn retire_finished_bullet(obj: &mut GameObject) {
    let done = obj.active_animation().is_some_and(|a| a.is_done());
    if let ObjectKind::Bullet(data) = &mut obj.kind {
        if data.state == BulletState::Colliding && done {
            data.state = BulletState::Inactive;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::gameobject::BulletData;
    use crate::systems::bullet;

    fn run(world: &mut World, dt: f32) {
        world.resource_mut::<WorldTime>().delta = dt;
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(world);
    }

    #[test]
    fn test_animation_advances_with_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let obj = GameObject::new(ObjectKind::Level).with_animations(vec![Animation::new(4, 1.0)], 0);
        let e = world.spawn(obj).id();
        run(&mut world, 0.5);
        assert_eq!(world.get::<GameObject>(e).unwrap().frame(), 2);
    }

    #[test]
    fn test_flash_clears_after_timeout() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let mut obj = GameObject::new(ObjectKind::Level);
        obj.start_flash();
        let e = world.spawn(obj).id();
        run(&mut world, 0.02);
        assert!(world.get::<GameObject>(e).unwrap().flash);
        run(&mut world, 0.04);
        assert!(!world.get::<GameObject>(e).unwrap().flash);
    }

    #[test]
    fn test_finished_hit_animation_retires_bullet() {
        let mut obj = GameObject::new(ObjectKind::Bullet(BulletData::default()))
            .with_animations(vec![Animation::new(4, 0.05), Animation::new(4, 0.15)], 0);
        bullet::begin_impact(&mut obj);

        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let e = world.spawn(obj).id();
        run(&mut world, 0.1);
        assert_eq!(
            world.get::<GameObject>(e).unwrap().bullet().unwrap().state,
            BulletState::Colliding
        );
        run(&mut world, 0.1);
        assert!(bullet::is_inactive(world.get::<GameObject>(e).unwrap()));
    }
}
