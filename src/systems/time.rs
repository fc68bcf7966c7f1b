//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. A scaled delta
/// that is negative or not finite is clamped to zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let mut scaled_dt = dt * wt.time_scale;
    if !(scaled_dt.is_finite() && scaled_dt > 0.0) {
        scaled_dt = 0.0;
    }
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_world_time_scales_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 0.25);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, 0.125);
        assert_eq!(wt.elapsed, 0.125);
        assert_eq!(wt.frame_count, 1);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, -1.0);
        assert_eq!(world.resource::<WorldTime>().delta, 0.0);
    }

    #[test]
    fn test_bad_time_scale_never_yields_negative_delta() {
        for scale in [-2.0, f32::NAN, f32::INFINITY] {
            let mut world = World::new();
            world.insert_resource(WorldTime::default().with_time_scale(scale));
            update_world_time(&mut world, 0.25);
            let wt = world.resource::<WorldTime>();
            assert_eq!(wt.delta, 0.0);
            assert_eq!(wt.elapsed, 0.0);
        }
    }
}
