//! Seeded random source for gameplay variation.
//!
//! All randomness in the update pass (bullet spread) is drawn from this
//! resource so a run is reproducible from its seed, inputs and deltas.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub Rng);

impl SimRng {
    pub fn with_seed(seed: u64) -> Self {
        SimRng(Rng::with_seed(seed))
    }

    /// Uniform value in `[-spread / 2, spread / 2)`.
    pub fn centered(&mut self, spread: f32) -> f32 {
        if spread <= 0.0 {
            return 0.0;
        }
        self.0.f32() * spread - spread * 0.5
    }
}
