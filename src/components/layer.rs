use bevy_ecs::prelude::Component;

/// Draw and update layer of an object.
///
/// Variants are declared in draw order. Level and Characters form the
/// collision set; bullets collide against it without being part of it, and
/// the decorative layers neither collide nor update.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Level,
    Characters,
    Bullets,
    Foreground,
}

impl Layer {
    /// Objects on this layer are obstacles for everything that collides.
    pub fn in_collision_set(self) -> bool {
        matches!(self, Layer::Level | Layer::Characters)
    }

    /// Objects on this layer take part in the per-frame update pass.
    pub fn is_simulated(self) -> bool {
        matches!(self, Layer::Level | Layer::Characters | Layer::Bullets)
    }
}
