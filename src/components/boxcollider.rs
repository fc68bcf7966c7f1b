use raylib::prelude::{Rectangle, Vector2};

/// Axis-aligned hitbox expressed in the owning object's local frame.
///
/// `offset` is relative to the object's position (its sprite's top-left
/// corner). A zero-area collider never collides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self {
            size: Vector2::zero(),
            offset: Vector2::zero(),
        }
    }
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Whether the collider encloses any area at all.
    pub fn is_empty(&self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }

    /// Returns (min, max) of the collider AABB for a given object position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }

    /// World-space rectangle of the collider translated by `position`.
    pub fn rect(&self, position: Vector2) -> Rectangle {
        let (min, max) = self.aabb(position);
        Rectangle::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// One-pixel-tall probe directly below the collider, used to sense ground.
    pub fn ground_probe(&self, position: Vector2) -> Rectangle {
        let r = self.rect(position);
        Rectangle::new(r.x, r.y + r.height, r.width, 1.0)
    }
}
