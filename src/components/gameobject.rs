//! The universal simulated entity.
//!
//! Every player, enemy, bullet and level tile is a [`GameObject`]: shared
//! kinematic state (position, velocity, acceleration, facing, collider),
//! animation state, and a kind-specific payload carried by [`ObjectKind`].
//! Only the payload of the object's own kind exists, and code that needs it
//! matches on the kind instead of downcasting by a type tag.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};

use super::animation::Animation;
use super::boxcollider::BoxCollider;
use super::timer::Timer;

/// Seconds an object stays tinted after being hit.
pub const FLASH_DURATION: f32 = 0.05;

/// Plain type tag, derived from [`ObjectKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Player,
    Level,
    Enemy,
    Bullet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Walking,
    /// Declared for a run mode; no transition enters it yet.
    Running,
    Jumping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Idle,
    Walking,
    Damaged,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletState {
    Moving,
    Colliding,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerData {
    pub state: PlayerState,
    /// Cooldown between shots. Starts timed out so the first shot is immediate.
    pub weapon_timer: Timer,
}

impl PlayerData {
    pub fn new(weapon_cooldown: f32) -> Self {
        Self {
            state: PlayerState::Idle,
            weapon_timer: Timer::expired(weapon_cooldown),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyData {
    pub state: EnemyState,
    pub damaged_timer: Timer,
    pub health: i32,
}

impl EnemyData {
    pub fn new(health: i32, damaged_time: f32) -> Self {
        Self {
            state: EnemyState::Idle,
            damaged_timer: Timer::new(damaged_time),
            health,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletData {
    pub state: BulletState,
}

impl Default for BulletData {
    fn default() -> Self {
        Self {
            state: BulletState::Moving,
        }
    }
}

/// Kind of object together with the payload only that kind needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectKind {
    Player(PlayerData),
    Level,
    Enemy(EnemyData),
    Bullet(BulletData),
}

impl ObjectKind {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectKind::Player(_) => ObjectType::Player,
            ObjectKind::Level => ObjectType::Level,
            ObjectKind::Enemy(_) => ObjectType::Enemy,
            ObjectKind::Bullet(_) => ObjectType::Bullet,
        }
    }
}

/// Change of the grounded flag between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundEdge {
    Unchanged,
    Landed,
    LeftGround,
}

#[derive(Component, Debug, Clone)]
pub struct GameObject {
    pub kind: ObjectKind,
    /// Top-left corner of the sprite in world pixels.
    pub position: Vector2,
    /// Pixels per second.
    pub velocity: Vector2,
    /// Pixels per second squared, applied along the drive direction.
    pub acceleration: Vector2,
    /// Horizontal facing, 1 right and -1 left.
    pub direction: f32,
    pub max_speed_x: f32,
    pub collider: BoxCollider,
    /// Affected by gravity.
    pub dynamic: bool,
    pub grounded: bool,
    pub animations: Vec<Animation>,
    pub current_animation: Option<usize>,
    /// Texture key looked up by the renderer; `None` draws nothing.
    pub texture: Option<&'static str>,
    /// Size of one sprite-sheet frame and of the drawn sprite.
    pub sprite_size: Vector2,
    /// Frame shown when no animation is active.
    pub sprite_frame: usize,
    pub flash: bool,
    pub flash_timer: Timer,
}

impl GameObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            position: Vector2::zero(),
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            direction: 1.0,
            max_speed_x: 0.0,
            collider: BoxCollider::default(),
            dynamic: false,
            grounded: false,
            animations: Vec::new(),
            current_animation: None,
            texture: None,
            sprite_size: Vector2::zero(),
            sprite_frame: 0,
            flash: false,
            flash_timer: Timer::new(FLASH_DURATION),
        }
    }

    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    pub fn with_collider(mut self, collider: BoxCollider) -> Self {
        self.collider = collider;
        self
    }

    pub fn with_texture(mut self, texture: &'static str, sprite_size: Vector2) -> Self {
        self.texture = Some(texture);
        self.sprite_size = sprite_size;
        self
    }

    pub fn with_animations(mut self, animations: Vec<Animation>, current: usize) -> Self {
        self.animations = animations;
        self.set_animation(Some(current));
        self
    }

    pub fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    /// Collider rectangle in world space.
    pub fn world_collider(&self) -> Rectangle {
        self.collider.rect(self.position)
    }

    pub fn has_collider(&self) -> bool {
        !self.collider.is_empty()
    }

    /// Select the active animation. An index outside `animations` is treated
    /// as no animation.
    pub fn set_animation(&mut self, index: Option<usize>) {
        self.current_animation = index.filter(|i| *i < self.animations.len());
        if index.is_some() && self.current_animation.is_none() {
            log::warn!(
                "animation index {:?} out of range ({} animations), clearing",
                index,
                self.animations.len()
            );
        }
    }

    /// Select an animation and restart it from its first frame.
    pub fn play_from_start(&mut self, index: usize) {
        self.set_animation(Some(index));
        if let Some(anim) = self.active_animation_mut() {
            anim.reset();
        }
    }

    pub fn active_animation(&self) -> Option<&Animation> {
        self.current_animation.and_then(|i| self.animations.get(i))
    }

    pub fn active_animation_mut(&mut self) -> Option<&mut Animation> {
        self.current_animation.and_then(|i| self.animations.get_mut(i))
    }

    /// Sprite-sheet frame to draw this frame.
    pub fn frame(&self) -> usize {
        self.active_animation()
            .map(Animation::current_frame)
            .unwrap_or(self.sprite_frame)
    }

    /// Store this frame's ground contact and report the edge relative to the
    /// previous frame.
    pub fn set_grounded(&mut self, grounded: bool) -> GroundEdge {
        let was_grounded = self.grounded;
        self.grounded = grounded;
        match (was_grounded, grounded) {
            (false, true) => GroundEdge::Landed,
            (true, false) => GroundEdge::LeftGround,
            _ => GroundEdge::Unchanged,
        }
    }

    pub fn start_flash(&mut self) {
        self.flash = true;
        self.flash_timer.reset();
    }

    pub fn player(&self) -> Option<&PlayerData> {
        match &self.kind {
            ObjectKind::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn enemy(&self) -> Option<&EnemyData> {
        match &self.kind {
            ObjectKind::Enemy(data) => Some(data),
            _ => None,
        }
    }

    pub fn bullet(&self) -> Option<&BulletData> {
        match &self.kind {
            ObjectKind::Bullet(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_live_enemy(&self) -> bool {
        matches!(self.enemy(), Some(data) if data.state != EnemyState::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> GameObject {
        GameObject::new(ObjectKind::Player(PlayerData::new(0.8)))
    }

    #[test]
    fn test_new_object_defaults() {
        let obj = GameObject::new(ObjectKind::Level);
        assert_eq!(obj.object_type(), ObjectType::Level);
        assert_eq!(obj.direction, 1.0);
        assert!(!obj.dynamic);
        assert!(!obj.grounded);
        assert!(!obj.has_collider());
        assert!(obj.current_animation.is_none());
        assert_eq!(obj.frame(), 0);
    }

    #[test]
    fn test_out_of_range_animation_is_none() {
        let mut obj = player();
        obj.animations = vec![Animation::new(4, 1.0)];
        obj.set_animation(Some(3));
        assert!(obj.current_animation.is_none());
        assert!(obj.active_animation().is_none());
        obj.set_animation(Some(0));
        assert_eq!(obj.current_animation, Some(0));
    }

    #[test]
    fn test_stale_index_reads_as_no_animation() {
        let mut obj = player();
        obj.current_animation = Some(7);
        assert!(obj.active_animation().is_none());
        obj.sprite_frame = 2;
        assert_eq!(obj.frame(), 2);
    }

    #[test]
    fn test_frame_uses_active_animation() {
        let mut obj = player().with_animations(vec![Animation::new(4, 1.0)], 0);
        obj.active_animation_mut().unwrap().step(0.5);
        assert_eq!(obj.frame(), 2);
    }

    #[test]
    fn test_play_from_start_resets_timer() {
        let mut obj = player().with_animations(
            vec![Animation::new(4, 1.0), Animation::new(4, 0.25)],
            0,
        );
        obj.animations[1].step(0.3);
        obj.play_from_start(1);
        assert_eq!(obj.frame(), 0);
        assert!(!obj.active_animation().unwrap().is_done());
    }

    #[test]
    fn test_ground_edges() {
        let mut obj = player();
        assert_eq!(obj.set_grounded(true), GroundEdge::Landed);
        assert_eq!(obj.set_grounded(true), GroundEdge::Unchanged);
        assert_eq!(obj.set_grounded(false), GroundEdge::LeftGround);
        assert_eq!(obj.set_grounded(false), GroundEdge::Unchanged);
    }

    #[test]
    fn test_payload_accessors() {
        let obj = player();
        assert!(obj.player().is_some());
        assert!(obj.enemy().is_none());
        assert!(obj.bullet().is_none());

        let enemy = GameObject::new(ObjectKind::Enemy(EnemyData::new(20, 0.5)));
        assert!(enemy.is_live_enemy());
        let mut dead = enemy.clone();
        if let ObjectKind::Enemy(data) = &mut dead.kind {
            data.state = EnemyState::Dead;
        }
        assert!(!dead.is_live_enemy());
    }

    #[test]
    fn test_player_weapon_ready_at_spawn() {
        let obj = player();
        assert!(obj.player().unwrap().weapon_timer.is_timeout());
        assert_eq!(obj.player().unwrap().state, PlayerState::Idle);
    }
}
