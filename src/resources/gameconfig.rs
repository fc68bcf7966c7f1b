//! Game configuration resource.
//!
//! Manages window settings and gameplay tuning loaded from an INI
//! configuration file. Every value has a default; keys missing from the file
//! keep their default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 320
//!
//! [window]
//! width = 1280
//! height = 640
//! fullscreen = false
//! vsync = true
//! target_fps = 120
//!
//! [physics]
//! gravity = 500
//!
//! [player]
//! acceleration = 300
//! max_speed = 100
//! jump_impulse = -200
//! weapon_cooldown = 0.8
//! muzzle_speed = 600
//! knockback_speed = 100
//!
//! [enemy]
//! acceleration = 30
//! max_speed = 15
//! aggro_range = 100
//! health = 20
//! damaged_time = 0.5
//!
//! [bullet]
//! damage = 10
//! spread = 40
//! max_speed = 1000
//! despawn_margin = 32
//!
//! [simulation]
//! seed = 24601
//! time_scale = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 320;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 640;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

const DEFAULT_GRAVITY: f32 = 500.0;

const DEFAULT_PLAYER_ACCELERATION: f32 = 300.0;
const DEFAULT_PLAYER_MAX_SPEED: f32 = 100.0;
const DEFAULT_JUMP_IMPULSE: f32 = -200.0;
const DEFAULT_WEAPON_COOLDOWN: f32 = 0.8;
const DEFAULT_MUZZLE_SPEED: f32 = 600.0;
const DEFAULT_KNOCKBACK_SPEED: f32 = 100.0;

const DEFAULT_ENEMY_ACCELERATION: f32 = 30.0;
const DEFAULT_ENEMY_MAX_SPEED: f32 = 15.0;
const DEFAULT_ENEMY_AGGRO_RANGE: f32 = 100.0;
const DEFAULT_ENEMY_HEALTH: i32 = 20;
const DEFAULT_ENEMY_DAMAGED_TIME: f32 = 0.5;

const DEFAULT_BULLET_DAMAGE: i32 = 10;
const DEFAULT_BULLET_SPREAD: f32 = 40.0;
const DEFAULT_BULLET_MAX_SPEED: f32 = 1000.0;
const DEFAULT_DESPAWN_MARGIN: f32 = 32.0;

const DEFAULT_SEED: u64 = 24601;
const DEFAULT_TIME_SCALE: f32 = 1.0;

/// Game configuration resource.
///
/// Window fields are read once by the binary at startup; gameplay fields are
/// read every frame by the update systems.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Logical render width in pixels (the camera's view width).
    pub render_width: u32,
    /// Logical render height in pixels.
    pub render_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,

    /// Downward acceleration applied to airborne dynamic objects, px/s².
    pub gravity: f32,

    pub player_acceleration: f32,
    pub player_max_speed: f32,
    /// Vertical velocity added on jump; negative is up.
    pub jump_impulse: f32,
    pub weapon_cooldown: f32,
    pub muzzle_speed: f32,
    pub knockback_speed: f32,

    pub enemy_acceleration: f32,
    pub enemy_max_speed: f32,
    /// Distance at which enemies start walking toward the player.
    pub enemy_aggro_range: f32,
    pub enemy_health: i32,
    pub enemy_damaged_time: f32,

    pub bullet_damage: i32,
    /// Total width of the random vertical velocity spread of a shot.
    pub bullet_spread: f32,
    pub bullet_max_speed: f32,
    /// Distance outside the camera view after which a bullet is dropped.
    pub despawn_margin: f32,

    pub seed: u64,
    pub time_scale: f32,

    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            gravity: DEFAULT_GRAVITY,
            player_acceleration: DEFAULT_PLAYER_ACCELERATION,
            player_max_speed: DEFAULT_PLAYER_MAX_SPEED,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
            weapon_cooldown: DEFAULT_WEAPON_COOLDOWN,
            muzzle_speed: DEFAULT_MUZZLE_SPEED,
            knockback_speed: DEFAULT_KNOCKBACK_SPEED,
            enemy_acceleration: DEFAULT_ENEMY_ACCELERATION,
            enemy_max_speed: DEFAULT_ENEMY_MAX_SPEED,
            enemy_aggro_range: DEFAULT_ENEMY_AGGRO_RANGE,
            enemy_health: DEFAULT_ENEMY_HEALTH,
            enemy_damaged_time: DEFAULT_ENEMY_DAMAGED_TIME,
            bullet_damage: DEFAULT_BULLET_DAMAGE,
            bullet_spread: DEFAULT_BULLET_SPREAD,
            bullet_max_speed: DEFAULT_BULLET_MAX_SPEED,
            despawn_margin: DEFAULT_DESPAWN_MARGIN,
            seed: DEFAULT_SEED,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, vsync={}, gravity={}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.gravity
        );

        Ok(())
    }

    /// Parse INI text and apply it over the current values.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let int = |section: &str, key: &str| config.getint(section, key).ok().flatten();
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };
        let boolean = |section: &str, key: &str| config.getbool(section, key).ok().flatten();

        // [render] section
        if let Some(width) = uint("render", "width") {
            self.render_width = width as u32;
        }
        if let Some(height) = uint("render", "height") {
            self.render_height = height as u32;
        }

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = boolean("window", "vsync") {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = boolean("window", "fullscreen") {
            self.fullscreen = fullscreen;
        }

        // [physics] section
        if let Some(gravity) = float("physics", "gravity") {
            self.gravity = gravity;
        }

        // [player] section
        if let Some(v) = float("player", "acceleration") {
            self.player_acceleration = v;
        }
        if let Some(v) = float("player", "max_speed") {
            self.player_max_speed = v;
        }
        if let Some(v) = float("player", "jump_impulse") {
            self.jump_impulse = v;
        }
        if let Some(v) = float("player", "weapon_cooldown") {
            self.weapon_cooldown = v;
        }
        if let Some(v) = float("player", "muzzle_speed") {
            self.muzzle_speed = v;
        }
        if let Some(v) = float("player", "knockback_speed") {
            self.knockback_speed = v;
        }

        // [enemy] section
        if let Some(v) = float("enemy", "acceleration") {
            self.enemy_acceleration = v;
        }
        if let Some(v) = float("enemy", "max_speed") {
            self.enemy_max_speed = v;
        }
        if let Some(v) = float("enemy", "aggro_range") {
            self.enemy_aggro_range = v;
        }
        if let Some(v) = int("enemy", "health") {
            self.enemy_health = v as i32;
        }
        if let Some(v) = float("enemy", "damaged_time") {
            self.enemy_damaged_time = v;
        }

        // [bullet] section
        if let Some(v) = int("bullet", "damage") {
            self.bullet_damage = v as i32;
        }
        if let Some(v) = float("bullet", "spread") {
            self.bullet_spread = v;
        }
        if let Some(v) = float("bullet", "max_speed") {
            self.bullet_max_speed = v;
        }
        if let Some(v) = float("bullet", "despawn_margin") {
            self.despawn_margin = v;
        }

        // [simulation] section
        if let Some(v) = uint("simulation", "seed") {
            self.seed = v;
        }
        if let Some(v) = float("simulation", "time_scale") {
            if v.is_finite() && v >= 0.0 {
                self.time_scale = v;
            } else {
                log::warn!("Ignoring invalid [simulation] time_scale = {}", v);
            }
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        config.set("physics", "gravity", Some(self.gravity.to_string()));

        config.set("player", "acceleration", Some(self.player_acceleration.to_string()));
        config.set("player", "max_speed", Some(self.player_max_speed.to_string()));
        config.set("player", "jump_impulse", Some(self.jump_impulse.to_string()));
        config.set("player", "weapon_cooldown", Some(self.weapon_cooldown.to_string()));
        config.set("player", "muzzle_speed", Some(self.muzzle_speed.to_string()));
        config.set("player", "knockback_speed", Some(self.knockback_speed.to_string()));

        config.set("enemy", "acceleration", Some(self.enemy_acceleration.to_string()));
        config.set("enemy", "max_speed", Some(self.enemy_max_speed.to_string()));
        config.set("enemy", "aggro_range", Some(self.enemy_aggro_range.to_string()));
        config.set("enemy", "health", Some(self.enemy_health.to_string()));
        config.set("enemy", "damaged_time", Some(self.enemy_damaged_time.to_string()));

        config.set("bullet", "damage", Some(self.bullet_damage.to_string()));
        config.set("bullet", "spread", Some(self.bullet_spread.to_string()));
        config.set("bullet", "max_speed", Some(self.bullet_max_speed.to_string()));
        config.set("bullet", "despawn_margin", Some(self.despawn_margin.to_string()));

        config.set("simulation", "seed", Some(self.seed.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.render_width, 640);
        assert_eq!(config.render_height, 320);
        assert_eq!(config.window_size(), (1280, 640));
        assert_eq!(config.gravity, 500.0);
        assert_eq!(config.jump_impulse, -200.0);
        assert_eq!(config.enemy_health, 20);
    }

    #[test]
    fn test_load_from_str_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[physics]\ngravity = 2000\n\n[player]\njump_impulse = -600\n\n[enemy]\nhealth = 40\n",
            )
            .unwrap();
        assert_eq!(config.gravity, 2000.0);
        assert_eq!(config.jump_impulse, -600.0);
        assert_eq!(config.enemy_health, 40);
        assert_eq!(config.player_max_speed, 100.0);
        assert_eq!(config.render_width, 640);
    }

    #[test]
    fn test_unparsable_value_keeps_default() {
        let mut config = GameConfig::new();
        config.load_from_str("[physics]\ngravity = heavy\n").unwrap();
        assert_eq!(config.gravity, 500.0);
    }

    #[test]
    fn test_negative_time_scale_keeps_default() {
        let mut config = GameConfig::new();
        config.load_from_str("[simulation]\ntime_scale = -1\n").unwrap();
        assert_eq!(config.time_scale, 1.0);
        config.load_from_str("[simulation]\ntime_scale = NaN\n").unwrap();
        assert_eq!(config.time_scale, 1.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.gravity, 500.0);
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = GameConfig::with_path(&path);
        config.gravity = 750.0;
        config.seed = 7;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.gravity, 750.0);
        assert_eq!(loaded.seed, 7);
    }
}
