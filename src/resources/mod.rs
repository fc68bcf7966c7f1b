//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, configuration,
//! level data and rendering handles.
//!
//! Overview
//! - `camera2d` – shared 2D camera used for world/screen transforms and culling
//! - `debugmode` – presence toggles collider/sensor overlays
//! - `gameconfig` – window settings and gameplay tuning from an INI file
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `inputtrace` – recorded per-frame input for headless replays
//! - `level` – tile grid, tile codes and load-time validation
//! - `screensize` – logical render resolution
//! - `simrng` – seeded random source used by the update pass
//! - `texturestore` – loaded textures keyed by string IDs (binary only)
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod inputtrace;
pub mod level;
pub mod screensize;
pub mod simrng;
pub mod texturestore;
pub mod worldtime;
