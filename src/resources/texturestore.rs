//! Loaded textures keyed by the names objects refer to.
//!
//! The simulation only stores texture keys; the binary loads the images once
//! at startup and the renderer resolves keys here. Missing images are logged
//! and left out, and the renderer draws a placeholder instead.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct TextureStore {
    pub map: FxHashMap<&'static str, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }

    pub fn insert(&mut self, key: &'static str, texture: Texture2D) {
        self.map.insert(key, texture);
    }

    /// Load `<dir>/<key>.png` for every key. Returns how many loaded.
    pub fn load_dir(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        dir: &Path,
        keys: &[&'static str],
    ) -> usize {
        let mut loaded = 0;
        for key in keys {
            let path = dir.join(format!("{key}.png"));
            let Some(path_str) = path.to_str() else {
                log::warn!("Skipping texture with non UTF-8 path {:?}", path);
                continue;
            };
            if !path.exists() {
                log::warn!("Texture '{}' not found at {}, using placeholder", key, path_str);
                continue;
            }
            match rl.load_texture(thread, path_str) {
                Ok(texture) => {
                    self.insert(key, texture);
                    loaded += 1;
                }
                Err(e) => log::warn!("Failed to load texture '{}': {}", key, e),
            }
        }
        log::info!("Loaded {}/{} textures from {}", loaded, keys.len(), dir.display());
        loaded
    }
}
