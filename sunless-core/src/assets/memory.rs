use parascript_core::Script;
use rustc_hash::FxHashMap;

use super::{AssetLoader, CollisionMap, Sprite, Texture};

/// Serves pre-registered assets. Used by tests, benches and tools that
/// build scenes without touching the disk.
#[derive(Default)]
pub struct MemoryLoader {
    sprites: FxHashMap<String, Sprite>,
    textures: FxHashMap<String, Texture>,
    collision_maps: FxHashMap<String, CollisionMap>,
    scripts: FxHashMap<String, Script>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sprite(mut self, path: &str, frames: &[(u32, u32)]) -> Self {
        let frames = frames.iter().map(|&(w, h)| Texture::new(w, h)).collect();
        self.sprites.insert(path.to_string(), Sprite::new(frames));
        self
    }

    pub fn with_texture(mut self, path: &str, width: u32, height: u32) -> Self {
        self.textures.insert(path.to_string(), Texture::new(width, height));
        self
    }

    pub fn with_collision_map(mut self, path: &str, map: CollisionMap) -> Self {
        self.collision_maps.insert(path.to_string(), map);
        self
    }

    pub fn with_script(mut self, path: &str, script: Script) -> Self {
        self.scripts.insert(path.to_string(), script);
        self
    }
}

impl AssetLoader for MemoryLoader {
    fn load_sprite(&self, path: &str) -> Option<Sprite> {
        self.sprites.get(path).cloned()
    }

    fn load_texture(&self, path: &str) -> Option<Texture> {
        self.textures.get(path).copied()
    }

    fn load_collision_map(&self, path: &str) -> Option<CollisionMap> {
        self.collision_maps.get(path).cloned()
    }

    fn load_script(&self, path: &str) -> Option<Script> {
        self.scripts.get(path).cloned()
    }
}
