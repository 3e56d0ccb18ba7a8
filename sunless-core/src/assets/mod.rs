mod disk;
mod memory;

pub use disk::FsLoader;
pub use memory::MemoryLoader;

use std::ops::Deref;
use std::rc::{Rc, Weak};

use parascript_core::Script;
use rustc_hash::FxHashMap;

/// Only the dimensions of an image matter to the core; pixels stay with
/// whatever draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Ordered animation frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub frames: Vec<Texture>,
}

impl Sprite {
    pub fn new(frames: Vec<Texture>) -> Self {
        Self { frames }
    }

    pub fn frame(&self, index: usize) -> Option<&Texture> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.get(index % self.frames.len())
    }
}

/// Red channel of a collision bitmap, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMap {
    pub width: u32,
    pub height: u32,
    pub red: Vec<u8>,
}

impl CollisionMap {
    pub fn new(width: u32, height: u32, red: Vec<u8>) -> Self {
        debug_assert_eq!(red.len(), (width * height) as usize);
        Self { width, height, red }
    }

    /// Every cell set to `red`.
    pub fn filled(width: u32, height: u32, red: u8) -> Self {
        Self::new(width, height, vec![red; (width * height) as usize])
    }

    pub fn red_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.red.get((y * self.width + x) as usize).copied()
    }
}

/// A loaded asset and the path it was acquired with.
#[derive(Debug)]
pub struct Asset<T> {
    pub path: String,
    pub data: T,
}

impl<T> Deref for Asset<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// Shared ownership of an asset. Dropping the last handle frees it.
pub type Handle<T> = Rc<Asset<T>>;

pub fn path_of<T>(handle: &Option<Handle<T>>) -> &str {
    handle.as_ref().map_or("", |h| h.path.as_str())
}

/// Decodes assets by path. Failures are reported as `None`.
pub trait AssetLoader {
    fn load_sprite(&self, path: &str) -> Option<Sprite>;
    fn load_texture(&self, path: &str) -> Option<Texture>;
    fn load_collision_map(&self, path: &str) -> Option<CollisionMap>;
    fn load_script(&self, path: &str) -> Option<Script>;
}

struct Cache<T> {
    entries: FxHashMap<String, Weak<Asset<T>>>,
}

impl<T> Cache<T> {
    fn new() -> Self {
        Self { entries: FxHashMap::default() }
    }

    fn acquire(&mut self, kind: &str, path: &str, load: impl FnOnce(&str) -> Option<T>) -> Option<Handle<T>> {
        if path.is_empty() {
            return None;
        }
        if let Some(live) = self.entries.get(path).and_then(Weak::upgrade) {
            return Some(live);
        }

        log::debug!("Loading {}: {}", kind, path);
        let Some(data) = load(path) else {
            log::warn!("Couldn't load {} '{}'", kind, path);
            return None;
        };
        let handle = Rc::new(Asset { path: path.to_string(), data });
        self.entries.insert(path.to_string(), Rc::downgrade(&handle));
        Some(handle)
    }

    fn gc(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, weak| weak.strong_count() > 0);
        before - self.entries.len()
    }

    fn live(&self) -> usize {
        self.entries.values().filter(|w| w.strong_count() > 0).count()
    }
}

/// Asset cache keyed by path. Holds weak references only, so an asset
/// lives exactly as long as some object holds its handle.
pub struct Assets {
    loader: Box<dyn AssetLoader>,
    sprites: Cache<Sprite>,
    textures: Cache<Texture>,
    collision_maps: Cache<CollisionMap>,
    scripts: Cache<Script>,
}

impl Assets {
    pub fn new(loader: Box<dyn AssetLoader>) -> Self {
        Self {
            loader,
            sprites: Cache::new(),
            textures: Cache::new(),
            collision_maps: Cache::new(),
            scripts: Cache::new(),
        }
    }

    pub fn acquire_sprite(&mut self, path: &str) -> Option<Handle<Sprite>> {
        let loader = &self.loader;
        self.sprites.acquire("sprite", path, |p| loader.load_sprite(p))
    }

    pub fn acquire_texture(&mut self, path: &str) -> Option<Handle<Texture>> {
        let loader = &self.loader;
        self.textures.acquire("texture", path, |p| loader.load_texture(p))
    }

    pub fn acquire_collision_map(&mut self, path: &str) -> Option<Handle<CollisionMap>> {
        let loader = &self.loader;
        self.collision_maps.acquire("collision map", path, |p| loader.load_collision_map(p))
    }

    pub fn acquire_script(&mut self, path: &str) -> Option<Handle<Script>> {
        let loader = &self.loader;
        self.scripts.acquire("script", path, |p| loader.load_script(p))
    }

    /// Forgets entries whose asset has been dropped.
    pub fn gc(&mut self) {
        let freed = self.sprites.gc() + self.textures.gc() + self.collision_maps.gc() + self.scripts.gc();
        if freed > 0 {
            log::debug!("GC: forgot {} released assets, {} still live", freed, self.live_count());
        }
    }

    pub fn live_count(&self) -> usize {
        self.sprites.live() + self.textures.live() + self.collision_maps.live() + self.scripts.live()
    }
}
