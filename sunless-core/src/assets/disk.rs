use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use parascript_core::Script;
use walkdir::WalkDir;

use super::{AssetLoader, CollisionMap, Sprite, Texture};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Loads assets from a directory tree. Paths are relative to `root`.
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        log::info!("Asset root: {:?}", root);
        Self { root }
    }

    /// `path` under the root, or `path.png` when the bare path doesn't exist.
    fn resolve(&self, path: &str) -> PathBuf {
        let full = self.root.join(path);
        if !full.exists() && full.extension().is_none() {
            let png = full.with_extension("png");
            if png.exists() {
                return png;
            }
        }
        full
    }

    fn texture(&self, path: &Path) -> Result<Texture> {
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read image {:?}", path))?;
        Ok(Texture { width, height })
    }

    fn sprite(&self, path: &str) -> Result<Sprite> {
        let full = self.resolve(path);
        if !full.is_dir() {
            return Ok(Sprite::new(vec![self.texture(&full)?]));
        }

        let mut frames = Vec::new();
        for entry in WalkDir::new(&full)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let file = entry.path();
            let is_image = file
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
            if file.is_file() && is_image {
                frames.push(self.texture(file)?);
            }
        }

        if frames.is_empty() {
            bail!("Sprite directory {:?} has no frames", full);
        }
        log::debug!("Sprite '{}': {} frames", path, frames.len());
        Ok(Sprite::new(frames))
    }

    fn collision_map(&self, path: &str) -> Result<CollisionMap> {
        let full = self.resolve(path);
        let rgba = image::open(&full)
            .with_context(|| format!("Failed to decode collision map {:?}", full))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        let red = rgba.pixels().map(|p| p.0[0]).collect();
        Ok(CollisionMap::new(width, height, red))
    }

    fn script(&self, path: &str) -> Result<Script> {
        let full = self.root.join(path);
        let content = fs::read_to_string(&full)
            .with_context(|| format!("Failed to read script {:?}", full))?;

        match parascript_core::parse(&content) {
            Ok(script) => Ok(script),
            Err(errors) => {
                log::error!("Syntax Error in {:?}:", full);
                for err in errors {
                    log::error!("   Line {}: {}", err.line, err.msg);
                }
                bail!("Parse failed for {:?}", full);
            }
        }
    }
}

fn report<T>(result: Result<T>) -> Option<T> {
    result.map_err(|e| log::error!("{:#}", e)).ok()
}

impl AssetLoader for FsLoader {
    fn load_sprite(&self, path: &str) -> Option<Sprite> {
        report(self.sprite(path))
    }

    fn load_texture(&self, path: &str) -> Option<Texture> {
        report(self.texture(&self.resolve(path)))
    }

    fn load_collision_map(&self, path: &str) -> Option<CollisionMap> {
        report(self.collision_map(path))
    }

    fn load_script(&self, path: &str) -> Option<Script> {
        report(self.script(path))
    }
}
