use std::io;
use std::path::PathBuf;

use glam::Vec2;
use thiserror::Error;

use crate::assets::{path_of, Assets};
use crate::direction::Direction;
use crate::object::{Expression, Object, MAX_EXPRESSIONS};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("couldn't access scene file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("not a scene file (magic {found:?})")]
    BadMagic { found: [u8; 4] },
    #[error("scene version is {found}, but only version {expected} is supported")]
    VersionMismatch { found: i32, expected: i32 },
    #[error("malformed scene data: {0}")]
    Decode(String),
    #[error("scene holds {count} objects, the limit is {max}")]
    Capacity { count: usize, max: usize },
    #[error("scene has no objects")]
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionRecord {
    pub name: String,
    pub portrait: String,
}

impl ExpressionRecord {
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.portrait.is_empty()
    }
}

/// One object as stored on disk: plain values and asset paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRecord {
    pub name: String,
    pub position: Vec2,
    pub z_offset: f32,
    pub animation_fps: f32,
    pub direction: Direction,
    pub script: String,
    pub collision_map: String,
    pub sprites: [String; Direction::COUNT],
    pub expressions: [ExpressionRecord; MAX_EXPRESSIONS],
}

impl From<&Object> for ObjectRecord {
    fn from(object: &Object) -> Self {
        let mut expressions: [ExpressionRecord; MAX_EXPRESSIONS] = Default::default();
        for (slot, expression) in expressions.iter_mut().zip(object.expressions()) {
            slot.name = expression.name.clone();
            slot.portrait = path_of(&expression.portrait).to_string();
        }

        Self {
            name: object.name().to_string(),
            position: object.position,
            z_offset: object.z_offset,
            animation_fps: object.animation_fps,
            direction: object.direction,
            script: path_of(&object.script).to_string(),
            collision_map: path_of(&object.collision_map).to_string(),
            sprites: std::array::from_fn(|i| path_of(&object.sprites[i]).to_string()),
            expressions,
        }
    }
}

impl ObjectRecord {
    /// Number of leading expression slots in use; trailing blank slots are padding.
    pub fn expression_count(&self) -> usize {
        self.expressions
            .iter()
            .rposition(|e| !e.is_blank())
            .map_or(0, |last| last + 1)
    }

    /// Builds a live object, acquiring every referenced asset.
    pub fn instantiate(&self, assets: &mut Assets) -> Object {
        let mut object = Object::at(&self.name, self.position);
        object.z_offset = self.z_offset;
        object.animation_fps = self.animation_fps;
        object.direction = self.direction;
        object.set_script(assets, &self.script);
        object.set_collision_map(assets, &self.collision_map);
        for direction in Direction::ALL {
            object.set_sprite(assets, direction, &self.sprites[direction.index()]);
        }
        for record in &self.expressions[..self.expression_count()] {
            let portrait = assets.acquire_texture(&record.portrait);
            object.add_expression(Expression::new(&record.name, portrait));
        }
        object
    }
}
