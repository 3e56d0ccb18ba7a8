use glam::Vec2;
use parascript_core::Script;

use crate::assets::{Assets, CollisionMap, Handle, Sprite, Texture};
use crate::direction::Direction;
use crate::motion::MotionMaster;
use crate::types::Rect;
use crate::{FRAME_TIME, Y_SQUISH};

pub const MAX_EXPRESSIONS: usize = 10;
pub const MAX_NAME_LEN: usize = 49;
pub const MAX_EXPRESSION_NAME_LEN: usize = 31;

fn truncated(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// A named portrait used while the object speaks.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    pub name: String,
    pub portrait: Option<Handle<Texture>>,
}

impl Expression {
    pub fn new(name: &str, portrait: Option<Handle<Texture>>) -> Self {
        Self { name: truncated(name, MAX_EXPRESSION_NAME_LEN), portrait }
    }
}

/// A scene entity. Cloning shares every asset handle.
#[derive(Debug, Clone)]
pub struct Object {
    name: String,
    pub position: Vec2,
    pub z_offset: f32,
    pub direction: Direction,
    pub sprites: [Option<Handle<Sprite>>; Direction::COUNT],
    pub animation_fps: f32,
    pub animation_time: f32,
    pub animation_frame: usize,
    pub collision_map: Option<Handle<CollisionMap>>,
    pub script: Option<Handle<Script>>,
    expressions: Vec<Expression>,
    pub motion: MotionMaster,
}

impl Object {
    pub fn new(name: &str) -> Self {
        Self {
            name: truncated(name, MAX_NAME_LEN),
            position: Vec2::ZERO,
            z_offset: 0.0,
            direction: Direction::default(),
            sprites: Default::default(),
            animation_fps: 0.0,
            animation_time: 0.0,
            animation_frame: 0,
            collision_map: None,
            script: None,
            expressions: Vec::new(),
            motion: MotionMaster::default(),
        }
    }

    pub fn at(name: &str, position: Vec2) -> Self {
        Self { position, ..Self::new(name) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = truncated(name, MAX_NAME_LEN);
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_interactable(&self) -> bool {
        self.script.is_some()
    }

    // -- visuals --

    /// Sprite for `direction`, falling back to the mirrored direction.
    /// The flag is true when the fallback must be drawn flipped.
    pub fn sprite_for(&self, direction: Direction) -> Option<(&Sprite, bool)> {
        self.sprite_handle_for(direction)
            .map(|(sprite, mirrored)| (&sprite.data, mirrored))
    }

    pub fn sprite_handle_for(&self, direction: Direction) -> Option<(&Handle<Sprite>, bool)> {
        if let Some(sprite) = &self.sprites[direction.index()] {
            return Some((sprite, false));
        }
        self.sprites[direction.mirrored().index()]
            .as_ref()
            .map(|sprite| (sprite, true))
    }

    pub fn current_sprite(&self) -> Option<(&Sprite, bool)> {
        self.sprite_for(self.direction)
    }

    pub fn current_frame(&self) -> Option<&Texture> {
        self.current_sprite()
            .and_then(|(sprite, _)| sprite.frame(self.animation_frame))
    }

    /// Visual base of the sprite: position plus half the frame height.
    pub fn screen_foot(&self) -> Vec2 {
        match self.current_frame() {
            Some(frame) => self.position + Vec2::new(0.0, 0.5 * frame.height as f32),
            None => self.position,
        }
    }

    pub fn world_foot(&self) -> Vec2 {
        let foot = self.screen_foot();
        Vec2::new(foot.x, foot.y * Y_SQUISH)
    }

    pub fn distance_to(&self, other: &Object) -> f32 {
        self.world_foot().distance(other.world_foot())
    }

    /// Painter's sort key.
    pub fn depth_key(&self) -> f32 {
        self.screen_foot().y + self.z_offset
    }

    /// Current frame rectangle centred on the position; empty without a frame.
    pub fn outline(&self) -> Rect {
        match self.current_frame() {
            Some(frame) => Rect::centered(self.position, frame.width as f32, frame.height as f32),
            None => Rect::default(),
        }
    }

    // -- expressions --

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    /// Refused once the table is full.
    pub fn add_expression(&mut self, expression: Expression) -> bool {
        if self.expressions.len() >= MAX_EXPRESSIONS {
            return false;
        }
        self.expressions.push(expression);
        true
    }

    pub fn remove_expression(&mut self, index: usize) -> Option<Expression> {
        (index < self.expressions.len()).then(|| self.expressions.remove(index))
    }

    pub fn rename_expression(&mut self, index: usize, name: &str) -> bool {
        match self.expressions.get_mut(index) {
            Some(expression) => {
                expression.name = truncated(name, MAX_EXPRESSION_NAME_LEN);
                true
            }
            None => false,
        }
    }

    pub fn set_portrait(&mut self, assets: &mut Assets, index: usize, path: &str) -> bool {
        match self.expressions.get_mut(index) {
            Some(expression) => {
                expression.portrait = assets.acquire_texture(path);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive lookup, falling back to the first entry.
    pub fn portrait(&self, expression: Option<&str>) -> Option<&Handle<Texture>> {
        let found = expression.and_then(|name| {
            self.expressions.iter().find(|e| e.name.eq_ignore_ascii_case(name))
        });
        found.or(self.expressions.first())?.portrait.as_ref()
    }

    // -- asset slots --

    pub fn set_sprite(&mut self, assets: &mut Assets, direction: Direction, path: &str) {
        self.sprites[direction.index()] = assets.acquire_sprite(path);
    }

    pub fn set_collision_map(&mut self, assets: &mut Assets, path: &str) {
        self.collision_map = assets.acquire_collision_map(path);
    }

    pub fn set_script(&mut self, assets: &mut Assets, path: &str) {
        self.script = assets.acquire_script(path);
    }

    // -- per frame --

    pub fn update(&mut self) {
        let frame_count = self.current_sprite().map_or(0, |(sprite, _)| sprite.frames.len());
        if frame_count > 0 && self.animation_fps > 0.0 {
            let frame_time = 1.0 / self.animation_fps;
            self.animation_time += FRAME_TIME;
            while self.animation_time > frame_time {
                self.animation_time -= frame_time;
                self.animation_frame = (self.animation_frame + 1) % frame_count;
            }
        }

        let facing = self.motion.facing();
        if let Some(position) = self.motion.update() {
            self.position = position;
            if let Some(direction) = facing {
                self.direction = direction;
            }
        }
    }

    /// Starts a scripted move by `offset` from the current position.
    pub fn move_by(&mut self, offset: Vec2) {
        self.motion.move_to(self.position, self.position + offset);
    }
}
