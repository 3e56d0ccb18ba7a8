use glam::Vec2;

use crate::object::{Object, MAX_NAME_LEN};
use crate::depth;

pub const MAX_OBJECTS: usize = 100;

/// Index of the player-controlled object.
pub const PLAYER: usize = 0;

/// The live, ordered object collection. Index 0 is the player.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.objects.len() >= MAX_OBJECTS
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Field access without structural changes.
    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn get(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    pub fn player(&self) -> Option<&Object> {
        self.objects.get(PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut Object> {
        self.objects.get_mut(PLAYER)
    }

    /// First object with a case-insensitively equal name.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.is_named(name))
    }

    /// Appends an object. Refused at capacity.
    pub fn push(&mut self, object: Object) -> Option<usize> {
        if self.is_full() {
            log::warn!("Scene is full ({} objects), '{}' not added", MAX_OBJECTS, object.name());
            return None;
        }
        self.objects.push(object);
        Some(self.objects.len() - 1)
    }

    /// Appends a blank object named after the new object count.
    pub fn add(&mut self) -> Option<usize> {
        let name = format!("Object{}", self.objects.len() + 1);
        self.push(Object::new(&name))
    }

    /// Inserts a copy of `index` right after it. The copy shares every asset
    /// handle and gets the first free name among `<name>2`..`<name>99`.
    pub fn clone_object(&mut self, index: usize) -> Option<usize> {
        if self.is_full() {
            log::warn!("Scene is full ({} objects), clone refused", MAX_OBJECTS);
            return None;
        }
        let source = self.objects.get(index)?;
        let base = source.name().to_string();
        let mut copy = source.clone();

        let mut name = base.clone();
        for suffix in 2..100 {
            if self.find_by_name(&name).is_none() {
                break;
            }
            let digits = suffix.to_string();
            let stem: String = base.chars().take(MAX_NAME_LEN - digits.len()).collect();
            name = format!("{}{}", stem, digits);
        }
        copy.set_name(&name);

        self.objects.insert(index + 1, copy);
        Some(index + 1)
    }

    /// Removes an object, shifting later ones down. The player can only be
    /// removed when it is the last object left.
    pub fn remove(&mut self, index: usize) -> Option<Object> {
        if index >= self.objects.len() {
            return None;
        }
        if index == PLAYER && self.objects.len() > 1 {
            log::warn!("Refusing to remove the player while other objects exist");
            return None;
        }
        Some(self.objects.remove(index))
    }

    /// Tears the scene down and installs `objects` in its place.
    pub fn replace(&mut self, objects: Vec<Object>) {
        self.objects.clear();
        self.objects = objects;
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn update(&mut self) {
        for object in &mut self.objects {
            object.update();
        }
    }

    pub fn render_order(&self) -> Vec<usize> {
        depth::render_order(&self.objects)
    }

    pub fn hit_test_order(&self) -> Vec<usize> {
        depth::hit_test_order(&self.objects)
    }

    pub fn object_at(&self, point: Vec2) -> Option<usize> {
        depth::object_at(&self.objects, point)
    }

    /// First interactable object other than the player within `radius` of
    /// the player's feet.
    pub fn interactable_near_player(&self, radius: f32) -> Option<usize> {
        let player = self.player()?;
        (PLAYER + 1..self.objects.len()).find(|&i| {
            let object = &self.objects[i];
            object.is_interactable() && player.distance_to(object) < radius
        })
    }
}
