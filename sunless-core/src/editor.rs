use glam::Vec2;

use crate::object::Object;
use crate::scene::{Scene, PLAYER};

/// Selection and drag state of the scene editor. Every structural edit
/// goes through here so the indices it holds stay valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSession {
    pub selected: Option<usize>,
    pub dragged: Option<usize>,
}

impl EditorSession {
    pub fn select(&mut self, scene: &Scene, index: Option<usize>) {
        self.selected = index.filter(|&i| i < scene.len());
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected<'a>(&self, scene: &'a Scene) -> Option<&'a Object> {
        self.selected.and_then(|i| scene.get(i))
    }

    pub fn selected_mut<'a>(&self, scene: &'a mut Scene) -> Option<&'a mut Object> {
        self.selected.and_then(|i| scene.get_mut(i))
    }

    /// Starts dragging whatever is under the pointer, selecting it.
    pub fn grab(&mut self, hovered: Option<usize>) {
        self.selected = hovered;
        self.dragged = hovered;
    }

    pub fn release(&mut self) {
        self.dragged = None;
    }

    /// Moves the dragged object by a screen-space delta.
    pub fn drag(&self, scene: &mut Scene, screen_delta: Vec2, zoom: f32) {
        if let Some(object) = self.dragged.and_then(|i| scene.get_mut(i)) {
            object.position += screen_delta / zoom;
        }
    }

    pub fn add(&mut self, scene: &mut Scene) -> Option<usize> {
        let index = scene.add()?;
        log::info!("Added '{}'", scene.get(index).map_or("", Object::name));
        Some(index)
    }

    pub fn clone_object(&mut self, scene: &mut Scene, index: usize) -> Option<usize> {
        let copy = scene.clone_object(index)?;
        let shift = |slot: &mut Option<usize>| {
            if let Some(i) = slot.as_mut().filter(|i| **i >= copy) {
                *i += 1;
            }
        };
        shift(&mut self.selected);
        shift(&mut self.dragged);
        log::info!("Cloned object {} as '{}'", index, scene.get(copy).map_or("", Object::name));
        Some(copy)
    }

    /// Deletes an object. Deleting the selected last object selects the one
    /// before it; later selections shift down with the collection.
    pub fn delete(&mut self, scene: &mut Scene, index: usize) -> Option<Object> {
        let was_last = index + 1 == scene.len();
        let removed = scene.remove(index)?;

        self.selected = match self.selected {
            Some(i) if i == index && was_last => index.checked_sub(1).filter(|_| !scene.is_empty()),
            Some(i) if i == index => Some(index),
            Some(i) if i > index => Some(i - 1),
            other => other,
        };
        self.dragged = match self.dragged {
            Some(i) if i == index => None,
            Some(i) if i > index => Some(i - 1),
            other => other,
        };
        log::info!("Deleted '{}'", removed.name());
        Some(removed)
    }

    /// Deletes the selection unless it is the player.
    pub fn delete_selected(&mut self, scene: &mut Scene) -> Option<Object> {
        match self.selected {
            Some(i) if i != PLAYER => self.delete(scene, i),
            _ => None,
        }
    }
}
