//! Painter's ordering of scene objects.
//!
//! Objects are keyed by their screen-space foot y plus the manual z offset.
//! A larger key is further down the screen and therefore nearer the viewer.

use glam::Vec2;

use crate::object::Object;

/// Indices sorted by descending depth key, nearest first. Ties keep
/// collection order.
pub fn depth_order(objects: &[Object]) -> Vec<usize> {
    let keys: Vec<f32> = objects.iter().map(Object::depth_key).collect();
    let mut order: Vec<usize> = (0..objects.len()).collect();
    order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
    order
}

/// Back to front: the far objects are drawn first.
pub fn render_order(objects: &[Object]) -> Vec<usize> {
    let mut order = depth_order(objects);
    order.reverse();
    order
}

/// Front to back, the reverse of [`render_order`].
pub fn hit_test_order(objects: &[Object]) -> Vec<usize> {
    depth_order(objects)
}

/// Nearest object whose outline contains `point`.
pub fn object_at(objects: &[Object], point: Vec2) -> Option<usize> {
    hit_test_order(objects)
        .into_iter()
        .find(|&i| objects[i].outline().contains(point))
}
