use glam::Vec2;

use crate::assets::CollisionMap;
use crate::object::Object;
use crate::types::Rect;

/// Pixels with a red channel below this block movement.
pub const BLOCKED_BELOW: u8 = 128;

/// Samples the pixel under `point` in map-local coordinates.
/// Points outside the map are never blocked.
pub fn is_blocked(map: &CollisionMap, point: Vec2) -> bool {
    let (x, y) = (point.x.floor(), point.y.floor());
    if x < 0.0 || y < 0.0 || !x.is_finite() || !y.is_finite() {
        return false;
    }
    match map.red_at(x as u32, y as u32) {
        Some(red) => red < BLOCKED_BELOW,
        None => false,
    }
}

/// World rectangle covered by an object's collision map, centred on its position.
pub fn map_bounds(object: &Object) -> Option<Rect> {
    let map = object.collision_map.as_ref()?;
    Some(Rect::centered(object.position, map.width as f32, map.height as f32))
}

/// Moves `foot` by `delta` unless the destination lands on a blocked pixel of
/// any object's collision map. The move is all or nothing.
pub fn resolve(objects: &[Object], foot: Vec2, delta: Vec2) -> Vec2 {
    let candidate = foot + delta;
    for object in objects {
        let (Some(map), Some(bounds)) = (object.collision_map.as_ref(), map_bounds(object)) else {
            continue;
        };
        if bounds.contains(candidate) && is_blocked(map, candidate - bounds.top_left()) {
            return foot;
        }
    }
    candidate
}
