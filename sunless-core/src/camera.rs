use glam::{Mat2, Vec2};

use crate::config::CameraConfig;
use crate::FRAME_TIME;

pub const MAX_SHAKE_ROTATION_DEG: f32 = 5.0;
pub const MAX_SHAKE_TRANSLATION: f32 = 50.0;
pub const WHEEL_ZOOM_STEP: f32 = 1.1;

/// 2D view: `target` in world space lands on `offset` in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
    /// Degrees, clockwise on screen.
    pub rotation: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { target: Vec2::ZERO, offset: Vec2::ZERO, zoom: 1.0, rotation: 0.0 }
    }
}

impl Camera {
    fn rotation_matrix(&self) -> Mat2 {
        Mat2::from_angle(self.rotation.to_radians())
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.rotation_matrix() * ((world - self.target) * self.zoom) + self.offset
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let unrotated = self.rotation_matrix().transpose() * (screen - self.offset);
        unrotated / self.zoom + self.target
    }

    /// Multiplies the zoom while keeping the world point under `screen` fixed.
    pub fn zoom_to_screen_point(&mut self, screen: Vec2, factor: f32) {
        let before = self.screen_to_world(screen);
        self.zoom *= factor;
        let after = self.screen_to_world(screen);
        self.target -= after - before;
    }

    /// Pans by a screen-space pointer delta.
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.target -= screen_delta / self.zoom;
    }
}

/// Cheap smooth 1D gradient noise in roughly [-1, 1].
fn noise1(seed: u32, t: f32) -> f32 {
    fn gradient(seed: u32, i: i32) -> f32 {
        let mut h = (i as u32).wrapping_mul(0x27d4_eb2d) ^ seed.wrapping_mul(0x9e37_79b9);
        h ^= h >> 15;
        h = h.wrapping_mul(0x85eb_ca6b);
        h ^= h >> 13;
        (h & 0xffff) as f32 / 32767.5 - 1.0
    }
    let i = t.floor();
    let f = t - i;
    let i = i as i32;
    let g0 = gradient(seed, i) * f;
    let g1 = gradient(seed, i.wrapping_add(1)) * (f - 1.0);
    let s = f * f * (3.0 - 2.0 * f);
    2.0 * (g0 + (g1 - g0) * s)
}

/// Follow camera with look-ahead and trauma shake.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub camera: Camera,
    pub config: CameraConfig,
    pub screen_center: Vec2,
    /// Current look-ahead, eased toward `offset_factor * velocity`.
    pub look_ahead: Vec2,
    pub trauma: f32,
    pub trauma_falloff: f32,
    time: f32,
}

impl CameraRig {
    pub fn new(config: CameraConfig, screen_size: Vec2) -> Self {
        let screen_center = 0.5 * screen_size;
        let trauma_falloff = config.shake_falloff;
        Self {
            camera: Camera { offset: screen_center, ..Camera::default() },
            config,
            screen_center,
            look_ahead: Vec2::ZERO,
            trauma: 0.0,
            trauma_falloff,
            time: 0.0,
        }
    }

    pub fn follow(&mut self, position: Vec2, velocity: Vec2) {
        let desired = self.config.offset_factor * velocity;
        self.look_ahead = self.look_ahead.lerp(desired, self.config.acceleration);
        self.camera.target = position + self.look_ahead;
        self.camera.offset = self.screen_center;
        self.camera.zoom = 1.0;
    }

    pub fn center_on(&mut self, position: Vec2) {
        self.camera.target = position;
        self.camera.offset = self.screen_center;
        self.camera.zoom = 1.0;
    }

    pub fn add_trauma(&mut self, trauma: f32, falloff: f32) {
        self.trauma += trauma;
        self.trauma_falloff = falloff;
    }

    /// Decays trauma by one frame. At zero the falloff returns to the default.
    pub fn update_shake(&mut self) {
        self.trauma -= self.trauma_falloff;
        if self.trauma <= 0.0 {
            self.trauma = 0.0;
            self.trauma_falloff = self.config.shake_falloff;
        }
    }

    pub fn tick(&mut self) {
        self.time += FRAME_TIME;
    }

    /// The camera to draw the world with, displaced by the current shake.
    pub fn shaken(&self) -> Camera {
        let shake = self.trauma.clamp(0.0, 1.0).powi(2);
        if shake == 0.0 {
            return self.camera;
        }
        let t = 100.0 * self.time;
        let mut camera = self.camera;
        camera.rotation += MAX_SHAKE_ROTATION_DEG * shake * noise1(0, t);
        camera.offset.x += MAX_SHAKE_TRANSLATION * shake * noise1(1, t);
        camera.offset.y += MAX_SHAKE_TRANSLATION * shake * noise1(2, t);
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded_and_continuous() {
        let mut prev = noise1(3, 0.0);
        for step in 1..2000 {
            let v = noise1(3, step as f32 * 0.01);
            assert!((-1.01..=1.01).contains(&v), "{v}");
            assert!((v - prev).abs() < 0.2);
            prev = v;
        }
        assert_eq!(noise1(1, 4.0), 0.0);
    }
}
