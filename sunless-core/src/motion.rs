use glam::Vec2;

use crate::direction::Direction;
use crate::FRAME_TIME;

pub const DEFAULT_MOTION_SPEED: f32 = 10.0;

/// Scripted straight-line move between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionMaster {
    start: Vec2,
    end: Vec2,
    current: Vec2,
    motion_time: f32,
    arrival_time: f32,
    speed: f32,
    moving: bool,
}

impl Default for MotionMaster {
    fn default() -> Self {
        Self {
            start: Vec2::ZERO,
            end: Vec2::ZERO,
            current: Vec2::ZERO,
            motion_time: 0.0,
            arrival_time: 0.0,
            speed: DEFAULT_MOTION_SPEED,
            moving: false,
        }
    }
}

impl MotionMaster {
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn target(&self) -> Option<Vec2> {
        self.moving.then_some(self.end)
    }

    /// Starts a move. Zero-length moves are ignored.
    pub fn move_to(&mut self, start: Vec2, end: Vec2) {
        if start == end {
            return;
        }
        self.start = start;
        self.end = end;
        self.current = start;
        self.motion_time = 0.0;
        self.arrival_time = start.distance(end) / self.speed;
        self.moving = true;
    }

    /// Facing for the travel vector, y flipped to point up.
    pub fn facing(&self) -> Option<Direction> {
        if !self.moving {
            return None;
        }
        let travel = self.end - self.start;
        Direction::from_vector(Vec2::new(travel.x, -travel.y))
    }

    /// Advances one frame and returns the new position while a move is running.
    /// The frame that reaches the end point still reports it.
    pub fn update(&mut self) -> Option<Vec2> {
        if !self.moving {
            return None;
        }

        let step = FRAME_TIME * self.speed;
        if self.motion_time + step <= self.arrival_time {
            self.motion_time += step;
            self.current = self.start.lerp(self.end, self.motion_time / self.arrival_time);
        } else {
            self.current = self.end;
            self.reset();
        }
        Some(self.current)
    }

    pub fn reset(&mut self) {
        let current = self.current;
        *self = Self::default();
        self.current = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_the_end_point() {
        let mut motion = MotionMaster::default();
        motion.move_to(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        assert_eq!(motion.facing(), Some(Direction::Right));

        let mut last = None;
        let mut frames = 0;
        while let Some(p) = motion.update() {
            last = Some(p);
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(last, Some(Vec2::new(100.0, 0.0)));
        assert!(!motion.is_moving());
        assert!(frames > 1);
    }

    #[test]
    fn zero_length_is_ignored() {
        let mut motion = MotionMaster::default();
        motion.move_to(Vec2::ONE, Vec2::ONE);
        assert!(!motion.is_moving());
        assert_eq!(motion.update(), None);
    }

    #[test]
    fn facing_flips_screen_y() {
        let mut motion = MotionMaster::default();
        motion.move_to(Vec2::ZERO, Vec2::new(0.0, -50.0));
        assert_eq!(motion.facing(), Some(Direction::Up));
    }
}
