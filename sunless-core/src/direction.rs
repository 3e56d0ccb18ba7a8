use std::f32::consts::FRAC_PI_4;
use std::fmt;

use glam::Vec2;

/// Eight facings, counter-clockwise from right. The discriminant is the
/// value stored in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum Direction {
    Right = 0,
    UpRight = 1,
    Up = 2,
    UpLeft = 3,
    Left = 4,
    DownLeft = 5,
    #[default]
    Down = 6,
    DownRight = 7,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub const ALL: [Direction; Self::COUNT] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Nearest octant of a vector with y pointing up. `None` for a zero vector.
    pub fn from_vector(v: Vec2) -> Option<Self> {
        if v.length_squared() <= f32::EPSILON {
            return None;
        }
        let octant = (v.y.atan2(v.x) / FRAC_PI_4).round() as i32;
        Self::from_index(octant.rem_euclid(Self::COUNT as i32))
    }

    /// The direction whose sprite is drawn flipped when this one has none.
    pub fn mirrored(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::UpRight => Direction::UpLeft,
            Direction::Up => Direction::Up,
            Direction::UpLeft => Direction::UpRight,
            Direction::Left => Direction::Right,
            Direction::DownLeft => Direction::DownRight,
            Direction::Down => Direction::Down,
            Direction::DownRight => Direction::DownLeft,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::UpRight => "up_right",
            Direction::Up => "up",
            Direction::UpLeft => "up_left",
            Direction::Left => "left",
            Direction::DownLeft => "down_left",
            Direction::Down => "down",
            Direction::DownRight => "down_right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
