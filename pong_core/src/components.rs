use glam::Vec2;

/// Which half of the arena a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Player number as shown to humans (1 = left, 2 = right)
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }

    /// Sign of horizontal velocity heading toward this side
    pub fn toward(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub x: f32, // Left edge, fixed per side
    pub y: f32, // Top edge
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32) -> Self {
        Self { side, x, y }
    }
}

/// Ball component - the pong ball
///
/// `pos` is the top-left corner of the ball's bounding box. `prev` is where
/// it was before the last integration step, used for swept paddle checks.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub prev: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            prev: pos,
            vel,
        }
    }

    /// Advance one tick along the current velocity
    pub fn integrate(&mut self) {
        self.prev = self.pos;
        self.pos += self.vel;
    }

    /// Move to `pos` and hold still until the next serve
    pub fn park(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev = pos;
        self.vel = Vec2::ZERO;
    }

    pub fn is_parked(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}
