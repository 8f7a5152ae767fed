use crate::{Config, Side};
use glam::Vec2;

/// The playing field, sized by the host's drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.arena_width, config.arena_height)
    }

    /// Top-left corner that centres a ball of `ball_size`
    pub fn ball_spawn(&self, ball_size: f32) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - ball_size / 2.0,
            self.height / 2.0 - ball_size / 2.0,
        )
    }

    /// Top-left corner of a vertically centred paddle
    pub fn paddle_spawn(&self, side: Side, config: &Config) -> Vec2 {
        Vec2::new(
            config.paddle_x(side),
            (self.height - config.paddle_height) / 2.0,
        )
    }

    /// Ball has crossed the scoring boundary behind `side`'s paddle
    pub fn ball_out(&self, side: Side, ball_x: f32, ball_size: f32) -> bool {
        match side {
            Side::Left => ball_x < 0.0,
            Side::Right => ball_x > self.width - ball_size,
        }
    }
}
