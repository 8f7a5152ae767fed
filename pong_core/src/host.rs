//! Seams to the outside world: drawing and the end-of-match announcement

use crate::{Arena, MatchState, Score, Side};
use glam::Vec2;

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub arena: Arena,
    pub ball: Vec2, // Top-left corner
    pub ball_size: f32,
    pub left_paddle: Vec2, // Top-left corners
    pub right_paddle: Vec2,
    pub paddle_size: Vec2,
    pub score: Score,
    pub state: MatchState,
}

impl FrameView {
    pub fn paddle(&self, side: Side) -> Vec2 {
        match side {
            Side::Left => self.left_paddle,
            Side::Right => self.right_paddle,
        }
    }
}

/// Draws the current frame; must not touch simulation state
pub trait Renderer {
    fn render(&mut self, view: &FrameView);
}

/// Tells the players who won.
///
/// Returning from `announce_winner` counts as the acknowledgment; the match
/// is reset right after.
pub trait Notifier {
    fn announce_winner(&mut self, winner: Side);
}
