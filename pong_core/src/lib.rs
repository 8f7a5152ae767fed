//! Simulation core for a two-paddle ball game
//!
//! Everything here is deterministic given a seed and the host's frame
//! timestamps: the host feeds in held keys and time, and receives a
//! [`FrameView`] to draw plus winner announcements.

pub mod components;
pub mod config;
pub mod geometry;
pub mod host;
pub mod map;
pub mod params;
pub mod resources;
pub mod schedule;
pub mod state;
pub mod systems;

pub use components::*;
pub use config::*;
pub use geometry::*;
pub use host::*;
pub use map::*;
pub use params::*;
pub use resources::*;
pub use schedule::*;
pub use state::*;

use hecs::World;
use systems::*;

/// Run one tick of ball simulation: move, collide, then score.
///
/// Scoring is skipped on a tick where the ball hit a paddle.
pub fn step(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    input: &InputState,
    score: &mut Score,
    events: &mut Events,
    scheduler: &mut Scheduler,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Move ball
    move_ball(world);

    // 2. Check collisions (walls, then paddles)
    check_collisions(world, config, input, events);

    // 3. Check scoring (ball exited arena)
    if events.ball_hit_paddle.is_none() {
        check_scoring(world, arena, config, score, events, scheduler);
    }
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, config: &Config, side: Side, y: f32) -> hecs::Entity {
    world.spawn((Paddle::new(side, config.paddle_x(side), y),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}
