use crate::{Ball, Config, InputState, Key, Paddle};
use hecs::World;

/// Apply paddle movement based on held keys.
///
/// Up wins when both keys are held. A paddle already at the top (or bottom)
/// ignores further presses in that direction, and the result is clamped so
/// a step never overshoots the arena.
pub fn move_paddles(world: &mut World, config: &Config, input: &InputState) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        let bottom_limit = config.arena_height - config.paddle_height;

        if input.is_held(Key::up(paddle.side)) && paddle.y > 0.0 {
            paddle.y -= config.paddle_speed;
        } else if input.is_held(Key::down(paddle.side)) && paddle.y < bottom_limit {
            paddle.y += config.paddle_speed;
        }

        paddle.y = config.clamp_paddle_y(paddle.y);
    }
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.integrate();
    }
}
