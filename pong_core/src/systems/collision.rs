use crate::{Ball, Config, Events, InputState, Paddle, Segment, Side};
use glam::Vec2;
use hecs::World;

/// Reverse vertical velocity when the ball touches the top or bottom wall.
///
/// Left and right edges are scoring boundaries, not walls. The ball is
/// clamped back inside the arena and `dy` only flips while it still points
/// into the wall, so one crossing means one flip. Returns whether the ball
/// bounced.
pub fn bounce_off_walls(ball: &mut Ball, config: &Config) -> bool {
    let floor = config.arena_height - config.ball_size;

    // Clamp position to prevent stuck
    let into_wall = if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y < 0.0
    } else if ball.pos.y >= floor {
        ball.pos.y = floor;
        ball.vel.y > 0.0
    } else {
        false
    };

    if into_wall {
        ball.vel.y = -ball.vel.y;
    }
    into_wall
}

/// The edge of `paddle` that faces the ball
pub fn paddle_front_edge(paddle: &Paddle, config: &Config) -> Segment {
    let x = match paddle.side {
        Side::Left => paddle.x + config.paddle_width,
        Side::Right => paddle.x,
    };
    Segment::vertical(x, paddle.y, config.paddle_height)
}

/// Swept check: did the ball's leading edge cross the paddle's front edge
/// while travelling from `prev` to `curr` (both top-left corners)?
///
/// Only catches one crossing per tick, so the ball must never move further
/// than a paddle's width in a single step.
pub fn ball_hit_paddle(prev: Vec2, curr: Vec2, paddle: &Paddle, config: &Config) -> bool {
    // Crossing from behind the paddle is the ball leaving, not arriving
    let approaching = (curr.x - prev.x) * paddle.side.toward() > 0.0;
    if !approaching {
        return false;
    }

    let leading = match paddle.side {
        Side::Left => Vec2::ZERO,
        Side::Right => Vec2::new(config.ball_size, 0.0),
    };
    let path = Segment::new(prev + leading, curr + leading);
    path.intersects(&paddle_front_edge(paddle, config))
}

/// Send the ball back from `paddle`.
///
/// Horizontal speed is capped at `ball_speed_max`, then scaled up by how far
/// the contact point sits from the paddle's bottom edge (`1 - relative`),
/// and once more if the defender was holding a movement key. The vertical
/// velocity picks up spin proportional to the offset from paddle centre.
pub fn resolve_paddle_impact(ball: &mut Ball, paddle: &Paddle, config: &Config, boost_held: bool) {
    let half_height = config.paddle_height / 2.0;
    let paddle_center = paddle.y + half_height;
    let ball_center = ball.pos.y + config.ball_size / 2.0;

    // -1 at the top edge, 0 dead centre, 1 at the bottom edge
    let relative = (ball_center - paddle_center) / half_height;
    let speed_increase = (1.0 - relative).abs();

    let speed = ball.vel.x.abs().min(config.ball_speed_max)
        * (1.0 + speed_increase * config.impact_speedup);
    let mut dx = speed * paddle.side.opponent().toward();
    if boost_held {
        dx *= config.active_play_boost;
    }

    ball.vel.x = dx;
    ball.vel.y += (ball.pos.y - paddle_center) * config.spin_factor;
}

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, config: &Config, input: &InputState, events: &mut Events) {
    // Collect paddle data first so the ball can be borrowed mutably
    let mut paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();
    paddles.sort_by_key(|paddle| paddle.side);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if bounce_off_walls(ball, config) {
            events.ball_hit_wall = true;
        }

        let hit = paddles
            .iter()
            .find(|paddle| ball_hit_paddle(ball.prev, ball.pos, paddle, config));

        if let Some(paddle) = hit {
            let boost_held = input.movement_held(paddle.side);
            resolve_paddle_impact(ball, paddle, config, boost_held);
            events.ball_hit_paddle = Some(paddle.side);

            tracing::debug!(
                side = ?paddle.side,
                dx = ball.vel.x,
                dy = ball.vel.y,
                boost_held,
                "ball hit paddle"
            );
        }
    }
}
