use crate::{Arena, Ball, Config, GameRng, Scheduler};
use glam::Vec2;
use hecs::World;

/// Direction of the next serve given the ball's `dx` when it went out.
///
/// The serve heads toward the player who just scored. A ball that left with
/// no horizontal speed at all serves to the right.
pub fn serve_direction(exit_dx: f32) -> f32 {
    if exit_dx == 0.0 {
        1.0
    } else {
        -exit_dx.signum()
    }
}

/// Park the ball at the centre and schedule the next serve
pub fn reset_for_serve(world: &mut World, arena: &Arena, config: &Config, scheduler: &mut Scheduler) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let direction = serve_direction(ball.vel.x);
        ball.park(arena.ball_spawn(config.ball_size));
        scheduler.schedule_serve(config.serve_delay_ms, direction);

        tracing::debug!(
            direction,
            delay_ms = config.serve_delay_ms,
            "ball parked for serve"
        );
    }
}

/// Launch the parked ball
pub fn resume_serve(world: &mut World, config: &Config, rng: &mut GameRng, direction: f32) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.vel = Vec2::new(direction * config.ball_speed, rng.serve_dy());
        tracing::debug!(dx = ball.vel.x, dy = ball.vel.y, "serve");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, TaskKind};

    fn setup_world() -> (World, Arena, Config, Scheduler, GameRng) {
        let world = World::new();
        let config = Config::new();
        let arena = Arena::from_config(&config);
        (world, arena, config, Scheduler::new(), GameRng::new(12345))
    }

    fn ball(world: &World) -> Ball {
        world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
            .expect("ball exists")
    }

    #[test]
    fn test_serve_direction() {
        assert_eq!(serve_direction(-4.0), 1.0);
        assert_eq!(serve_direction(6.2), -1.0);
        assert_eq!(serve_direction(0.0), 1.0, "Zero dx picks a default");
    }

    #[test]
    fn test_reset_parks_ball_at_centre() {
        let (mut world, arena, config, mut scheduler, _rng) = setup_world();
        create_ball(&mut world, Vec2::new(-3.0, 80.0), Vec2::new(-4.0, 0.6));

        reset_for_serve(&mut world, &arena, &config, &mut scheduler);

        let ball = ball(&world);
        assert_eq!(ball.pos, arena.ball_spawn(config.ball_size));
        assert_eq!(ball.vel, Vec2::ZERO, "Ball waits for the serve");
        assert!(scheduler.serve_pending());
    }

    #[test]
    fn test_serve_resumes_after_delay() {
        let (mut world, arena, config, mut scheduler, mut rng) = setup_world();
        create_ball(&mut world, Vec2::new(-3.0, 80.0), Vec2::new(-4.0, 0.6));

        reset_for_serve(&mut world, &arena, &config, &mut scheduler);
        assert!(scheduler.take_due(499.0).is_empty());

        for task in scheduler.take_due(500.0) {
            if let TaskKind::ResumeServe { direction } = task {
                resume_serve(&mut world, &config, &mut rng, direction);
            }
        }

        let ball = ball(&world);
        assert_eq!(ball.vel.x, 4.0, "Serve heads toward the scorer");
        assert!((-1.0..1.0).contains(&ball.vel.y));
    }
}
