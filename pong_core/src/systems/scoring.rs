use crate::{reset_for_serve, Arena, Ball, Config, Events, Scheduler, Score, Side};
use hecs::World;

/// Award a point when the ball leaves the arena behind a paddle.
///
/// A side that has already reached the win score collects no more points.
/// When the point does not end the match the ball is parked for the next
/// serve. Returns the side that scored.
pub fn check_scoring(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    scheduler: &mut Scheduler,
) -> Option<Side> {
    let ball_x = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| ball.pos.x)?;

    let scorer = [Side::Left, Side::Right]
        .into_iter()
        .find(|&defender| arena.ball_out(defender, ball_x, config.ball_size))?
        .opponent();

    if score.get(scorer) >= config.win_score {
        return None;
    }

    score.increment(scorer);
    match scorer {
        Side::Left => events.left_scored = true,
        Side::Right => events.right_scored = true,
    }

    tracing::info!(
        scorer = ?scorer,
        left = score.left,
        right = score.right,
        "point scored"
    );

    if score.get(scorer) < config.win_score {
        reset_for_serve(world, arena, config, scheduler);
    }

    Some(scorer)
}

/// Schedule the winner announcement once per match.
///
/// `game_over` stays set until the match is reset, so ticks that run while
/// the announcement is pending schedule nothing new. Returns the winner when
/// an announcement was scheduled by this call.
pub fn check_winner(
    score: &Score,
    config: &Config,
    game_over: &mut bool,
    scheduler: &mut Scheduler,
) -> Option<Side> {
    let winner = score.has_winner(config.win_score)?;
    if *game_over {
        return None;
    }

    *game_over = true;
    scheduler.schedule_announcement(config.winner_delay_ms, winner);
    tracing::info!(
        winner = ?winner,
        left = score.left,
        right = score.right,
        "match won"
    );

    Some(winner)
}
