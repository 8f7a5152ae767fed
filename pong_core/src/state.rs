use crate::systems::*;
use crate::*;
use glam::Vec2;
use hecs::World;

/// Where the match stands, as far as the players can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Ball in play
    Playing,
    /// Ball physics and scoring suspended; paddles and drawing continue
    Paused,
    /// A point was scored and the ball is waiting for its serve
    RoundResetting,
    /// Someone reached the win score; waiting for the announcement
    GameOver,
}

/// All simulation state, owned by the frame driver
pub struct GameState {
    pub world: World,
    pub arena: Arena,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub scheduler: Scheduler,
    pub rng: GameRng,
    pub paused: bool,
    pub game_over: bool,
    pub frame_count: u64,
}

impl GameState {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let arena = Arena::from_config(&config);
        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        for side in [Side::Left, Side::Right] {
            let spawn = arena.paddle_spawn(side, &config);
            create_paddle(&mut world, &config, side, spawn.y);
        }

        // The opening serve goes right without a delay
        let ball_vel = Vec2::new(config.ball_speed, rng.serve_dy());
        create_ball(&mut world, arena.ball_spawn(config.ball_size), ball_vel);

        tracing::info!(
            width = arena.width,
            height = arena.height,
            win_score = config.win_score,
            "match started"
        );

        Ok(Self {
            world,
            arena,
            config,
            score: Score::new(),
            events: Events::new(),
            scheduler: Scheduler::new(),
            rng,
            paused: false,
            game_over: false,
            frame_count: 0,
        })
    }

    /// Run one animation frame.
    ///
    /// Due deferred tasks fire first, then (unless paused) one simulation
    /// tick. The frame is always rendered, and paddles always move, even
    /// while paused.
    pub fn frame(
        &mut self,
        now_ms: f64,
        input: &InputState,
        renderer: &mut impl Renderer,
        notifier: &mut impl Notifier,
    ) {
        self.run_due_tasks(now_ms, notifier);

        if !self.paused {
            self.tick(input);
        }

        renderer.render(&self.view());
        move_paddles(&mut self.world, &self.config, input);
        self.frame_count += 1;

        if self.frame_count % 600 == 0 {
            tracing::trace!(
                frame = self.frame_count,
                state = ?self.match_state(),
                "frame"
            );
        }
    }

    /// One simulation step plus the win check
    pub fn tick(&mut self, input: &InputState) {
        step(
            &mut self.world,
            &self.arena,
            &self.config,
            input,
            &mut self.score,
            &mut self.events,
            &mut self.scheduler,
        );
        check_winner(
            &self.score,
            &self.config,
            &mut self.game_over,
            &mut self.scheduler,
        );
    }

    /// Fire every deferred task that has come due by `now_ms`
    pub fn run_due_tasks(&mut self, now_ms: f64, notifier: &mut impl Notifier) {
        self.scheduler.advance(now_ms);

        while let Some(task) = self.scheduler.pop_due() {
            match task {
                TaskKind::ResumeServe { direction } => {
                    resume_serve(&mut self.world, &self.config, &mut self.rng, direction);
                }
                TaskKind::AnnounceWinner { winner } => {
                    notifier.announce_winner(winner);
                    self.reset_game();
                }
            }
        }
    }

    /// Flip the pause flag; returns true when now paused
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "pause toggled");
        self.paused
    }

    /// Start a new match: scores cleared, paddles centred, ball parked for a serve
    pub fn reset_game(&mut self) {
        self.scheduler.invalidate_match();
        self.game_over = false;
        self.score = Score::new();

        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.y = self.arena.paddle_spawn(paddle.side, &self.config).y;
        }

        reset_for_serve(
            &mut self.world,
            &self.arena,
            &self.config,
            &mut self.scheduler,
        );
        tracing::info!("match reset");
    }

    pub fn match_state(&self) -> MatchState {
        if self.game_over {
            MatchState::GameOver
        } else if self.paused {
            MatchState::Paused
        } else if self.scheduler.serve_pending() {
            MatchState::RoundResetting
        } else {
            MatchState::Playing
        }
    }

    pub fn ball(&self) -> Ball {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
            .unwrap_or_else(|| Ball::new(self.arena.ball_spawn(self.config.ball_size), Vec2::ZERO))
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, paddle)| paddle.side == side)
            .map(|(_e, paddle)| *paddle)
            .unwrap_or_else(|| {
                let spawn = self.arena.paddle_spawn(side, &self.config);
                Paddle::new(side, spawn.x, spawn.y)
            })
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> FrameView {
        let left = self.paddle(Side::Left);
        let right = self.paddle(Side::Right);

        FrameView {
            arena: self.arena,
            ball: self.ball().pos,
            ball_size: self.config.ball_size,
            left_paddle: Vec2::new(left.x, left.y),
            right_paddle: Vec2::new(right.x, right.y),
            paddle_size: Vec2::new(self.config.paddle_width, self.config.paddle_height),
            score: self.score,
            state: self.match_state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<FrameView>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, view: &FrameView) {
            self.frames.push(view.clone());
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        winners: Vec<Side>,
    }

    impl Notifier for RecordingNotifier {
        fn announce_winner(&mut self, winner: Side) {
            self.winners.push(winner);
        }
    }

    fn setup_game() -> (GameState, InputState, RecordingRenderer, RecordingNotifier) {
        let state = GameState::new(Config::new(), 12345).expect("default config is valid");
        (
            state,
            InputState::new(),
            RecordingRenderer::default(),
            RecordingNotifier::default(),
        )
    }

    fn place_ball(state: &mut GameState, pos: Vec2, vel: Vec2) {
        for (_e, ball) in state.world.query_mut::<&mut Ball>() {
            *ball = Ball::new(pos, vel);
        }
    }

    #[test]
    fn test_new_game_layout() {
        let (state, _input, _renderer, _notifier) = setup_game();

        assert_eq!(state.paddle(Side::Left).y, 150.0);
        assert_eq!(state.paddle(Side::Right).x, 788.0);
        let ball = state.ball();
        assert_eq!(ball.pos, Vec2::new(394.0, 194.0));
        assert_eq!(ball.vel.x, 4.0, "Opening serve goes right");
        assert_eq!(state.match_state(), MatchState::Playing);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = GameState::new(Config::with_arena(100.0, 50.0), 1);
        assert!(matches!(result, Err(ConfigError::ArenaTooSmall { .. })));
    }

    #[test]
    fn test_frame_moves_ball_and_renders() {
        let (mut state, input, mut renderer, mut notifier) = setup_game();
        let start = state.ball().pos;

        state.frame(16.0, &input, &mut renderer, &mut notifier);

        assert_eq!(state.ball().pos.x, start.x + 4.0);
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(renderer.frames[0].ball, state.ball().pos);
    }

    #[test]
    fn test_view_reports_paddles_by_side() {
        let (mut state, mut input, _renderer, _notifier) = setup_game();
        let view = state.view();

        assert_eq!(view.paddle(Side::Left), Vec2::new(0.0, 150.0));
        assert_eq!(view.paddle(Side::Right), Vec2::new(788.0, 150.0));
        assert_eq!(view.paddle_size, Vec2::new(12.0, 100.0));

        input.press(Key::RightDown);
        move_paddles(&mut state.world, &state.config, &input);
        assert_eq!(state.view().paddle(Side::Right).y, 160.0);
        assert_eq!(state.view().paddle(Side::Left).y, 150.0);
    }

    #[test]
    fn test_pause_freezes_ball_but_not_paddles() {
        let (mut state, mut input, mut renderer, mut notifier) = setup_game();
        assert!(state.toggle_pause());
        input.press(Key::LeftUp);
        let ball_before = state.ball().pos;

        state.frame(16.0, &input, &mut renderer, &mut notifier);

        assert_eq!(state.ball().pos, ball_before, "Ball frozen while paused");
        assert_eq!(state.paddle(Side::Left).y, 140.0, "Paddles still move");
        assert_eq!(renderer.frames.len(), 1, "Rendering continues");
        assert_eq!(renderer.frames[0].state, MatchState::Paused);

        assert!(!state.toggle_pause());
        state.frame(32.0, &input, &mut renderer, &mut notifier);
        assert_ne!(state.ball().pos, ball_before);
    }

    #[test]
    fn test_point_enters_round_reset_then_serves() {
        let (mut state, input, mut renderer, mut notifier) = setup_game();
        place_ball(&mut state, Vec2::new(2.0, 40.0), Vec2::new(-4.0, 0.0));

        state.frame(1000.0, &input, &mut renderer, &mut notifier);

        assert_eq!(state.score.right, 1);
        assert_eq!(state.match_state(), MatchState::RoundResetting);
        assert!(state.ball().is_parked());

        state.frame(1499.0, &input, &mut renderer, &mut notifier);
        assert!(state.ball().is_parked(), "Serve waits the full delay");

        state.frame(1500.0, &input, &mut renderer, &mut notifier);
        assert_eq!(state.ball().vel.x, 4.0, "Serve heads toward the scorer");
        assert_eq!(state.match_state(), MatchState::Playing);
    }

    #[test]
    fn test_scoring_is_exclusive_per_tick() {
        let (mut state, input, mut renderer, mut notifier) = setup_game();
        for x in [-1.0, 400.0, 790.0] {
            place_ball(&mut state, Vec2::new(x, 200.0), Vec2::ZERO);
            state.frame(0.0, &input, &mut renderer, &mut notifier);
            assert!(
                !(state.events.left_scored && state.events.right_scored),
                "Both sides scored in one tick"
            );
        }
        assert_eq!(state.score, Score { left: 1, right: 1 });
    }

    #[test]
    fn test_reset_game_drops_pending_announcement() {
        let (mut state, input, mut renderer, mut notifier) = setup_game();
        state.score.left = state.config.win_score - 1;
        place_ball(&mut state, Vec2::new(787.0, 40.0), Vec2::new(4.0, 0.0));

        state.frame(0.0, &input, &mut renderer, &mut notifier);
        assert_eq!(state.match_state(), MatchState::GameOver);

        // Players start over before the announcement fires
        state.reset_game();
        state.frame(200.0, &input, &mut renderer, &mut notifier);

        assert!(notifier.winners.is_empty(), "Stale announcement fired");
        assert!(!state.game_over);
    }
}
