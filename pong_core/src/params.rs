/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 10.0; // units per tick

    // Ball
    pub const BALL_SIZE: f32 = 12.0;
    pub const BALL_SPEED: f32 = 4.0; // horizontal serve speed
    pub const BALL_SPEED_MAX: f32 = 10.0;
    pub const IMPACT_SPEEDUP: f32 = 0.1; // scaled by distance from the paddle's top edge
    pub const ACTIVE_PLAY_BOOST: f32 = 1.1; // defender was holding a movement key
    pub const SPIN_FACTOR: f32 = 0.02;

    // Score
    pub const WIN_SCORE: u8 = 5;

    // Timers (milliseconds)
    pub const SERVE_DELAY_MS: f64 = 500.0;
    pub const WINNER_DELAY_MS: f64 = 100.0;
}
