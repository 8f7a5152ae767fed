use crate::{Params, Side};
use snafu::{ensure, Snafu};

/// Reasons a [`Config`] cannot drive a match
#[derive(Debug, Snafu, PartialEq)]
pub enum ConfigError {
    #[snafu(display("arena must be finite and positive, got {width}x{height}"))]
    InvalidArena { width: f32, height: f32 },

    #[snafu(display("{name} must be finite and positive, got {value}"))]
    InvalidParameter { name: &'static str, value: f32 },

    #[snafu(display(
        "arena {width}x{height} cannot fit two {paddle_width}x{paddle_height} paddles and a {ball_size} ball"
    ))]
    ArenaTooSmall {
        width: f32,
        height: f32,
        paddle_width: f32,
        paddle_height: f32,
        ball_size: f32,
    },

    #[snafu(display("win score must be at least 1"))]
    ZeroWinScore,
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub ball_speed: f32,
    pub ball_speed_max: f32,
    pub impact_speedup: f32,
    pub active_play_boost: f32,
    pub spin_factor: f32,
    pub win_score: u8,
    pub serve_delay_ms: f64,
    pub winner_delay_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            ball_size: Params::BALL_SIZE,
            ball_speed: Params::BALL_SPEED,
            ball_speed_max: Params::BALL_SPEED_MAX,
            impact_speedup: Params::IMPACT_SPEEDUP,
            active_play_boost: Params::ACTIVE_PLAY_BOOST,
            spin_factor: Params::SPIN_FACTOR,
            win_score: Params::WIN_SCORE,
            serve_delay_ms: Params::SERVE_DELAY_MS,
            winner_delay_ms: Params::WINNER_DELAY_MS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default tuning sized to the host's drawing surface
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Self::default()
        }
    }

    /// Get X position (left edge) of a side's paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => 0.0,
            Side::Right => self.arena_width - self.paddle_width,
        }
    }

    /// Clamp paddle top edge to arena bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.arena_height - self.paddle_height)
    }

    /// Check that the configuration describes a playable arena
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.arena_width, self.arena_height);
        ensure!(
            is_positive(width) && is_positive(height),
            InvalidArenaSnafu { width, height }
        );

        for (name, value) in [
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
            ("ball_speed_max", self.ball_speed_max),
        ] {
            ensure!(is_positive(value), InvalidParameterSnafu { name, value });
        }

        ensure!(
            self.paddle_height <= height
                && self.ball_size < height
                && 2.0 * self.paddle_width + self.ball_size < width,
            ArenaTooSmallSnafu {
                width,
                height,
                paddle_width: self.paddle_width,
                paddle_height: self.paddle_height,
                ball_size: self.ball_size,
            }
        );

        ensure!(self.win_score > 0, ZeroWinScoreSnafu);
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left), 0.0, "Left paddle X position");
        assert_eq!(
            config.paddle_x(Side::Right),
            788.0,
            "Right paddle X position"
        );
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        assert_eq!(config.clamp_paddle_y(-15.0), 0.0);
        assert_eq!(
            config.clamp_paddle_y(1000.0),
            config.arena_height - config.paddle_height
        );
        let valid_y = 120.0;
        assert_eq!(config.clamp_paddle_y(valid_y), valid_y);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::new().validate(), Ok(()));
        assert_eq!(Config::with_arena(640.0, 480.0).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_degenerate_arena() {
        let config = Config::with_arena(0.0, 400.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArena { .. })
        ));

        let config = Config::with_arena(f32::NAN, 400.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArena { .. })
        ));
    }

    #[test]
    fn test_rejects_arena_shorter_than_paddle() {
        let config = Config::with_arena(800.0, 80.0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ArenaTooSmall { .. }));
        assert!(
            err.to_string().contains("800x80"),
            "Error should name the arena, got {err}"
        );
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let config = Config {
            ball_speed: -4.0,
            ..Config::new()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "ball_speed",
                value: -4.0
            })
        );

        let config = Config {
            win_score: 0,
            ..Config::new()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWinScore));
    }
}
