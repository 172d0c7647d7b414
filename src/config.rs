use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "DUOCADE_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioMode {
    #[default]
    Off,
    Bell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub tick_rate_ms: u64,
    pub audio: AudioMode,
    pub platformer: PlatformerConfig,
    pub flappy: FlappyConfig,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16, // ~60 FPS
            audio: AudioMode::Off,
            platformer: PlatformerConfig::default(),
            flappy: FlappyConfig::default(),
        }
    }
}

impl ArcadeConfig {
    /// Load from the file named by `DUOCADE_CONFIG`, or defaults when unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".into()));
        }
        self.platformer.validate()?;
        self.flappy.validate()
    }
}

/// Tunables for the side-scrolling platformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    pub jump_cooldown: u32,
    pub player_radius: f32,
    pub enemy_radius: f32,
    pub platform_height: f32,
    pub platform_count: usize,
    pub world_width: f32,
    pub view_width: f32,
    pub view_height: f32,
    /// Falling below this y kills the player regardless of platforms.
    pub death_depth: f32,
    /// How far above a platform top the body's bottom may sit and still land.
    pub landing_tolerance: f32,
    pub respawn_ticks: u32,
    pub invuln_ticks: u32,
    pub enemy_hit_cooldown: u32,
    /// Shaved off the combined radii in player/enemy checks.
    pub stomp_margin: f32,
    /// Fraction of the jump velocity given back after a stomp.
    pub stomp_bounce: f32,
    /// Minimum downward speed for a contact to count as a stomp.
    pub stomp_min_fall: f32,
    pub enemy_count: usize,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub win_score: u32,
    pub win_reset_secs: f32,
    pub spawn_point: Vec2,
    pub camera_smoothing: f32,
    /// Ticks a single key press keeps a move intent held on terminals
    /// that do not report key releases.
    pub hold_ticks: u32,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            move_speed: 4.2,
            jump_velocity: 11.0,
            max_fall_speed: 15.0,
            jump_cooldown: 10,
            player_radius: 26.0,
            enemy_radius: 23.0,
            platform_height: 18.0,
            platform_count: 12,
            world_width: 2500.0,
            view_width: 960.0,
            view_height: 540.0,
            death_depth: 600.0,
            landing_tolerance: 2.0,
            respawn_ticks: 60,
            invuln_ticks: 40,
            enemy_hit_cooldown: 40,
            stomp_margin: 4.0,
            stomp_bounce: 0.7,
            stomp_min_fall: 1.0,
            enemy_count: 3,
            enemy_speed_min: 1.1,
            enemy_speed_max: 1.7,
            win_score: 3,
            win_reset_secs: 3.0,
            spawn_point: Vec2::new(70.0, 350.0),
            camera_smoothing: 0.13,
            hold_ticks: 8,
        }
    }
}

impl PlatformerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity <= 0.0 || self.max_fall_speed <= 0.0 {
            return Err(ConfigError::Invalid("platformer gravity and max fall speed must be positive".into()));
        }
        if self.player_radius <= 0.0 || self.enemy_radius <= 0.0 {
            return Err(ConfigError::Invalid("platformer radii must be positive".into()));
        }
        if self.enemy_speed_min > self.enemy_speed_max {
            return Err(ConfigError::Invalid("enemy_speed_min exceeds enemy_speed_max".into()));
        }
        if self.world_width < self.view_width {
            return Err(ConfigError::Invalid("world_width must be at least view_width".into()));
        }
        if self.world_width < 2.0 * self.player_radius.max(self.enemy_radius) {
            return Err(ConfigError::Invalid("world_width must fit the widest body".into()));
        }
        // Also rejects NaN.
        if !(self.win_reset_secs >= 0.0 && self.win_reset_secs.is_finite()) {
            return Err(ConfigError::Invalid("win_reset_secs must be a finite, non-negative number".into()));
        }
        if self.enemy_count > 0 && self.platform_count == 0 {
            return Err(ConfigError::Invalid("enemies need at least one floating platform".into()));
        }
        Ok(())
    }
}

/// Tunables for the Flappy clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub max_fall_speed: f32,
    pub bird_radius: f32,
    pub bird_x: f32,
    pub pipe_width: f32,
    pub pipe_speed: f32,
    pub spawn_interval_ms: u64,
    pub gap_min: f32,
    pub gap_max: f32,
    /// Minimum distance between a gap and the ceiling or the ground.
    pub gap_margin: f32,
    /// Elapsed frame time is clamped to this before feeding the spawn timer.
    pub max_delta_ms: u64,
    pub bob_amplitude: f32,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self {
            world_width: 400.0,
            world_height: 600.0,
            ground_height: 72.0,
            gravity: 0.45,
            flap_velocity: 7.5,
            max_fall_speed: 10.0,
            bird_radius: 14.0,
            bird_x: 120.0,
            pipe_width: 64.0,
            pipe_speed: 2.4,
            spawn_interval_ms: 1500,
            gap_min: 140.0,
            gap_max: 180.0,
            gap_margin: 40.0,
            max_delta_ms: 40,
            bob_amplitude: 6.0,
        }
    }
}

impl FlappyConfig {
    /// Top of the ground strip.
    pub fn floor_y(&self) -> f32 {
        self.world_height - self.ground_height
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity <= 0.0 || self.max_fall_speed <= 0.0 {
            return Err(ConfigError::Invalid("flappy gravity and max fall speed must be positive".into()));
        }
        if self.gap_min <= 0.0 || self.gap_min > self.gap_max {
            return Err(ConfigError::Invalid("flappy gap range must be positive and ordered".into()));
        }
        if self.gap_max + 2.0 * self.gap_margin > self.floor_y() {
            return Err(ConfigError::Invalid("largest pipe gap does not fit above the ground".into()));
        }
        if self.spawn_interval_ms == 0 || self.pipe_speed <= 0.0 {
            return Err(ConfigError::Invalid("pipes need a positive spawn interval and speed".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ArcadeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "audio": "bell", "flappy": { "gravity": 0.6 } }"#;
        let config: ArcadeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.audio, AudioMode::Bell);
        assert_eq!(config.flappy.gravity, 0.6);
        assert_eq!(config.flappy.ground_height, 72.0);
        assert_eq!(config.platformer, PlatformerConfig::default());
    }

    #[test]
    fn test_rejects_gap_that_cannot_fit() {
        let mut config = ArcadeConfig::default();
        config.flappy.gap_max = 600.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_world_narrower_than_player() {
        let json = r#"{ "platformer": { "world_width": 40, "view_width": 40 } }"#;
        let config: ArcadeConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ArcadeConfig::default();
        config.platformer.world_width = 52.0;
        config.platformer.view_width = 52.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_win_reset() {
        for secs in [-1.0, f32::NAN, f32::INFINITY] {
            let mut config = ArcadeConfig::default();
            config.platformer.win_reset_secs = secs;
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))), "{secs}");
        }
        let mut config = ArcadeConfig::default();
        config.platformer.win_reset_secs = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ArcadeConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let path = std::env::temp_dir().join("duocade-bad-config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ArcadeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = fs::remove_file(&path);
    }
}
