//! Engine configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_tictactoe::{Difficulty, GameSession, Player};
use tracing::{debug, info, instrument};

/// Settings for new game sessions.
///
/// ```toml
/// difficulty = "hard"
/// automated_player = "O"
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Opponent difficulty.
    #[serde(default)]
    difficulty: Difficulty,

    /// Mark played by the engine.
    #[serde(default = "default_automated_player")]
    automated_player: Player,

    /// Seed for the engine's random choices; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_automated_player() -> Player {
    Player::O
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            automated_player: default_automated_player(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration.
    pub fn new(difficulty: Difficulty, automated_player: Player, seed: Option<u64>) -> Self {
        Self {
            difficulty,
            automated_player,
            seed,
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            difficulty = %config.difficulty,
            automated_player = %config.automated_player,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Applies command-line overrides on top of file values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        difficulty: Option<Difficulty>,
        automated_player: Option<Player>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        if let Some(player) = automated_player {
            self.automated_player = player;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Same settings at a different difficulty.
    pub fn at_difficulty(&self, difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..self.clone()
        }
    }

    /// Builds a fresh game session from these settings.
    #[instrument(skip(self))]
    pub fn new_session(&self) -> GameSession {
        match self.seed {
            Some(seed) => GameSession::new(self.difficulty, self.automated_player, seed),
            None => GameSession::from_entropy(self.difficulty, self.automated_player),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
