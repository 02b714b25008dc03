//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;
use tourney::{EngineSettings, KnockoutTiePolicy, PointsTable};

/// Snapshot file used when neither `--state` nor `TOURNEY_STATE_FILE` is set
pub const DEFAULT_STATE_FILE: &str = "tourney.json";

/// Upper bound for any `POINTS_FOR_*` value
pub const MAX_POINTS: u32 = 1000;

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Snapshot file the state is loaded from and saved to
    pub state_file: PathBuf,
    /// Engine settings (tie policy and league points)
    pub settings: EngineSettings,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `state_file_override` - Optional snapshot path override (from CLI args)
    /// * `tie_policy_override` - Optional tie policy override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<CliConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if `KNOCKOUT_TIE_POLICY` is set to an unknown policy
    pub fn from_env(
        state_file_override: Option<PathBuf>,
        tie_policy_override: Option<KnockoutTiePolicy>,
    ) -> Result<Self, ConfigError> {
        let state_file = state_file_override
            .or_else(|| std::env::var("TOURNEY_STATE_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));

        let tie_policy = match tie_policy_override {
            Some(policy) => policy,
            None => match std::env::var("KNOCKOUT_TIE_POLICY") {
                Ok(value) => {
                    value
                        .parse::<KnockoutTiePolicy>()
                        .map_err(|reason| ConfigError::Invalid {
                            var: "KNOCKOUT_TIE_POLICY".to_string(),
                            reason,
                        })?
                }
                Err(_) => KnockoutTiePolicy::default(),
            },
        };

        let defaults = PointsTable::default();
        let points = PointsTable {
            win: parse_env_or("POINTS_FOR_WIN", defaults.win),
            draw: parse_env_or("POINTS_FOR_DRAW", defaults.draw),
            loss: parse_env_or("POINTS_FOR_LOSS", defaults.loss),
        };

        Ok(CliConfig {
            state_file,
            settings: EngineSettings { tie_policy, points },
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        let points = &self.settings.points;

        for (var, value) in [
            ("POINTS_FOR_WIN", points.win),
            ("POINTS_FOR_DRAW", points.draw),
            ("POINTS_FOR_LOSS", points.loss),
        ] {
            if value > MAX_POINTS {
                return Err(ConfigError::Invalid {
                    var: var.to_string(),
                    reason: format!("Must not exceed {MAX_POINTS}"),
                });
            }
        }

        if points.win == 0 {
            return Err(ConfigError::Invalid {
                var: "POINTS_FOR_WIN".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if points.draw >= points.win {
            return Err(ConfigError::Invalid {
                var: "POINTS_FOR_DRAW".to_string(),
                reason: format!("Must be less than points for a win ({})", points.win),
            });
        }

        if points.loss > points.draw {
            return Err(ConfigError::Invalid {
                var: "POINTS_FOR_LOSS".to_string(),
                reason: format!("Must not exceed points for a draw ({})", points.draw),
            });
        }

        if self.state_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "TOURNEY_STATE_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
