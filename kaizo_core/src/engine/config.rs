use crate::logic::board::UNITS_PER_SIDE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deepest ceiling the search arena is sized for.
pub const MAX_SEARCH_DEPTH: u8 = 16;

pub const DEFAULT_MAX_DEPTH: u8 = 8;
pub const BELOW_WORST: i32 = -256;
pub const ABOVE_BEST: i32 = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("search depth must be between 1 and 16, got {0}")]
    Depth(u8),
    #[error("capture values must be positive")]
    CaptureValue,
    #[error("terminal scores [{below_worst}, {above_best}] do not enclose every evaluation")]
    ScoreBounds { below_worst: i32, above_best: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Search Parameters
    pub max_depth: u8,
    pub below_worst: i32,
    pub above_best: i32,

    // Evaluation Parameters
    pub human_capture_value: i32,
    pub computer_capture_value: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            below_worst: BELOW_WORST,
            above_best: ABOVE_BEST,
            human_capture_value: 1,
            computer_capture_value: 2,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    max_depth: Option<u8>,
    below_worst: Option<i32>,
    above_best: Option<i32>,
    human_capture_value: Option<i32>,
    computer_capture_value: Option<i32>,
}

impl EngineConfig {
    /// Reads a partial config; missing keys keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        let config = Self {
            max_depth: json_config.max_depth.unwrap_or(default.max_depth),
            below_worst: json_config.below_worst.unwrap_or(default.below_worst),
            above_best: json_config.above_best.unwrap_or(default.above_best),
            human_capture_value: json_config
                .human_capture_value
                .unwrap_or(default.human_capture_value),
            computer_capture_value: json_config
                .computer_capture_value
                .unwrap_or(default.computer_capture_value),
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Depth(self.max_depth));
        }
        if self.human_capture_value <= 0 || self.computer_capture_value <= 0 {
            return Err(ConfigError::CaptureValue);
        }

        // A terminal score, even at the deepest ply, has to beat any material count.
        let reach = i32::from(self.max_depth) + 1;
        let widest = i32::try_from(UNITS_PER_SIDE).unwrap_or(i32::MAX)
            * self.human_capture_value.max(self.computer_capture_value);
        if self.below_worst + reach >= -widest || self.above_best - reach <= widest {
            return Err(ConfigError::ScoreBounds {
                below_worst: self.below_worst,
                above_best: self.above_best,
            });
        }
        Ok(())
    }
}
