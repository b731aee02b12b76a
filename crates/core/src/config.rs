//! Board configuration
//!
//! All engine parameters live in [`BoardConfig`]. Values are validated once at
//! construction; an invalid configuration is refused before any board exists.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::sanitize::check_palette;
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_PALETTE_SIZE, DEFAULT_SHIFT_SECS,
    DEFAULT_TILE_SIZE, MAX_GRID_DIM, MIN_RUN_LENGTH, SANITIZE_PASSES,
};

/// How a shift's progress advances per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShiftTiming {
    /// Progress grows by `elapsed / duration_secs` (frame-rate independent)
    Timed { duration_secs: f32 },
    /// Progress grows by `step` on every tick with non-zero elapsed time
    FixedStep { step: f32 },
}

impl ShiftTiming {
    /// Progress gained over a frame of `elapsed_secs`
    pub fn progress_for(&self, elapsed_secs: f32) -> f32 {
        if !(elapsed_secs > 0.0) {
            return 0.0;
        }
        match *self {
            ShiftTiming::Timed { duration_secs } => elapsed_secs / duration_secs,
            ShiftTiming::FixedStep { step } => step,
        }
    }

    fn validate(&self) -> Result<()> {
        let (name, value) = match *self {
            ShiftTiming::Timed { duration_secs } => ("shift duration", duration_secs),
            ShiftTiming::FixedStep { step } => ("shift step", step),
        };
        if !(value.is_finite() && value > 0.0) {
            return Err(BoardError::Configuration(format!(
                "{} {} must be finite and positive",
                name, value
            )));
        }
        Ok(())
    }
}

impl Default for ShiftTiming {
    fn default() -> Self {
        ShiftTiming::Timed {
            duration_secs: DEFAULT_SHIFT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    pub palette_size: u8,
    /// `None` seeds from the system clock
    pub seed: Option<u32>,
    pub shift_timing: ShiftTiming,
    pub tile_size: f32,
    pub sanitize_passes: u8,
    pub min_run_length: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            palette_size: DEFAULT_PALETTE_SIZE,
            seed: None,
            shift_timing: ShiftTiming::default(),
            tile_size: DEFAULT_TILE_SIZE,
            sanitize_passes: SANITIZE_PASSES,
            min_run_length: MIN_RUN_LENGTH,
        }
    }
}

impl BoardConfig {
    pub fn new(width: u8, height: u8, palette_size: u8) -> Self {
        Self {
            width,
            height,
            palette_size,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_palette(mut self, palette_size: u8) -> Self {
        self.palette_size = palette_size;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timing(mut self, shift_timing: ShiftTiming) -> Self {
        self.shift_timing = shift_timing;
        self
    }

    /// Refuse configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.width > MAX_GRID_DIM || self.height == 0 || self.height > MAX_GRID_DIM
        {
            return Err(BoardError::Configuration(format!(
                "board size {}x{} outside 1..={} per side",
                self.width, self.height, MAX_GRID_DIM
            )));
        }
        check_palette(self.palette_size)?;
        self.shift_timing.validate()?;
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(BoardError::Configuration(format!(
                "tile size {} must be finite and positive",
                self.tile_size
            )));
        }
        if self.min_run_length < 2 || self.min_run_length > MAX_GRID_DIM {
            return Err(BoardError::Configuration(format!(
                "run length {} outside 2..={}",
                self.min_run_length, MAX_GRID_DIM
            )));
        }
        Ok(())
    }

    /// Create from environment variables
    ///
    /// Reads `SKYBLOCKS_WIDTH`, `SKYBLOCKS_HEIGHT`, `SKYBLOCKS_PALETTE`,
    /// `SKYBLOCKS_SEED` and `SKYBLOCKS_SHIFT_MS`; absent or unparsable values
    /// keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr, F: Fn(&str) -> Option<String>>(
            lookup: &F,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        let shift_ms: Option<u32> = parsed(&lookup, "SKYBLOCKS_SHIFT_MS");
        let shift_timing = shift_ms
            .filter(|&ms| ms > 0)
            .map(|ms| ShiftTiming::Timed {
                duration_secs: ms as f32 / 1000.0,
            })
            .unwrap_or(defaults.shift_timing);

        Self {
            width: parsed(&lookup, "SKYBLOCKS_WIDTH").unwrap_or(defaults.width),
            height: parsed(&lookup, "SKYBLOCKS_HEIGHT").unwrap_or(defaults.height),
            palette_size: parsed(&lookup, "SKYBLOCKS_PALETTE").unwrap_or(defaults.palette_size),
            seed: parsed(&lookup, "SKYBLOCKS_SEED"),
            shift_timing,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(BoardConfig::new(0, 5, 3).validate().is_err());
        assert!(BoardConfig::new(5, 11, 3).validate().is_err());
        assert!(BoardConfig::new(5, 5, 1).validate().is_err());
        assert!(BoardConfig::new(5, 5, 8).validate().is_err());
        assert!(BoardConfig::default()
            .with_timing(ShiftTiming::Timed { duration_secs: 0.0 })
            .validate()
            .is_err());
        assert!(BoardConfig::default()
            .with_timing(ShiftTiming::FixedStep { step: f32::NAN })
            .validate()
            .is_err());

        let mut config = BoardConfig::default();
        config.min_run_length = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timed_progress_scales_with_elapsed() {
        let timing = ShiftTiming::Timed { duration_secs: 0.5 };
        assert_eq!(timing.progress_for(0.25), 0.5);
        assert_eq!(timing.progress_for(0.0), 0.0);
        assert_eq!(timing.progress_for(-1.0), 0.0);
    }

    #[test]
    fn test_fixed_step_ignores_frame_length() {
        let timing = ShiftTiming::FixedStep { step: 0.05 };
        assert_eq!(timing.progress_for(0.016), 0.05);
        assert_eq!(timing.progress_for(1.0), 0.05);
        assert_eq!(timing.progress_for(0.0), 0.0);
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = BoardConfig::from_lookup(|key| match key {
            "SKYBLOCKS_WIDTH" => Some("6".into()),
            "SKYBLOCKS_HEIGHT" => Some(" 7 ".into()),
            "SKYBLOCKS_PALETTE" => Some("4".into()),
            "SKYBLOCKS_SEED" => Some("99".into()),
            "SKYBLOCKS_SHIFT_MS" => Some("500".into()),
            _ => None,
        });
        assert_eq!(config.width, 6);
        assert_eq!(config.height, 7);
        assert_eq!(config.palette_size, 4);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.shift_timing, ShiftTiming::Timed { duration_secs: 0.5 });
    }

    #[test]
    fn test_from_lookup_falls_back_on_garbage() {
        let config = BoardConfig::from_lookup(|key| match key {
            "SKYBLOCKS_WIDTH" => Some("wide".into()),
            "SKYBLOCKS_SEED" => Some("-3".into()),
            _ => None,
        });
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_from_lookup_ignores_zero_shift() {
        let config = BoardConfig::from_lookup(|key| match key {
            "SKYBLOCKS_SHIFT_MS" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.shift_timing, BoardConfig::default().shift_timing);
        assert!(config.validate().is_ok());
    }
}
