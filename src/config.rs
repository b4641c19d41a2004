use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::pacing::Pacing;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Terminal columns used to draw one cell. Two columns keep cells roughly square.
pub const DEFAULT_TILE_WIDTH: u16 = 2;

/// Widest tile the renderer accepts.
pub const MAX_TILE_WIDTH: u16 = 4;

/// Delay before the first food is eaten.
pub const INITIAL_DELAY_MS: u64 = 150;

/// Delay floor; the game never runs faster than this.
pub const MIN_DELAY_MS: u64 = 40;

/// Amount the delay shrinks each time food is eaten.
pub const DELAY_STEP_MS: u64 = 5;

/// Logical grid dimensions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Colors used by the terminal renderer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub grid_bg: Color,
    pub border_fg: Color,
    pub status_fg: Color,
    pub game_over_fg: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    grid_bg: Color::Black,
    border_fg: Color::DarkGray,
    status_fg: Color::White,
    game_over_fg: Color::LightRed,
};

pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_SNAKE_TAIL: &str = "▒";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid {width}x{height} is too small; need at least 2x1 for the starting snake")]
    GridTooSmall { width: u16, height: u16 },
    #[error("tile width must be between 1 and {max}, got {0}", max = MAX_TILE_WIDTH)]
    TileWidth(u16),
    #[error("delays must be positive and the minimum ({min_ms} ms) cannot exceed the initial ({initial_ms} ms)")]
    Delays { initial_ms: u64, min_ms: u64 },
}

/// Pacing as written in a settings file, in milliseconds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    pub initial_delay_ms: u64,
    pub min_delay_ms: u64,
    pub delay_step_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: INITIAL_DELAY_MS,
            min_delay_ms: MIN_DELAY_MS,
            delay_step_ms: DELAY_STEP_MS,
        }
    }
}

impl PacingSettings {
    #[must_use]
    pub fn to_pacing(self) -> Pacing {
        Pacing {
            initial: Duration::from_millis(self.initial_delay_ms),
            step: Duration::from_millis(self.delay_step_ms),
            floor: Duration::from_millis(self.min_delay_ms),
        }
    }
}

/// Full game configuration.
///
/// Any field missing from a settings file keeps its default, so a file may
/// override only the grid or only the pacing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub tile_width: u16,
    pub pacing: PacingSettings,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            tile_width: DEFAULT_TILE_WIDTH,
            pacing: PacingSettings::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads a JSON settings file. Fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        // reset() places a head plus one segment to its left.
        if width < 2 || height < 1 {
            return Err(ConfigError::GridTooSmall { width, height });
        }

        if self.tile_width == 0 || self.tile_width > MAX_TILE_WIDTH {
            return Err(ConfigError::TileWidth(self.tile_width));
        }

        let PacingSettings {
            initial_delay_ms,
            min_delay_ms,
            ..
        } = self.pacing;
        if min_delay_ms == 0 || min_delay_ms > initial_delay_ms {
            return Err(ConfigError::Delays {
                initial_ms: initial_delay_ms,
                min_ms: min_delay_ms,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ConfigError, GameConfig, GridSize, INITIAL_DELAY_MS, MIN_DELAY_MS};

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.pacing.initial_delay_ms, INITIAL_DELAY_MS);
        assert_eq!(config.pacing.min_delay_ms, MIN_DELAY_MS);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = GameConfig::from_json(r#"{ "grid": { "width": 10, "height": 10 }, "seed": 7 }"#)
            .expect("settings should parse");

        assert_eq!(
            config.grid,
            GridSize {
                width: 10,
                height: 10
            }
        );
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tile_width, GameConfig::default().tile_width);
        assert_eq!(config.pacing, GameConfig::default().pacing);
    }

    #[test]
    fn pacing_overrides_are_read_in_milliseconds() {
        let config = GameConfig::from_json(r#"{ "pacing": { "initial_delay_ms": 300 } }"#)
            .expect("settings should parse");
        let pacing = config.pacing.to_pacing();

        assert_eq!(pacing.initial.as_millis(), 300);
        assert_eq!(pacing.floor.as_millis(), u128::from(MIN_DELAY_MS));
    }

    #[test]
    fn grid_narrower_than_starting_snake_is_rejected() {
        let config = GameConfig {
            grid: GridSize {
                width: 1,
                height: 5,
            },
            ..GameConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { width: 1, height: 5 })
        ));
    }

    #[test]
    fn zero_tile_width_is_rejected() {
        let config = GameConfig {
            tile_width: 0,
            ..GameConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::TileWidth(0))));
    }

    #[test]
    fn floor_above_initial_delay_is_rejected() {
        let mut config = GameConfig::default();
        config.pacing.min_delay_ms = config.pacing.initial_delay_ms + 1;

        assert!(matches!(config.validate(), Err(ConfigError::Delays { .. })));
    }

    #[test]
    fn missing_settings_file_reports_path() {
        let error = GameConfig::load(Path::new("/nonexistent/grid-snake.json"))
            .expect_err("missing file should fail");

        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("grid-snake.json"));
    }

    #[test]
    fn malformed_settings_are_a_parse_error() {
        assert!(GameConfig::from_json("not-json").is_err());
    }
}
