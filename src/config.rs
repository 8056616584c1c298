use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use egui::Color32;
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV_VAR: &str = "BITMAP_PAINT_CONFIG";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "bitmap_paint.json";

/// An opaque RGB triple as stored in the config file.
pub type Rgb = [u8; 3];

pub const BLUE: Rgb = [0, 64, 128];
pub const ORANGE: Rgb = [255, 165, 0];
pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
pub const RED: Rgb = [200, 32, 32];
pub const GREEN: Rgb = [32, 160, 64];
pub const YELLOW: Rgb = [240, 220, 48];

pub fn to_color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Application settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    pub refresh_rate_hz: u32,
    pub foreground: Rgb,
    pub background: Rgb,
    pub font_path: PathBuf,
    pub font_width: u32,
    pub font_height: u32,
    /// Sheet pixels of exactly this colour are transparent. `null` draws every pixel.
    pub font_colorkey: Option<Rgb>,
    pub key_repeat_delay_ms: u64,
    pub key_repeat_interval_ms: u64,
    pub line_thickness: u32,
    pub max_line_thickness: u32,
    pub palette: Vec<Rgb>,
    /// Initial window size as a multiple of the screen size
    pub window_scale: f32,
    /// Swallow the first character typed after the Type tool is activated
    pub drop_first_typed_char: bool,
    /// Half-period of the Type tool's cursor blink
    pub cursor_blink_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 320,
            screen_height: 240,
            refresh_rate_hz: 100,
            foreground: WHITE,
            background: BLUE,
            font_path: PathBuf::from("font-7x9.png"),
            font_width: 7,
            font_height: 9,
            font_colorkey: Some(BLACK),
            key_repeat_delay_ms: 200,
            key_repeat_interval_ms: 100,
            line_thickness: 1,
            max_line_thickness: 16,
            palette: vec![WHITE, ORANGE, BLACK, BLUE, RED, GREEN, YELLOW],
            window_scale: 3.0,
            drop_first_typed_char: false,
            cursor_blink_ms: 500,
        }
    }
}

impl Config {
    /// Load the config from `BITMAP_PAINT_CONFIG`, then `bitmap_paint.json`,
    /// falling back to the defaults when neither exists.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }

        log::info!("No config file found, using defaults");
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the application cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.screen_width == 0 {
            return Err(invalid("screen_width", "must be positive"));
        }
        if self.screen_height == 0 {
            return Err(invalid("screen_height", "must be positive"));
        }
        if self.refresh_rate_hz == 0 {
            return Err(invalid("refresh_rate_hz", "must be positive"));
        }
        if self.font_width == 0 {
            return Err(invalid("font_width", "must be positive"));
        }
        if self.font_height == 0 || self.font_height > self.screen_height {
            return Err(invalid("font_height", "must be positive and fit on screen"));
        }
        if self.palette.is_empty() {
            return Err(invalid("palette", "needs at least one colour"));
        }
        let widest = self.screen_width.max(self.screen_height);
        if self.max_line_thickness == 0 || self.max_line_thickness > widest {
            return Err(invalid(
                "max_line_thickness",
                "must be positive and no wider than the screen",
            ));
        }
        if self.line_thickness > widest {
            return Err(invalid("line_thickness", "must be no wider than the screen"));
        }
        if self.window_scale.is_nan() || self.window_scale <= 0.0 {
            return Err(invalid("window_scale", "must be positive"));
        }
        Ok(())
    }

    pub fn foreground_color(&self) -> Color32 {
        to_color(self.foreground)
    }

    pub fn background_color(&self) -> Color32 {
        to_color(self.background)
    }

    pub fn font_colorkey_color(&self) -> Option<Color32> {
        self.font_colorkey.map(to_color)
    }

    pub fn palette_colors(&self) -> Vec<Color32> {
        self.palette.iter().copied().map(to_color).collect()
    }

    /// Line thickness clamped to the supported range
    pub fn initial_thickness(&self) -> u32 {
        self.line_thickness.clamp(1, self.max_line_thickness)
    }

    /// Top of the one-line status bar at the bottom of the screen
    pub fn bottom_bar_y(&self) -> i32 {
        (self.screen_height - self.font_height) as i32
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.refresh_rate_hz))
    }

    pub fn key_repeat_delay(&self) -> Duration {
        Duration::from_millis(self.key_repeat_delay_ms)
    }

    pub fn key_repeat_interval(&self) -> Duration {
        Duration::from_millis(self.key_repeat_interval_ms)
    }
}
