//! Per-grid configuration, loadable from TOML or JSON.
//!
//! Every field has a default so a config file only needs the values it
//! changes. Loaders validate before returning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// What a move across the outer edge of the grid does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// The move is a no-op.
    #[default]
    Clamp,
    /// The move is reported so the owner can hand focus to a sibling panel.
    Handoff,
}

/// Bounded-pool renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Layout width in cells.
    pub columns: usize,
    /// Extra always-visible empty slots after the last item.
    pub trailing_buffer: usize,
    /// Whether trailing empty slots can receive focus.
    pub placeholders_selectable: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            trailing_buffer: 0,
            placeholders_selectable: false,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(GridError::Config("pool.columns must be at least 1".into()));
        }
        Ok(())
    }
}

/// Windowed (virtualized) renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Layout width in cells.
    pub columns: usize,
    /// Rows kept bound beyond the visible ones.
    pub buffer_rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    /// Height of the scroll viewport in pixels.
    pub viewport_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            buffer_rows: 2,
            cell_width: 64.0,
            cell_height: 64.0,
            spacing_x: 4.0,
            spacing_y: 4.0,
            viewport_height: 272.0,
        }
    }
}

impl WindowConfig {
    /// Vertical distance between the tops of two consecutive rows.
    pub fn row_height(&self) -> f32 {
        self.cell_height + self.spacing_y
    }

    /// Horizontal distance between the left edges of two consecutive columns.
    pub fn column_width(&self) -> f32 {
        self.cell_width + self.spacing_x
    }

    /// Rows needed to cover the viewport (at least one).
    pub fn visible_rows(&self) -> usize {
        let rows = (self.viewport_height / self.row_height()).ceil();
        if rows.is_finite() && rows >= 1.0 {
            rows as usize
        } else {
            1
        }
    }

    /// Fixed pool length: `(visible_rows + buffer_rows) * columns`.
    pub fn pool_len(&self) -> usize {
        (self.visible_rows() + self.buffer_rows) * self.columns
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(GridError::Config("window.columns must be at least 1".into()));
        }
        for (name, value) in [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("viewport_height", self.viewport_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::Config(format!(
                    "window.{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [("spacing_x", self.spacing_x), ("spacing_y", self.spacing_y)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::Config(format!(
                    "window.{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Held-input repeat cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatConfig {
    /// Delay between the press and the first repeat.
    pub initial_delay_ms: u32,
    /// Delay between subsequent repeats.
    pub interval_ms: u32,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 300,
            interval_ms: 100,
        }
    }
}

impl RepeatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(GridError::Config("repeat.interval_ms must be at least 1".into()));
        }
        Ok(())
    }
}

/// Complete configuration for a panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub edge_policy: EdgePolicy,
    pub pool: PoolConfig,
    pub window: WindowConfig,
    pub repeat: RepeatConfig,
}

impl GridConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        };
        match &config {
            Ok(_) => log::debug!("Loaded grid config from {}", path.display()),
            Err(e) => log::error!("Rejected grid config {}: {e}", path.display()),
        }
        config
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.pool.validate()?;
        self.window.validate()?;
        self.repeat.validate()
    }
}
