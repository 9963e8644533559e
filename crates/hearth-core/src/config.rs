//! Run settings for a Hearth simulation.
//!
//! [`SimulationConfig`] covers what differs between runs: grid size, seed,
//! starting counts, pacing, limits, and presentation. The simulation's own
//! constants live in `WorldConfig` and `AgentConfig` and are not read from
//! YAML. Every section defaults, so an empty file is a valid config.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level run configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid dimensions and seed.
    #[serde(default)]
    pub world: GridConfig,

    /// Starting agent and resource counts.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Pacing and end conditions.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Terminal output.
    #[serde(default)]
    pub presentation: PresentationConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. Blank input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Grid settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Columns.
    #[serde(default = "default_width")]
    pub width: i32,

    /// Rows.
    #[serde(default = "default_height")]
    pub height: i32,

    /// Random seed; absent means seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            seed: None,
        }
    }
}

/// Bootstrap counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Founding agents, placed on random cells.
    #[serde(default = "default_initial_agents")]
    pub initial_agents: u32,

    /// Food piles scattered at start.
    #[serde(default = "default_initial_food")]
    pub initial_food: u32,

    /// Wood piles scattered at start.
    #[serde(default = "default_initial_wood")]
    pub initial_wood: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_agents: default_initial_agents(),
            initial_food: default_initial_food(),
            initial_wood: default_initial_wood(),
        }
    }
}

/// Pacing and end conditions.
///
/// A value of 0 for `max_ticks` or `max_real_time_seconds` means unlimited.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum number of ticks before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,

    /// Ticks an empty world is tolerated before extinction is declared.
    #[serde(default = "default_extinction_grace_ticks")]
    pub extinction_grace_ticks: u64,

    /// Population above this fraction of the map area ends the run.
    #[serde(default = "default_overpopulation_fraction")]
    pub overpopulation_fraction: f64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            max_real_time_seconds: 0,
            extinction_grace_ticks: default_extinction_grace_ticks(),
            overpopulation_fraction: default_overpopulation_fraction(),
        }
    }
}

/// Terminal rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresentationConfig {
    /// Draw the world after ticks.
    #[serde(default = "default_true")]
    pub render: bool,

    /// Draw every Nth tick.
    #[serde(default = "default_render_every")]
    pub render_every: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            render: true,
            render_every: default_render_every(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    /// Defaults to `warn` so log lines do not land inside the rendered grid.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_width() -> i32 {
    70
}

const fn default_height() -> i32 {
    30
}

const fn default_initial_agents() -> u32 {
    15
}

const fn default_initial_food() -> u32 {
    120
}

const fn default_initial_wood() -> u32 {
    80
}

const fn default_tick_interval_ms() -> u64 {
    150
}

const fn default_extinction_grace_ticks() -> u64 {
    100
}

const fn default_overpopulation_fraction() -> f64 {
    0.5
}

const fn default_true() -> bool {
    true
}

const fn default_render_every() -> u64 {
    1
}

fn default_log_level() -> String {
    "warn".to_owned()
}
