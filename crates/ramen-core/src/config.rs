//! Configuration loading and typed config structures for the ramen stall.
//!
//! The configuration lives in `ramen-config.yaml`. Every field has a
//! default, so an empty file (or no file) yields a playable game with the
//! standard catalog.

use std::path::{Path, PathBuf};

use ramen_catalog::{CatalogError, RecipeCatalog};
use ramen_seating::SeatingConfig;
use ramen_types::MenuId;
use rand::SeedableRng;
use rand::rngs::StdRng;
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

    /// A value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// The embedded catalog is inconsistent.
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration. Mirrors `ramen-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Stall layout and starting resources.
    #[serde(default)]
    pub stall: StallConfig,

    /// Customer arrival timing.
    #[serde(default)]
    pub spawn: SpawnConfig,

    /// Reward and combo tuning.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Loop and presentation timing.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Save file location.
    #[serde(default)]
    pub save: SaveConfig,

    /// Recipes, ingredients, and archetypes.
    #[serde(default)]
    pub catalog: RecipeCatalog,
}

impl GameConfig {
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

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Check ranges and catalog consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for out-of-range values and
    /// [`ConfigError::Catalog`] for an inconsistent catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stall.seats == 0 {
            return Err(invalid("stall.seats must be at least 1"));
        }
        if self.stall.pots == 0 {
            return Err(invalid("stall.pots must be at least 1"));
        }
        if self.stall.max_lives == 0 {
            return Err(invalid("stall.max_lives must be at least 1"));
        }
        if self.spawn.interval_min_ms > self.spawn.interval_max_ms {
            return Err(invalid(
                "spawn.interval_min_ms must not exceed spawn.interval_max_ms",
            ));
        }
        if self.scoring.combo_threshold == 0 {
            return Err(invalid("scoring.combo_threshold must be at least 1"));
        }
        if !self.scoring.speed_bonus_ratio.is_finite() || self.scoring.speed_bonus_ratio < 0.0 {
            return Err(invalid("scoring.speed_bonus_ratio must be a non-negative number"));
        }
        if self.timing.tick_interval_ms == 0 {
            return Err(invalid("timing.tick_interval_ms must be at least 1"));
        }

        self.catalog.validate()?;

        if self.catalog.recipe(&self.stall.default_menu).is_none() {
            return Err(invalid(&format!(
                "stall.default_menu {} is not in the catalog",
                self.stall.default_menu
            )));
        }
        if !self.stall.starting_menus.contains(&self.stall.default_menu) {
            return Err(invalid(&format!(
                "stall.default_menu {} must be one of stall.starting_menus",
                self.stall.default_menu
            )));
        }
        if let Some(menu) = self
            .stall
            .starting_menus
            .iter()
            .find(|m| self.catalog.recipe(m).is_none())
        {
            return Err(invalid(&format!(
                "stall.starting_menus entry {menu} is not in the catalog"
            )));
        }
        Ok(())
    }

    /// Settings handed to the seating manager.
    pub fn seating(&self) -> SeatingConfig {
        SeatingConfig {
            seats: self.stall.seats,
            spawn_interval_min_ms: self.spawn.interval_min_ms,
            spawn_interval_max_ms: self.spawn.interval_max_ms,
            serve_clear_delay_ms: self.timing.serve_clear_delay_ms,
            speed_bonus_ratio: self.scoring.speed_bonus_ratio,
            default_menu: self.stall.default_menu.clone(),
        }
    }

    /// Random source for customer generation: seeded when `spawn.seed` is
    /// set, otherwise from the operating system.
    pub fn spawn_rng(&self) -> StdRng {
        self.spawn
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

/// Stall layout and starting resources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StallConfig {
    /// Number of customer seats.
    #[serde(default = "default_seats")]
    pub seats: usize,

    /// Number of cooking pots.
    #[serde(default = "default_pots")]
    pub pots: usize,

    /// Lives at the start of each session.
    #[serde(default = "default_max_lives")]
    pub max_lives: u32,

    /// Currency of a save that has never been written.
    #[serde(default)]
    pub starting_money: u64,

    /// Menu ordered when no allowed menu is unlocked.
    #[serde(default = "default_menu")]
    pub default_menu: MenuId,

    /// Menus every player owns from the start.
    #[serde(default = "default_starting_menus")]
    pub starting_menus: Vec<MenuId>,
}

impl Default for StallConfig {
    fn default() -> Self {
        Self {
            seats: default_seats(),
            pots: default_pots(),
            max_lives: default_max_lives(),
            starting_money: 0,
            default_menu: default_menu(),
            starting_menus: default_starting_menus(),
        }
    }
}

/// Customer arrival timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnConfig {
    /// Shortest delay between arrivals.
    #[serde(default = "default_interval_min_ms")]
    pub interval_min_ms: u64,

    /// Longest delay between arrivals.
    #[serde(default = "default_interval_max_ms")]
    pub interval_max_ms: u64,

    /// Seed for reproducible arrivals.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_min_ms: default_interval_min_ms(),
            interval_max_ms: default_interval_max_ms(),
            seed: None,
        }
    }
}

/// Reward and combo tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoringConfig {
    /// Share of the base price paid for a fully patient customer.
    #[serde(default = "default_speed_bonus_ratio")]
    pub speed_bonus_ratio: f64,

    /// Streak multiple that grants the combo bonus.
    #[serde(default = "default_combo_threshold")]
    pub combo_threshold: u32,

    /// Flat bonus per combo.
    #[serde(default = "default_combo_bonus")]
    pub combo_bonus: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            speed_bonus_ratio: default_speed_bonus_ratio(),
            combo_threshold: default_combo_threshold(),
            combo_bonus: default_combo_bonus(),
        }
    }
}

/// Loop and presentation timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// How long a served customer stays visible on the way out.
    #[serde(default = "default_serve_clear_delay_ms")]
    pub serve_clear_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            serve_clear_delay_ms: default_serve_clear_delay_ms(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Save file location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveConfig {
    /// Path of the JSON save file.
    #[serde(default = "default_save_path")]
    pub path: PathBuf,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: default_save_path(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_seats() -> usize {
    5
}

const fn default_pots() -> usize {
    2
}

const fn default_max_lives() -> u32 {
    3
}

fn default_menu() -> MenuId {
    MenuId::from("basic")
}

fn default_starting_menus() -> Vec<MenuId> {
    vec![MenuId::from("basic"), MenuId::from("egg")]
}

const fn default_interval_min_ms() -> u64 {
    3000
}

const fn default_interval_max_ms() -> u64 {
    8000
}

const fn default_speed_bonus_ratio() -> f64 {
    0.5
}

const fn default_combo_threshold() -> u32 {
    3
}

const fn default_combo_bonus() -> u64 {
    500
}

const fn default_tick_interval_ms() -> u64 {
    16
}

const fn default_serve_clear_delay_ms() -> u64 {
    800
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_save_path() -> PathBuf {
    PathBuf::from("ramen-save.json")
}
