//! Simulation configuration resource.
//!
//! Settings are loaded from an INI file. Missing keys keep their defaults,
//! so a missing file is not fatal for callers that choose to ignore the
//! error.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! ; server | client
//! mode = client
//! ticks = 600
//! entities = 16
//! prediction_passes = 2
//! seed = 1
//! event_chance = 0.2
//!
//! [waddle]
//! hop_intensity_x = 0.0
//! hop_intensity_y = 0.125
//! tumble_intensity = 20.0
//! animation_length = 0.66
//! run_animation_length_multiplier = 0.568
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use thiserror::Error;

use crate::components::waddle::WaddleProfile;

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_ENTITIES: usize = 16;
const DEFAULT_PREDICTION_PASSES: u32 = 2;
const DEFAULT_SEED: u64 = 1;
const DEFAULT_EVENT_CHANCE: f32 = 0.2;
const DEFAULT_CONFIG_PATH: &str = "./waddle.ini";

/// Errors raised while loading a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("invalid value {value:?} for [{section}] {key}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Which side of the network the simulation plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum HostMode {
    /// Authoritative host: never predicts, no visual playback.
    Server,
    /// Predicting host with visual playback.
    #[default]
    Client,
}

impl FromStr for HostMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(HostMode::Server),
            "client" => Ok(HostMode::Client),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub mode: HostMode,
    /// Logical ticks to simulate.
    pub ticks: u64,
    /// Number of waddling entities to spawn.
    pub entities: usize,
    /// Speculative replays per tick. Ignored in server mode.
    pub prediction_passes: u32,
    pub seed: u64,
    /// Probability per entity per tick that the host raises an event.
    pub event_chance: f32,
    /// Profile given to every spawned waddler.
    pub profile: WaddleProfile,
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            mode: HostMode::default(),
            ticks: DEFAULT_TICKS,
            entities: DEFAULT_ENTITIES,
            prediction_passes: DEFAULT_PREDICTION_PASSES,
            seed: DEFAULT_SEED,
            event_chance: DEFAULT_EVENT_CHANCE,
            profile: WaddleProfile::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a default configuration that loads from `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Replays actually executed per tick for the current mode.
    pub fn effective_prediction_passes(&self) -> u32 {
        match self.mode {
            HostMode::Server => 0,
            HostMode::Client => self.prediction_passes,
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply_ini(&ini)?;
        info!("Loaded configuration from {}", self.config_path.display());
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply_ini(&ini)
    }

    fn apply_ini(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [simulation] section
        if let Some(mode) = ini.get("simulation", "mode") {
            self.mode = mode.parse().map_err(|value| ConfigError::InvalidValue {
                section: "simulation",
                key: "mode",
                value,
            })?;
        }
        if let Some(ticks) = parse_key(ini, "simulation", "ticks")? {
            self.ticks = ticks;
        }
        if let Some(entities) = parse_key(ini, "simulation", "entities")? {
            self.entities = entities;
        }
        if let Some(passes) = parse_key(ini, "simulation", "prediction_passes")? {
            self.prediction_passes = passes;
        }
        if let Some(seed) = parse_key(ini, "simulation", "seed")? {
            self.seed = seed;
        }
        if let Some(chance) = parse_key::<f32>(ini, "simulation", "event_chance")? {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::InvalidValue {
                    section: "simulation",
                    key: "event_chance",
                    value: chance.to_string(),
                });
            }
            self.event_chance = chance;
        }

        // [waddle] section
        if let Some(x) = parse_key(ini, "waddle", "hop_intensity_x")? {
            self.profile.hop_intensity.0 = x;
        }
        if let Some(y) = parse_key(ini, "waddle", "hop_intensity_y")? {
            self.profile.hop_intensity.1 = y;
        }
        if let Some(tumble) = parse_key(ini, "waddle", "tumble_intensity")? {
            self.profile.tumble_intensity = tumble;
        }
        if let Some(length) = parse_key(ini, "waddle", "animation_length")? {
            self.profile.animation_length = length;
        }
        if let Some(multiplier) = parse_key(ini, "waddle", "run_animation_length_multiplier")? {
            self.profile.run_animation_length_multiplier = multiplier;
        }
        Ok(())
    }
}

fn parse_key<T: FromStr>(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = ini.get(section, key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            section,
            key,
            value: raw,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_profile() {
        let config = SimConfig::new();
        assert_eq!(config.mode, HostMode::Client);
        assert_eq!(config.profile, WaddleProfile::default());
        assert_eq!(config.effective_prediction_passes(), DEFAULT_PREDICTION_PASSES);
    }

    #[test]
    fn overrides_only_present_keys() {
        let mut config = SimConfig::new();
        config
            .load_from_str(
                "[simulation]\nmode = server\nticks = 10\nseed = 99\n\n[waddle]\ntumble_intensity = 35.5\n",
            )
            .unwrap();
        assert_eq!(config.mode, HostMode::Server);
        assert_eq!(config.ticks, 10);
        assert_eq!(config.seed, 99);
        assert_eq!(config.entities, DEFAULT_ENTITIES);
        assert_eq!(config.profile.tumble_intensity, 35.5);
        assert_eq!(config.profile.animation_length, 0.66);
        assert_eq!(config.effective_prediction_passes(), 0);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = SimConfig::new();
        let err = config
            .load_from_str("[simulation]\nticks = lots\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "ticks", .. }
        ));

        let err = config
            .load_from_str("[simulation]\nmode = observer\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "mode", .. }));

        let err = config
            .load_from_str("[simulation]\nevent_chance = 1.5\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "event_chance", .. }
        ));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let mut config = SimConfig::with_path("/nonexistent/waddle.ini");
        assert!(matches!(
            config.load_from_file(),
            Err(ConfigError::Load { .. })
        ));
    }
}
