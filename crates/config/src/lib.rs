//! Configuration models and loaders for the stellar orrery.
//!
//! A configuration file describes the star's initial inputs, the playback
//! clock, the explosion effect, and the catalog of orbiting bodies and belts.
//! Every section has defaults, so an empty file yields the built-in system.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Upper bound on generated particles per belt.
pub const MAX_BELT_PARTICLES: usize = 20_000;

/// Complete simulation configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Seed for belt generation; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub star: StarConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub explosion: ExplosionConfig,
    /// Exponential smoothing rate (1/s) for displayed positions; 0 disables it.
    #[serde(default = "default_smoothing_rate")]
    pub smoothing_rate: f64,
    #[serde(default = "default_bodies")]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub belts: BeltsConfig,
}

/// Initial star inputs.
#[derive(Debug, Deserialize, Clone)]
pub struct StarConfig {
    /// Solar masses.
    #[serde(default = "default_mass")]
    pub initial_mass: f64,
    /// Billions of years.
    #[serde(default)]
    pub initial_age: f64,
}

/// Playback cadence.
#[derive(Debug, Deserialize, Clone)]
pub struct ClockConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_age_step")]
    pub age_step: f64,
}

/// Explosion effect tuning.
#[derive(Debug, Deserialize, Clone)]
pub struct ExplosionConfig {
    #[serde(default = "default_explosion_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_peak_scale")]
    pub peak_star_scale: f64,
    #[serde(default = "default_shockwave_radius")]
    pub shockwave_max_radius: f64,
}

/// One catalog body.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub base_distance: f64,
    pub base_size: f64,
    pub base_angular_speed: f64,
    #[serde(default)]
    pub vertical_offset: f64,
    #[serde(default)]
    pub orbit: OrbitConfig,
    #[serde(default)]
    pub has_satellite: bool,
    #[serde(default)]
    pub has_ring_system: bool,
}

/// Orbit shape as written in configuration files.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(tag = "type")]
pub enum OrbitConfig {
    #[default]
    #[serde(rename = "circular")]
    Circular,
    #[serde(rename = "eccentric")]
    Eccentric {
        eccentricity: f64,
        #[serde(default)]
        inclination_deg: f64,
    },
}

/// Both particle belts.
#[derive(Debug, Deserialize, Clone)]
pub struct BeltsConfig {
    #[serde(default = "default_inner_belt")]
    pub inner: BeltConfig,
    #[serde(default = "default_outer_belt")]
    pub outer: BeltConfig,
}

/// Parameter ranges for a randomly generated belt.
#[derive(Debug, Deserialize, Clone)]
pub struct BeltConfig {
    pub count: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Angular speed of a particle at `inner_radius`; falls off as `r^-1.5`.
    pub base_angular_speed: f64,
    /// Relative random spread applied to each particle's speed.
    #[serde(default)]
    pub speed_jitter: f64,
    /// Half-height of the band of vertical offsets.
    #[serde(default)]
    pub vertical_spread: f64,
    pub min_size: f64,
    pub max_size: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            star: StarConfig::default(),
            clock: ClockConfig::default(),
            explosion: ExplosionConfig::default(),
            smoothing_rate: default_smoothing_rate(),
            bodies: default_bodies(),
            belts: BeltsConfig::default(),
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            initial_mass: default_mass(),
            initial_age: 0.0,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            age_step: default_age_step(),
        }
    }
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_explosion_ms(),
            peak_star_scale: default_peak_scale(),
            shockwave_max_radius: default_shockwave_radius(),
        }
    }
}

impl Default for BeltsConfig {
    fn default() -> Self {
        Self {
            inner: default_inner_belt(),
            outer: default_outer_belt(),
        }
    }
}

impl SimulationConfig {
    /// Check ranges the model relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.star.initial_mass.is_finite() || self.star.initial_mass <= 0.0 {
            return Err(invalid("star.initial_mass must be positive and finite"));
        }
        if !self.star.initial_age.is_finite() {
            return Err(invalid("star.initial_age must be finite"));
        }
        if self.clock.tick_ms == 0 {
            return Err(invalid("clock.tick_ms must be positive"));
        }
        if !(self.clock.age_step.is_finite() && self.clock.age_step > 0.0) {
            return Err(invalid("clock.age_step must be positive"));
        }
        if !(self.explosion.peak_star_scale.is_finite() && self.explosion.peak_star_scale > 0.0) {
            return Err(invalid("explosion.peak_star_scale must be positive"));
        }
        let radius = self.explosion.shockwave_max_radius;
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(invalid("explosion.shockwave_max_radius must be finite and >= 0"));
        }
        if !self.smoothing_rate.is_finite() || self.smoothing_rate < 0.0 {
            return Err(invalid("smoothing_rate must be zero or positive"));
        }
        for body in &self.bodies {
            body.validate()?;
        }
        self.belts.inner.validate("belts.inner")?;
        self.belts.outer.validate("belts.outer")?;
        Ok(())
    }
}

impl BodyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_distance.is_finite() && self.base_distance > 0.0) {
            return Err(invalid(format!("{}: base_distance must be positive", self.name)));
        }
        if !(self.base_size.is_finite() && self.base_size > 0.0) {
            return Err(invalid(format!("{}: base_size must be positive", self.name)));
        }
        if !self.base_angular_speed.is_finite() || !self.vertical_offset.is_finite() {
            return Err(invalid(format!("{}: speeds and offsets must be finite", self.name)));
        }
        if let OrbitConfig::Eccentric {
            eccentricity,
            inclination_deg,
        } = self.orbit
        {
            if !(0.0..1.0).contains(&eccentricity) {
                return Err(invalid(format!(
                    "{}: eccentricity must lie in [0, 1), got {eccentricity}",
                    self.name
                )));
            }
            if !inclination_deg.is_finite() {
                return Err(invalid(format!("{}: inclination must be finite", self.name)));
            }
        }
        Ok(())
    }
}

impl BeltConfig {
    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.count > MAX_BELT_PARTICLES {
            return Err(invalid(format!(
                "{section}: count {} exceeds {MAX_BELT_PARTICLES}",
                self.count
            )));
        }
        if !(self.inner_radius > 0.0
            && self.inner_radius < self.outer_radius
            && self.outer_radius.is_finite())
        {
            return Err(invalid(format!(
                "{section}: need 0 < inner_radius < outer_radius, both finite"
            )));
        }
        if !(self.min_size > 0.0 && self.min_size <= self.max_size && self.max_size.is_finite()) {
            return Err(invalid(format!(
                "{section}: need 0 < min_size <= max_size, both finite"
            )));
        }
        if !self.base_angular_speed.is_finite()
            || !(0.0..1.0).contains(&self.speed_jitter)
            || !(self.vertical_spread.is_finite() && self.vertical_spread >= 0.0)
        {
            return Err(invalid(format!(
                "{section}: speed, jitter in [0, 1), and vertical_spread >= 0 required"
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Load a simulation configuration from YAML or TOML (by extension) and validate it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, ConfigError> {
    let path = path.as_ref();
    let config: SimulationConfig = if has_toml_extension(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    config.validate()?;
    Ok(config)
}

/// Load a body catalog: a YAML list, a single TOML body, or a directory of
/// per-body TOML files (read in file-name order).
pub fn load_body_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    let bodies: Vec<BodyConfig> = load_records(path)?;
    for body in &bodies {
        body.validate()?;
    }
    Ok(bodies)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if has_toml_extension(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_toml_extension(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn has_toml_extension(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn default_mass() -> f64 {
    1.0
}

fn default_tick_ms() -> u64 {
    50
}

fn default_age_step() -> f64 {
    0.05
}

fn default_explosion_ms() -> u64 {
    2_000
}

fn default_peak_scale() -> f64 {
    20.0
}

fn default_shockwave_radius() -> f64 {
    60.0
}

fn default_smoothing_rate() -> f64 {
    8.0
}

fn planet(name: &str, distance: f64, size: f64, speed: f64) -> BodyConfig {
    BodyConfig {
        name: name.to_string(),
        base_distance: distance,
        base_size: size,
        base_angular_speed: speed,
        vertical_offset: 0.0,
        orbit: OrbitConfig::Circular,
        has_satellite: false,
        has_ring_system: false,
    }
}

/// Built-in catalog: eight planets and one eccentric, inclined dwarf planet.
pub fn default_bodies() -> Vec<BodyConfig> {
    vec![
        planet("Mercury", 2.0, 0.12, 1.6),
        planet("Venus", 2.6, 0.28, 1.2),
        BodyConfig {
            has_satellite: true,
            ..planet("Earth", 3.4, 0.30, 1.0)
        },
        planet("Mars", 4.4, 0.20, 0.8),
        planet("Jupiter", 7.5, 0.90, 0.45),
        BodyConfig {
            has_ring_system: true,
            ..planet("Saturn", 10.0, 0.75, 0.35)
        },
        planet("Uranus", 13.0, 0.50, 0.25),
        planet("Neptune", 16.0, 0.48, 0.2),
        BodyConfig {
            orbit: OrbitConfig::Eccentric {
                eccentricity: 0.25,
                inclination_deg: 17.0,
            },
            ..planet("Pluto", 19.0, 0.08, 0.15)
        },
    ]
}

fn default_inner_belt() -> BeltConfig {
    BeltConfig {
        count: 600,
        inner_radius: 5.2,
        outer_radius: 6.6,
        base_angular_speed: 0.6,
        speed_jitter: 0.2,
        vertical_spread: 0.15,
        min_size: 0.02,
        max_size: 0.06,
    }
}

fn default_outer_belt() -> BeltConfig {
    BeltConfig {
        count: 1_500,
        inner_radius: 21.0,
        outer_radius: 28.0,
        base_angular_speed: 0.12,
        speed_jitter: 0.2,
        vertical_spread: 0.8,
        min_size: 0.03,
        max_size: 0.08,
    }
}
