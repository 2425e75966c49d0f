//! Mount-time configuration for the field effect.
//!
//! Values arrive either as a plain options object (deserialized with serde)
//! or as `data-fx-*` attribute overrides applied one key at a time.

use crate::constants::{DEFAULT_MAGNETIC_RADIUS, DEFAULT_MAX_PARTICLES, DEFAULT_THERMAL_RADIUS};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownKey(String),
    #[error("option `{key}` expects a number, got `{value}`")]
    InvalidNumber { key: String, value: String },
    #[error("option `{key}` expects true/false, got `{value}`")]
    InvalidFlag { key: String, value: String },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
    /// Radius of the magnetic pull around the pointer.
    pub magnetic_radius: f32,
    /// Radius inside which designated elements also get a colour shift.
    pub thermal_radius: f32,
    /// Trail particles retained between sweeps.
    pub max_particles: usize,
    pub enabled: bool,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            magnetic_radius: DEFAULT_MAGNETIC_RADIUS,
            thermal_radius: DEFAULT_THERMAL_RADIUS,
            max_particles: DEFAULT_MAX_PARTICLES,
            enabled: true,
        }
    }
}

impl EffectConfig {
    /// Apply one attribute-style override, e.g. `("magnetic-radius", "250")`.
    ///
    /// On error the configuration is left untouched.
    pub fn apply_attribute(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "magnetic-radius" | "magneticRadius" => {
                self.magnetic_radius = parse_number(key, value)?;
            }
            "thermal-radius" | "thermalRadius" => {
                self.thermal_radius = parse_number(key, value)?;
            }
            "max-particles" | "maxParticles" => {
                self.max_particles =
                    value
                        .parse::<usize>()
                        .map_err(|_| ConfigError::InvalidNumber {
                            key: key.to_string(),
                            value: value.to_string(),
                        })?;
            }
            "enabled" => {
                self.enabled = match value {
                    "" | "true" | "1" | "on" => true,
                    "false" | "0" | "off" => false,
                    _ => {
                        return Err(ConfigError::InvalidFlag {
                            key: key.to_string(),
                            value: value.to_string(),
                        })
                    }
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Start disabled when the user asked the platform for reduced motion.
    /// The page can still opt in later with an explicit enable.
    pub fn respecting_reduced_motion(mut self, reduced: bool) -> Self {
        if reduced && self.enabled {
            log::info!("[config] prefers-reduced-motion set, starting disabled");
            self.enabled = false;
        }
        self
    }

    /// Replace radii that are negative or non-finite with their defaults.
    pub fn validated(mut self) -> Self {
        if !(self.magnetic_radius.is_finite() && self.magnetic_radius >= 0.0) {
            log::warn!(
                "[config] magnetic radius {} out of range, using {}",
                self.magnetic_radius,
                DEFAULT_MAGNETIC_RADIUS
            );
            self.magnetic_radius = DEFAULT_MAGNETIC_RADIUS;
        }
        if !(self.thermal_radius.is_finite() && self.thermal_radius >= 0.0) {
            log::warn!(
                "[config] thermal radius {} out of range, using {}",
                self.thermal_radius,
                DEFAULT_THERMAL_RADIUS
            );
            self.thermal_radius = DEFAULT_THERMAL_RADIUS;
        }
        self
    }
}

fn parse_number(key: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse::<f32>().map_err(|_| ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}
