//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{FissionError, Result};
use crate::core::types::{Rect, Vec2};

/// Configuration for the chain reaction simulation
///
/// Defaults reproduce the classic 800x600 canvas driven at 20 ticks per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === BOUNDED AREA ===
    /// Width of the simulation area (world units)
    pub width: f64,

    /// Height of the simulation area (world units)
    pub height: f64,

    /// Inset from every edge used by random and grid placement
    ///
    /// Also bounds the region where injected neutrons appear, so a fresh
    /// neutron always has at least `margin` units to travel before leaving.
    pub margin: f64,

    // === PARTICLES ===
    /// Drawn radius of an atom. Visual only.
    pub atom_radius: f64,

    /// Drawn radius of a neutron. Visual only.
    pub neutron_radius: f64,

    /// Centre distance below which a neutron strikes an atom
    ///
    /// Must stay larger than `neutron_speed / 2`, otherwise a neutron aimed
    /// straight at an atom can step across it without ever registering contact.
    pub contact_radius: f64,

    /// Distance every neutron travels per tick
    pub neutron_speed: f64,

    /// Neutrons emitted by every fission
    ///
    /// Anything above 1 makes the reaction supercritical on a dense layout.
    pub offspring_per_fission: usize,

    // === SCHEDULING ===
    /// Interval between ticks when running in real time (milliseconds)
    pub tick_interval_ms: u64,

    // === LAYOUT PARAMETERS ===
    /// Grid spacing used when none is supplied
    pub default_grid_spacing: f64,

    /// Accepted grid spacing range (inclusive)
    pub grid_spacing_range: (f64, f64),

    /// Circle radius used when none is supplied
    pub default_circle_radius: f64,

    /// Accepted circle radius range (inclusive)
    pub circle_radius_range: (f64, f64),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 50.0,

            atom_radius: 5.0,
            neutron_radius: 2.0,
            contact_radius: 8.0,
            neutron_speed: 3.0,
            offspring_per_fission: 3,

            tick_interval_ms: 50,

            default_grid_spacing: 50.0,
            grid_spacing_range: (20.0, 100.0),
            default_circle_radius: 150.0,
            circle_radius_range: (50.0, 300.0),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(FissionError::InvalidConfig(format!(
                "area must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.margin < 0.0 || self.margin * 2.0 >= self.width.min(self.height) {
            return Err(FissionError::InvalidConfig(format!(
                "margin ({}) must be >= 0 and less than half of the smaller dimension ({})",
                self.margin,
                self.width.min(self.height)
            )));
        }

        // Random placement and injection draw whole-unit coordinates
        let first = self.margin.ceil();
        if first > (self.width - self.margin).floor() || first > (self.height - self.margin).floor() {
            return Err(FissionError::InvalidConfig(format!(
                "interior [{m}, {w} - {m}] x [{m}, {h} - {m}] holds no whole-unit coordinate",
                m = self.margin,
                w = self.width,
                h = self.height
            )));
        }

        if self.contact_radius <= 0.0 || self.neutron_speed <= 0.0 {
            return Err(FissionError::InvalidConfig(
                "contact_radius and neutron_speed must be positive".into(),
            ));
        }

        for (name, (lo, hi)) in [
            ("grid_spacing_range", self.grid_spacing_range),
            ("circle_radius_range", self.circle_radius_range),
        ] {
            if !(lo > 0.0 && lo <= hi) {
                return Err(FissionError::InvalidConfig(format!(
                    "{} must satisfy 0 < min <= max, got ({}, {})",
                    name, lo, hi
                )));
            }
        }

        Ok(())
    }

    /// The full simulation rectangle; neutrons leaving it are culled
    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::new(0.0, 0.0), Vec2::new(self.width, self.height))
    }

    /// The placement rectangle, inset by `margin`
    pub fn interior(&self) -> Rect {
        Rect::new(
            Vec2::new(self.margin, self.margin),
            Vec2::new(self.width - self.margin, self.height - self.margin),
        )
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.center(), Vec2::new(400.0, 300.0));
        assert_eq!(config.interior().max, Vec2::new(750.0, 550.0));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str("neutron_speed = 5.0\nwidth = 400.0\n").unwrap();
        assert_eq!(config.neutron_speed, 5.0);
        assert_eq!(config.width, 400.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.offspring_per_fission, 3);
    }

    #[test]
    fn test_rejects_oversized_margin() {
        let config = SimulationConfig {
            margin: 300.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FissionError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_interior_without_whole_units() {
        // Interior x spans [50.4, 50.6]: no integer to draw from
        let config = SimulationConfig {
            width: 101.0,
            margin: 50.4,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FissionError::InvalidConfig(_))));

        // [50.4, 51.2] still holds x = 51
        let config = SimulationConfig {
            width: 101.6,
            margin: 50.4,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = SimulationConfig::from_toml_str("grid_spacing_range = [100.0, 20.0]").unwrap_err();
        assert!(err.to_string().contains("grid_spacing_range"));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = SimulationConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, FissionError::ConfigParse(_)));
    }
}
