//! Atom placement strategies
//!
//! Pure geometry: every function returns positions and leaves the particle
//! store untouched. Degenerate requests (zero atoms, a grid that runs off the
//! placement area) yield short or empty results, never errors.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::FissionError;
use crate::core::types::{Rect, Vec2};

/// How atoms are laid out on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Random,
    Grid,
    Circle,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] = [LayoutMode::Random, LayoutMode::Grid, LayoutMode::Circle];

    pub fn name(&self) -> &'static str {
        match self {
            LayoutMode::Random => "random",
            LayoutMode::Grid => "grid",
            LayoutMode::Circle => "circle",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutMode {
    type Err = FissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LayoutMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FissionError::InvalidLayout(s.to_string()))
    }
}

/// Mode-specific layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Distance between neighbouring grid atoms
    pub spacing: f64,
    /// Distance of circle atoms from the centre of the area
    pub radius: f64,
}

impl LayoutParams {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            spacing: config.default_grid_spacing,
            radius: config.default_circle_radius,
        }
    }

    /// Clamp into the configured ranges and drop fractional units
    pub fn normalized(&self, config: &SimulationConfig) -> Self {
        Self {
            spacing: clamp_whole(self.spacing, config.grid_spacing_range),
            radius: clamp_whole(self.radius, config.circle_radius_range),
        }
    }
}

fn clamp_whole(value: f64, (lo, hi): (f64, f64)) -> f64 {
    let value = if value.is_finite() { value } else { lo };
    value.clamp(lo, hi).trunc()
}

/// Parse a user-entered atom count; anything that is not a non-negative integer is 0
pub fn parse_atom_count(input: &str) -> usize {
    input
        .trim()
        .parse::<i64>()
        .map(|n| n.max(0) as usize)
        .unwrap_or(0)
}

/// Uniform integer coordinate inside `area`, edges included
pub fn random_point<R: Rng + ?Sized>(area: &Rect, rng: &mut R) -> Vec2 {
    let x = rng.gen_range(area.min.x.ceil() as i64..=area.max.x.floor() as i64);
    let y = rng.gen_range(area.min.y.ceil() as i64..=area.max.y.floor() as i64);
    Vec2::new(x as f64, y as f64)
}

/// `n` independent uniform positions inside `area`
pub fn random_positions<R: Rng + ?Sized>(n: usize, area: &Rect, rng: &mut R) -> Vec<Vec2> {
    (0..n).map(|_| random_point(area, rng)).collect()
}

/// Row-major square-ish grid anchored at the top-left of `area`
///
/// `cols = floor(sqrt(n))`. Placement stops at the first position that falls
/// outside `area`, so fewer than `n` atoms may come back.
pub fn grid_positions(n: usize, spacing: f64, area: &Rect) -> Vec<Vec2> {
    let cols = (n as f64).sqrt().floor() as usize;
    if cols == 0 {
        return Vec::new();
    }

    // The requested count is unbounded; reserve only what the area can hold
    let fit = |extent: f64| {
        if spacing > 0.0 {
            ((extent / spacing).floor() as usize).saturating_add(1)
        } else {
            1
        }
    };
    let room = fit(area.max.x - area.min.x).saturating_mul(fit(area.max.y - area.min.y));
    let mut positions = Vec::with_capacity(n.min(room));
    for i in 0..n {
        let (row, col) = (i / cols, i % cols);
        let p = Vec2::new(
            area.min.x + col as f64 * spacing,
            area.min.y + row as f64 * spacing,
        );
        if p.x > area.max.x || p.y > area.max.y {
            break;
        }
        positions.push(p);
    }
    positions
}

/// `n` atoms evenly spaced on a circle, the first at angle 0
pub fn circle_positions(n: usize, radius: f64, center: Vec2) -> Vec<Vec2> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Compute the positions for a layout request
pub fn layout_positions<R: Rng + ?Sized>(
    mode: LayoutMode,
    n: usize,
    params: &LayoutParams,
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec<Vec2> {
    let params = params.normalized(config);
    match mode {
        LayoutMode::Random => random_positions(n, &config.interior(), rng),
        LayoutMode::Grid => grid_positions(n, params.spacing, &config.interior()),
        LayoutMode::Circle => circle_positions(n, params.radius, config.center()),
    }
}
