//! Color definitions for particles and visual states

use serde::{Deserialize, Serialize};

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Fill and outline of a drawn shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Color,
    pub outline: Color,
}

/// Background color for the simulation area
pub const BACKGROUND: Color = Color::new(0.941, 0.941, 0.961, 1.0);

pub const ATOM_UNREACTED: ShapeStyle = ShapeStyle {
    fill: Color::new(0.0, 0.0, 0.545, 1.0), // Dark blue
    outline: Color::new(0.0, 0.0, 1.0, 1.0),
};

pub const ATOM_REACTED: ShapeStyle = ShapeStyle {
    fill: Color::new(0.678, 0.847, 0.902, 1.0), // Light blue
    outline: Color::new(0.678, 0.847, 0.902, 1.0),
};

pub const NEUTRON: ShapeStyle = ShapeStyle {
    fill: Color::new(0.502, 0.502, 0.502, 1.0), // Gray
    outline: Color::new(0.0, 0.0, 0.0, 1.0),
};

/// Style for an atom in the given state
pub fn atom_style(reacted: bool) -> ShapeStyle {
    if reacted {
        ATOM_REACTED
    } else {
        ATOM_UNREACTED
    }
}
