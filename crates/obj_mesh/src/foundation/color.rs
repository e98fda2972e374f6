//! Color values
//!
//! Material colors are plain linear RGB triples. Alpha only appears once a
//! color is packed into a vertex, where it is always opaque.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Linear RGB color with channels conceptually in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Fixed color for the `grass` material
    pub const GRASS: Self = Self::new(0.0, 140.0 / 255.0, 20.0 / 255.0);

    /// Fixed color for the `earth` material
    pub const EARTH: Self = Self::new(78.0 / 255.0, 32.0 / 255.0, 20.0 / 255.0);

    /// Neutral gray used for every other material and for faces without one
    pub const NEUTRAL_GRAY: Self = Self::new(0.5, 0.5, 0.5);

    /// Create a color from its channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Palette color for a material name
    ///
    /// Matching is exact and case-sensitive: `grass` and `earth` have fixed
    /// colors, anything else is [`Color::NEUTRAL_GRAY`].
    pub fn for_material_name(name: &str) -> Self {
        match name {
            "grass" => Self::GRASS,
            "earth" => Self::EARTH,
            _ => Self::NEUTRAL_GRAY,
        }
    }

    /// Channels as an array
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels plus alpha, as laid out in a vertex buffer
    pub const fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::NEUTRAL_GRAY
    }
}

/// Errors from parsing a hex color string
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    /// Wrong number of hex digits
    #[error("Expected 8 hex digits (RRGGBBAA), got {0} characters")]
    InvalidLength(usize),

    /// A pair of characters is not a hex byte
    #[error("Invalid hex byte '{0}'")]
    InvalidDigit(String),
}

/// Parse an `RRGGBBAA` hex string (e.g. `"ccffffff"`) into normalized RGBA
pub fn parse_hex_rgba(input: &str) -> Result<[f32; 4], ColorError> {
    let input = input.trim_start_matches('#');
    if input.len() != 8 || !input.is_ascii() {
        return Err(ColorError::InvalidLength(input.chars().count()));
    }

    let mut rgba = [0.0; 4];
    for (channel, i) in rgba.iter_mut().zip((0..8).step_by(2)) {
        let pair = &input[i..i + 2];
        let byte = u8::from_str_radix(pair, 16)
            .map_err(|_| ColorError::InvalidDigit(pair.to_string()))?;
        *channel = f32::from(byte) / 255.0;
    }
    Ok(rgba)
}
