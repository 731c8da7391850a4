//! Grid coordinates, identifiers and colours shared by every module.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Integer cell coordinate in the world grid.
///
/// `y` grows upwards, matching the host's world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    /// Column, growing east.
    pub x: i32,
    /// Row, growing north.
    pub y: i32,
}

impl From<(i32, i32)> for GridCell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl GridCell {
    /// Cell at `(x, y)`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell displaced by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Nearest cell to a fractional position, rounding half away from zero.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Rounded world cells always fit within i32."
    )]
    #[must_use]
    pub fn rounded(pos: DVec2) -> Self {
        Self {
            x: pos.x.round() as i32,
            y: pos.y.round() as i32,
        }
    }

    /// World-space position of the cell origin for a given cell size.
    #[must_use]
    pub fn to_world(self, cell_size: f64) -> DVec2 {
        DVec2::new(f64::from(self.x), f64::from(self.y)) * cell_size
    }
}

/// World-object type identifier. Values `<= 0` denote an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub i32);

impl ObjectId {
    /// Whether the id refers to an actual object.
    #[must_use]
    pub const fn is_present(self) -> bool {
        self.0 > 0
    }
}

impl From<i32> for ObjectId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Live-object identifier of a player, used to attribute speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i32);

/// RGBA colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Opacity
    pub a: f32,
}

impl Rgba {
    /// Opaque black, the colour of space.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Colour from unit-range channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Weighted sum `self * weight + other * (1 - weight)` over all channels.
    #[must_use]
    pub fn linear_sum(self, other: Self, weight: f32) -> Self {
        let mix = |a: f32, b: f32| a * weight + b * (1.0 - weight);
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Same colour with opacity `a`.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}
