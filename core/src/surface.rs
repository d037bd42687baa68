use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Position on a drawing surface measured in pixels from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Filled circle emitted by the plate generator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    /// Centre of the dot.
    pub center: Point,
    /// Radius of the dot in pixels.
    pub radius: f64,
    /// Fill color of the dot.
    pub color: Rgb,
}

/// Stroked circle outline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    /// Centre of the ring.
    pub center: Point,
    /// Radius of the ring in pixels.
    pub radius: f64,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Stroke color.
    pub color: Rgb,
    /// Stroke opacity in `[0, 1]`.
    pub alpha: f32,
}

/// Font request passed to a [`TextRasterizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    /// Em size in pixels.
    pub size: f64,
    /// CSS-style weight, 100 to 900.
    pub weight: u16,
}

/// Single-channel coverage mask produced by rasterizing text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// Creates a fully transparent mask.
    #[must_use]
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            alpha: vec![0; len],
        }
    }

    /// Width of the mask in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the mask in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`, or zero outside the mask.
    #[must_use]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.index(x, y)
            .and_then(|index| self.alpha.get(index).copied())
            .unwrap_or(0)
    }

    /// Sets the coverage at `(x, y)`. Writes outside the mask are ignored.
    pub fn set_alpha(&mut self, x: u32, y: u32, value: u8) {
        if let Some(slot) = self.index(x, y).and_then(|index| self.alpha.get_mut(index)) {
            *slot = value;
        }
    }

    /// Reports whether the pixel containing the continuous point is covered.
    ///
    /// The point is floored and clamped onto the mask so that samples on or
    /// beyond the edge read the nearest border pixel.
    #[must_use]
    pub fn covers(&self, point: Point) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        let x = clamp_axis(point.x, self.width);
        let y = clamp_axis(point.y, self.height);
        self.alpha(x, y) > 0
    }

    /// Number of covered pixels.
    #[must_use]
    pub fn coverage(&self) -> usize {
        self.alpha.iter().filter(|value| **value > 0).count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

fn clamp_axis(value: f64, extent: u32) -> u32 {
    let max = f64::from(extent - 1);
    value.floor().clamp(0.0, max) as u32
}

/// Destination for plate drawing primitives.
pub trait DrawingSurface {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Rgb);

    /// Draws a filled circle.
    fn fill_circle(&mut self, dot: Dot);

    /// Draws a circle outline.
    fn stroke_circle(&mut self, ring: Ring);
}

/// Service that turns short strings into coverage masks.
pub trait TextRasterizer {
    /// Rasterizes `text` centred on `anchor` into a `width` by `height` mask.
    fn rasterize(
        &self,
        text: &str,
        font: FontSpec,
        anchor: Point,
        width: u32,
        height: u32,
    ) -> AlphaMask;
}
