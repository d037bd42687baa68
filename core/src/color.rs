use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque color expressed as byte RGB components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb(0xff, 0xff, 0xff);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);

    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from a packed `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(packed: u32) -> Self {
        Self {
            red: ((packed >> 16) & 0xff) as u8,
            green: ((packed >> 8) & 0xff) as u8,
            blue: (packed & 0xff) as u8,
        }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Color expressed as hue (degrees), saturation and lightness (percent).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    hue: f32,
    saturation: f32,
    lightness: f32,
}

impl Hsl {
    /// Creates a new HSL triple.
    ///
    /// Hue wraps into `[0, 360)`; saturation and lightness clamp to `[0, 100]`.
    #[must_use]
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
        }
    }

    /// Hue angle in degrees.
    #[must_use]
    pub const fn hue(&self) -> f32 {
        self.hue
    }

    /// Saturation percentage.
    #[must_use]
    pub const fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Lightness percentage.
    #[must_use]
    pub const fn lightness(&self) -> f32 {
        self.lightness
    }

    /// Returns a copy of the color with the lightness replaced.
    #[must_use]
    pub fn with_lightness(self, lightness: f32) -> Self {
        Self::new(self.hue, self.saturation, lightness)
    }

    /// Converts the color to byte RGB using the CSS `hsl()` definition.
    #[must_use]
    pub fn to_rgb(&self) -> Rgb {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;
        let a = s * l.min(1.0 - l);
        let channel = |n: f32| {
            let k = (n + self.hue / 30.0).rem_euclid(12.0);
            let value = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
            (value * 255.0).round().clamp(0.0, 255.0) as u8
        };
        Rgb::from_rgb(channel(0.0), channel(8.0), channel(4.0))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({} {}% {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Two colors generated for a single training round.
///
/// `base` fills the majority of the board while `odd` marks the cell the
/// learner must find. Pairs live for one round only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    /// Color shared by the majority of cells.
    pub base: Hsl,
    /// Confusable color that differs along the generation axis.
    pub odd: Hsl,
}

impl ColorPair {
    /// Creates a new pair from its two members.
    #[must_use]
    pub const fn new(base: Hsl, odd: Hsl) -> Self {
        Self { base, odd }
    }

    /// Absolute lightness difference between the two members.
    #[must_use]
    pub fn lightness_separation(&self) -> f32 {
        (self.base.lightness() - self.odd.lightness()).abs()
    }
}
