use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::Rgb;

/// Display mode applied to the interface for a given color-vision profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Unmodified palette.
    #[default]
    Normal,
    /// Palette tuned for deuteranopia.
    Deuteranopia,
    /// Palette tuned for protanopia.
    Protanopia,
    /// Palette tuned for tritanopia.
    Tritanopia,
}

impl DisplayMode {
    /// Every display mode in presentation order.
    pub const ALL: [Self; 4] = [
        Self::Normal,
        Self::Deuteranopia,
        Self::Protanopia,
        Self::Tritanopia,
    ];

    /// Stable identifier used when persisting the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Deuteranopia => "deuteranopia",
            Self::Protanopia => "protanopia",
            Self::Tritanopia => "tritanopia",
        }
    }

    /// Human readable name of the mode.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Deuteranopia => "Deuteranopia",
            Self::Protanopia => "Protanopia",
            Self::Tritanopia => "Tritanopia",
        }
    }

    /// Accent color used by mode pickers to advertise the mode.
    #[must_use]
    pub const fn accent(self) -> Rgb {
        match self {
            Self::Normal => Rgb::from_hex(0x7ac6ff),
            Self::Deuteranopia => Rgb::from_hex(0xff807a),
            Self::Protanopia => Rgb::from_hex(0xf6ff7a),
            Self::Tritanopia => Rgb::from_hex(0x88ff90),
        }
    }

    /// Parses `raw`, falling back to [`DisplayMode::Normal`] with a warning.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|error: ParseModeError| {
            warn!(%error, "falling back to the normal display mode");
            Self::Normal
        })
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = ParseModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "deuteranopia" => Ok(Self::Deuteranopia),
            "protanopia" => Ok(Self::Protanopia),
            "tritanopia" => Ok(Self::Tritanopia),
            _ => Err(ParseModeError(raw.to_owned())),
        }
    }
}

/// Raised when a display mode string names no known mode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown display mode `{0}`")]
pub struct ParseModeError(pub String);

/// Color-vision deficiency category reported by an assessment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeficiencyType {
    /// No deficiency detected.
    Normal,
    /// Red-weak (protan) profile.
    Protanopia,
    /// Green-weak (deutan) profile.
    Deuteranopia,
    /// Blue-yellow (tritan) profile.
    Tritanopia,
    /// The session was unreliable; no category could be assigned.
    Indeterminate,
}

impl DeficiencyType {
    /// Stable identifier used when persisting the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Indeterminate => "indeterminate",
        }
    }

    /// Human readable name of the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Protanopia => "Protanopia",
            Self::Deuteranopia => "Deuteranopia",
            Self::Tritanopia => "Tritanopia",
            Self::Indeterminate => "Indeterminate",
        }
    }

    /// Display mode matching the category, if the category names one.
    #[must_use]
    pub const fn display_mode(self) -> Option<DisplayMode> {
        match self {
            Self::Normal => Some(DisplayMode::Normal),
            Self::Protanopia => Some(DisplayMode::Protanopia),
            Self::Deuteranopia => Some(DisplayMode::Deuteranopia),
            Self::Tritanopia => Some(DisplayMode::Tritanopia),
            Self::Indeterminate => None,
        }
    }

    /// Training axis inferred for the category when a game runs in auto mode.
    #[must_use]
    pub const fn training_axis(self) -> ConfusionAxis {
        match self {
            Self::Tritanopia => ConfusionAxis::BlueYellow,
            Self::Protanopia | Self::Deuteranopia => ConfusionAxis::RedGreen,
            Self::Normal | Self::Indeterminate => ConfusionAxis::Luminance,
        }
    }

    /// Color trap inferred for the category when a matching level runs in auto mode.
    #[must_use]
    pub const fn challenge_mode(self) -> ChallengeMode {
        ChallengeMode::for_axis(self.training_axis())
    }
}

impl fmt::Display for DeficiencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeficiencyType {
    type Err = ParseDeficiencyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "protanopia" => Ok(Self::Protanopia),
            "deuteranopia" => Ok(Self::Deuteranopia),
            "tritanopia" => Ok(Self::Tritanopia),
            "indeterminate" | "unknown" => Ok(Self::Indeterminate),
            _ => Err(ParseDeficiencyError(raw.to_owned())),
        }
    }
}

/// Raised when a stored deficiency string names no known category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown deficiency type `{0}`")]
pub struct ParseDeficiencyError(pub String);

/// Direction in color space along which a deficiency collapses distinctions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfusionAxis {
    /// Same hue, different lightness.
    #[default]
    Luminance,
    /// Red-leaning versus green-leaning hues.
    RedGreen,
    /// Blue-leaning versus yellow-leaning hues.
    BlueYellow,
}

impl ConfusionAxis {
    /// Stable identifier of the axis.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Luminance => "luminance",
            Self::RedGreen => "red-green",
            Self::BlueYellow => "blue-yellow",
        }
    }

    /// Human readable name of the axis.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Luminance => "Contrast",
            Self::RedGreen => "Red\u{2013}Green",
            Self::BlueYellow => "Blue\u{2013}Yellow",
        }
    }

    /// Parses `raw`, falling back to [`ConfusionAxis::Luminance`] with a warning.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|error: ParseAxisError| {
            warn!(%error, "falling back to the luminance axis");
            Self::Luminance
        })
    }
}

impl fmt::Display for ConfusionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfusionAxis {
    type Err = ParseAxisError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "luminance" | "contrast" => Ok(Self::Luminance),
            "red-green" | "redgreen" => Ok(Self::RedGreen),
            "blue-yellow" | "blueyellow" => Ok(Self::BlueYellow),
            _ => Err(ParseAxisError(raw.to_owned())),
        }
    }
}

/// Raised when an axis string names no known confusion axis.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown confusion axis `{0}`")]
pub struct ParseAxisError(pub String);

/// Axis requested by a caller: either explicit or inferred from the stored profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisSelection {
    /// Infer the axis from the detected deficiency type.
    #[default]
    Auto,
    /// Use the provided axis regardless of the stored profile.
    Fixed(ConfusionAxis),
}

impl AxisSelection {
    /// Resolves the selection into a concrete axis.
    ///
    /// `Auto` without a stored profile resolves to luminance.
    #[must_use]
    pub fn resolve(self, detected: Option<DeficiencyType>) -> ConfusionAxis {
        match self {
            Self::Fixed(axis) => axis,
            Self::Auto => detected.map_or(ConfusionAxis::Luminance, DeficiencyType::training_axis),
        }
    }

    /// Parses `raw`, treating unknown values as luminance with a warning.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Fixed(ConfusionAxis::parse_or_default(raw))
        }
    }
}

impl FromStr for AxisSelection {
    type Err = ParseAxisError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            raw.parse().map(Self::Fixed)
        }
    }
}

/// Color trap applied to symbols in a matching level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeMode {
    /// Each symbol receives an unrelated random color.
    #[default]
    None,
    /// Symbols are tinted with near-confusable red/green pairs.
    RedGreen,
    /// Symbols are tinted with near-confusable blue/yellow pairs.
    BlueYellow,
}

impl ChallengeMode {
    /// Maps a confusion axis onto the matching color trap.
    ///
    /// Luminance has no curated pool and maps to [`ChallengeMode::None`].
    #[must_use]
    pub const fn for_axis(axis: ConfusionAxis) -> Self {
        match axis {
            ConfusionAxis::Luminance => Self::None,
            ConfusionAxis::RedGreen => Self::RedGreen,
            ConfusionAxis::BlueYellow => Self::BlueYellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisSelection, ChallengeMode, ConfusionAxis, DeficiencyType, DisplayMode};

    #[test]
    fn auto_axis_follows_the_inference_table() {
        let cases = [
            (Some(DeficiencyType::Tritanopia), ConfusionAxis::BlueYellow),
            (Some(DeficiencyType::Protanopia), ConfusionAxis::RedGreen),
            (Some(DeficiencyType::Deuteranopia), ConfusionAxis::RedGreen),
            (Some(DeficiencyType::Normal), ConfusionAxis::Luminance),
            (Some(DeficiencyType::Indeterminate), ConfusionAxis::Luminance),
            (None, ConfusionAxis::Luminance),
        ];
        for (detected, expected) in cases {
            assert_eq!(AxisSelection::Auto.resolve(detected), expected);
        }
    }

    #[test]
    fn fixed_axis_ignores_the_stored_profile() {
        let selection = AxisSelection::Fixed(ConfusionAxis::RedGreen);
        assert_eq!(
            selection.resolve(Some(DeficiencyType::Tritanopia)),
            ConfusionAxis::RedGreen
        );
    }

    #[test]
    fn challenge_mode_drops_luminance() {
        assert_eq!(DeficiencyType::Normal.challenge_mode(), ChallengeMode::None);
        assert_eq!(
            DeficiencyType::Deuteranopia.challenge_mode(),
            ChallengeMode::RedGreen
        );
        assert_eq!(
            DeficiencyType::Tritanopia.challenge_mode(),
            ChallengeMode::BlueYellow
        );
    }

    #[test]
    fn unknown_axis_falls_back_to_luminance() {
        assert!("purple-orange".parse::<ConfusionAxis>().is_err());
        assert_eq!(
            ConfusionAxis::parse_or_default("purple-orange"),
            ConfusionAxis::Luminance
        );
        assert_eq!(
            AxisSelection::parse_or_default("bogus"),
            AxisSelection::Fixed(ConfusionAxis::Luminance)
        );
        assert_eq!(
            ConfusionAxis::parse_or_default("blueyellow"),
            ConfusionAxis::BlueYellow
        );
    }

    #[test]
    fn unknown_mode_falls_back_to_normal() {
        assert_eq!(DisplayMode::parse_or_default("sepia"), DisplayMode::Normal);
        assert_eq!(
            DisplayMode::parse_or_default(" Tritanopia "),
            DisplayMode::Tritanopia
        );
    }

    #[test]
    fn legacy_unknown_deficiency_parses_as_indeterminate() {
        assert_eq!(
            "unknown".parse::<DeficiencyType>(),
            Ok(DeficiencyType::Indeterminate)
        );
        for mode in DisplayMode::ALL {
            assert_eq!(mode.as_str().parse::<DisplayMode>(), Ok(mode));
        }
    }
}
