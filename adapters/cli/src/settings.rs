use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use huecheck_system_plate_rendering::{PlateGeometry, RenderConfig};
use serde::Deserialize;

/// Preference file used when the configuration names none.
const DEFAULT_PREFERENCES_PATH: &str = "huecheck-preferences.toml";

/// Tunables read from the optional `--config` TOML file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Plate canvas width in pixels.
    pub(crate) canvas_width: u32,
    /// Plate canvas height in pixels.
    pub(crate) canvas_height: u32,
    /// Dots scattered per plate.
    pub(crate) dot_count: usize,
    /// Smallest dot radius in pixels.
    pub(crate) min_dot_radius: f64,
    /// Exclusive upper bound of the dot radius in pixels.
    pub(crate) max_dot_radius: f64,
    /// File the learner's preferences are persisted to.
    pub(crate) preferences: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let geometry = PlateGeometry::default();
        let config = RenderConfig::default();
        Self {
            canvas_width: geometry.width(),
            canvas_height: geometry.height(),
            dot_count: config.dot_count(),
            min_dot_radius: config.min_dot_radius(),
            max_dot_radius: config.max_dot_radius(),
            preferences: PathBuf::from(DEFAULT_PREFERENCES_PATH),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the defaults when no file is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid settings in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(contents).context("failed to parse settings toml contents")?;
        if settings.canvas_width == 0 || settings.canvas_height == 0 {
            bail!(
                "canvas must not be empty, got {}x{}",
                settings.canvas_width,
                settings.canvas_height
            );
        }
        if settings.dot_count == 0 {
            bail!("dot_count must be positive");
        }
        if !(settings.min_dot_radius > 0.0 && settings.min_dot_radius < settings.max_dot_radius) {
            bail!(
                "dot radius range [{}, {}) is empty",
                settings.min_dot_radius,
                settings.max_dot_radius
            );
        }
        Ok(settings)
    }

    /// Canvas the plates are composed on.
    #[must_use]
    pub(crate) fn geometry(&self) -> PlateGeometry {
        PlateGeometry::new(self.canvas_width, self.canvas_height)
    }

    /// Dot scatter configuration.
    #[must_use]
    pub(crate) fn render_config(&self) -> RenderConfig {
        RenderConfig::new(self.dot_count, self.min_dot_radius, self.max_dot_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_library_canvas() {
        let settings = Settings::default();
        assert_eq!(settings.canvas_width, 360);
        assert_eq!(settings.canvas_height, 360);
        assert_eq!(settings.dot_count, 1800);
        assert_eq!(settings.min_dot_radius, 3.0);
        assert_eq!(settings.max_dot_radius, 7.0);
        assert_eq!(settings.preferences, PathBuf::from("huecheck-preferences.toml"));
        assert_eq!(settings.geometry(), PlateGeometry::default());
        assert_eq!(settings.render_config(), RenderConfig::default());
    }

    #[test]
    fn partial_files_keep_remaining_defaults() {
        let settings = Settings::parse("dot_count = 900\npreferences = \"prefs.toml\"\n")
            .expect("valid settings");
        assert_eq!(settings.dot_count, 900);
        assert_eq!(settings.preferences, PathBuf::from("prefs.toml"));
        assert_eq!(settings.canvas_width, 360);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("dots = 12").is_err());
    }

    #[test]
    fn empty_radius_range_is_rejected() {
        let error = Settings::parse("min_dot_radius = 5.0\nmax_dot_radius = 5.0")
            .expect_err("range is empty");
        assert!(error.to_string().contains("dot radius range"));
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(Settings::parse("canvas_width = 0").is_err());
        assert!(Settings::parse("dot_count = 0").is_err());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = Path::new("definitely/not/here/huecheck.toml");
        let error = Settings::load(Some(path)).expect_err("file is missing");
        assert!(error.to_string().contains("definitely/not/here"));
    }
}
