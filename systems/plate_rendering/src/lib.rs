#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic plate generator that scatters seeded dots around a numeral.

use std::f64::consts::TAU;

use huecheck_core::{
    AlphaMask, Dot, DrawingSurface, Event, FontSpec, Plate, Point, Rgb, Ring, RngState, Seed,
    TextRasterizer,
};
use thiserror::Error;
use tracing::debug;

const DISC_RADIUS_RATIO: f64 = 0.48;
const GLYPH_WEIGHT: u16 = 900;
const GLYPH_BASELINE_OFFSET: f64 = 8.0;
const BORDER_WIDTH: f64 = 2.0;
const BORDER_ALPHA: f32 = 0.08;
const FNV64_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Canvas dimensions a plate is composed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlateGeometry {
    width: u32,
    height: u32,
}

impl PlateGeometry {
    /// Creates a geometry of `width` by `height` pixels.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Centre of the canvas.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Radius of the dot disc, derived from the canvas width.
    #[must_use]
    pub fn disc_radius(&self) -> f64 {
        f64::from(self.width) * DISC_RADIUS_RATIO
    }

    /// Point the numeral glyph is centred on.
    #[must_use]
    pub fn glyph_anchor(&self) -> Point {
        let center = self.center();
        Point::new(center.x, center.y + GLYPH_BASELINE_OFFSET)
    }
}

impl Default for PlateGeometry {
    fn default() -> Self {
        Self::new(360, 360)
    }
}

/// Tunables controlling the dot scatter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    dot_count: usize,
    min_dot_radius: f64,
    max_dot_radius: f64,
}

impl RenderConfig {
    /// Creates a configuration scattering `dot_count` dots with radii in
    /// `[min_dot_radius, max_dot_radius)`.
    #[must_use]
    pub const fn new(dot_count: usize, min_dot_radius: f64, max_dot_radius: f64) -> Self {
        Self {
            dot_count,
            min_dot_radius,
            max_dot_radius,
        }
    }

    /// Number of dots drawn per plate.
    #[must_use]
    pub const fn dot_count(&self) -> usize {
        self.dot_count
    }

    /// Smallest dot radius, inclusive.
    #[must_use]
    pub const fn min_dot_radius(&self) -> f64 {
        self.min_dot_radius
    }

    /// Largest dot radius, exclusive.
    #[must_use]
    pub const fn max_dot_radius(&self) -> f64 {
        self.max_dot_radius
    }

    fn dot_radius(&self, unit: f64) -> f64 {
        self.min_dot_radius + (self.max_dot_radius - self.min_dot_radius) * unit
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(1800, 3.0, 7.0)
    }
}

/// Errors raised when describing a plate to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlateSpecError {
    /// The numeral palette holds no colors.
    #[error("the foreground palette is empty")]
    EmptyForeground,
    /// The field palette holds no colors.
    #[error("the background palette is empty")]
    EmptyBackground,
}

/// Everything that determines the pixels of one plate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlateSpec<'a> {
    text: &'a str,
    foreground: &'a [Rgb],
    background: &'a [Rgb],
    seed: Seed,
}

impl<'a> PlateSpec<'a> {
    /// Describes a plate hiding `text` with the provided palettes.
    pub fn new(
        text: &'a str,
        foreground: &'a [Rgb],
        background: &'a [Rgb],
        seed: Seed,
    ) -> Result<Self, PlateSpecError> {
        if foreground.is_empty() {
            return Err(PlateSpecError::EmptyForeground);
        }
        if background.is_empty() {
            return Err(PlateSpecError::EmptyBackground);
        }
        Ok(Self {
            text,
            foreground,
            background,
            seed,
        })
    }

    /// Describes `plate` as presented at position `index` of a session.
    #[must_use]
    pub fn from_plate(plate: &Plate, index: usize) -> PlateSpec<'static> {
        PlateSpec::with_seed(plate, plate.seed(index))
    }

    /// Describes `plate` rendered with an explicit seed.
    #[must_use]
    pub fn with_seed(plate: &Plate, seed: Seed) -> PlateSpec<'static> {
        PlateSpec {
            text: plate.target(),
            foreground: plate.foreground().colors(),
            background: plate.background().colors(),
            seed,
        }
    }

    /// Numeral hidden in the plate.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Seed driving the scatter.
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }
}

/// Font used to rasterize the numeral mask for `text`.
///
/// Longer numerals use smaller type so they stay inside the disc.
#[must_use]
pub fn glyph_font(text: &str) -> FontSpec {
    let size = match text.chars().count() {
        0 | 1 => 170.0,
        2 => 150.0,
        _ => 120.0,
    };
    FontSpec {
        size,
        weight: GLYPH_WEIGHT,
    }
}

/// Fully composed plate, ready to replay onto any surface.
#[derive(Clone, Debug, PartialEq)]
pub struct PlateComposition {
    dots: Vec<Dot>,
    border: Ring,
}

impl PlateComposition {
    /// Dots in draw order.
    #[must_use]
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Faint outline drawn around the disc.
    #[must_use]
    pub const fn border(&self) -> Ring {
        self.border
    }

    /// Replays the composition onto `surface`, clearing it first.
    pub fn draw<S>(&self, surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        surface.clear(Rgb::WHITE);
        for dot in &self.dots {
            surface.fill_circle(*dot);
        }
        surface.stroke_circle(self.border);
    }

    /// 64-bit FNV-1a digest over every primitive.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hash = FNV64_OFFSET_BASIS;
        let mut feed = |bytes: &[u8]| {
            for byte in bytes {
                hash = (hash ^ u64::from(*byte)).wrapping_mul(FNV64_PRIME);
            }
        };
        for dot in &self.dots {
            feed(&dot.center.x.to_bits().to_le_bytes());
            feed(&dot.center.y.to_bits().to_le_bytes());
            feed(&dot.radius.to_bits().to_le_bytes());
            feed(&[dot.color.red(), dot.color.green(), dot.color.blue()]);
        }
        feed(&self.border.radius.to_bits().to_le_bytes());
        hash
    }
}

/// Pure system that turns plate descriptions into dot primitives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlateRenderer {
    geometry: PlateGeometry,
    config: RenderConfig,
}

impl PlateRenderer {
    /// Creates a renderer for the provided canvas and scatter settings.
    #[must_use]
    pub const fn new(geometry: PlateGeometry, config: RenderConfig) -> Self {
        Self { geometry, config }
    }

    /// Canvas the renderer composes for.
    #[must_use]
    pub const fn geometry(&self) -> PlateGeometry {
        self.geometry
    }

    /// Scatter settings of the renderer.
    #[must_use]
    pub const fn config(&self) -> RenderConfig {
        self.config
    }

    /// Rasterizes the numeral mask the scatter is tested against.
    pub fn glyph_mask<T>(&self, text: &str, rasterizer: &T) -> AlphaMask
    where
        T: TextRasterizer + ?Sized,
    {
        rasterizer.rasterize(
            text,
            glyph_font(text),
            self.geometry.glyph_anchor(),
            self.geometry.width,
            self.geometry.height,
        )
    }

    /// Composes the plate into an owned list of primitives.
    pub fn compose<T>(&self, spec: &PlateSpec<'_>, rasterizer: &T) -> PlateComposition
    where
        T: TextRasterizer + ?Sized,
    {
        let mask = self.glyph_mask(spec.text, rasterizer);
        let mut dots = Vec::with_capacity(self.config.dot_count);
        self.scatter(spec, &mask, |dot| dots.push(dot));
        PlateComposition {
            dots,
            border: self.border(),
        }
    }

    /// Draws the plate straight onto `surface` without collecting primitives.
    pub fn render<T, S>(&self, spec: &PlateSpec<'_>, rasterizer: &T, surface: &mut S)
    where
        T: TextRasterizer + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        let mask = self.glyph_mask(spec.text, rasterizer);
        surface.clear(Rgb::WHITE);
        self.scatter(spec, &mask, |dot| surface.fill_circle(dot));
        surface.stroke_circle(self.border());
    }

    /// Renders every plate the session entered onto `surface`.
    ///
    /// Only [`Event::PlateEntered`] triggers drawing; recorded answers leave
    /// the surface untouched.
    pub fn handle<T, S>(&self, events: &[Event], plates: &[Plate], rasterizer: &T, surface: &mut S)
    where
        T: TextRasterizer + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        for event in events {
            if let Event::PlateEntered { index, seed } = event {
                if let Some(plate) = plates.get(*index) {
                    self.render(&PlateSpec::with_seed(plate, *seed), rasterizer, surface);
                }
            }
        }
    }

    fn border(&self) -> Ring {
        Ring {
            center: self.geometry.center(),
            radius: self.geometry.disc_radius(),
            line_width: BORDER_WIDTH,
            color: Rgb::BLACK,
            alpha: BORDER_ALPHA,
        }
    }

    fn scatter<F>(&self, spec: &PlateSpec<'_>, mask: &AlphaMask, mut emit: F)
    where
        F: FnMut(Dot),
    {
        let center = self.geometry.center();
        let disc_radius = self.geometry.disc_radius();
        let mut rng = RngState::from_seed(spec.seed);
        debug!(
            text = spec.text,
            seed = spec.seed.get(),
            dots = self.config.dot_count,
            "scattering plate"
        );

        for _ in 0..self.config.dot_count {
            let radius = disc_radius * rng.draw().sqrt();
            let angle = TAU * rng.draw();
            let position = Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
            let palette = if mask.covers(position) {
                spec.foreground
            } else {
                spec.background
            };
            let color = pick(palette, rng.draw());
            let dot_radius = self.config.dot_radius(rng.draw());
            emit(Dot {
                center: position,
                radius: dot_radius,
                color,
            });
        }
    }
}

fn pick(palette: &[Rgb], unit: f64) -> Rgb {
    let last = palette.len().saturating_sub(1);
    let index = ((unit * palette.len() as f64) as usize).min(last);
    palette.get(index).copied().unwrap_or(Rgb::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use huecheck_core::{hash_seed, Palette};

    struct BlankRasterizer;

    impl TextRasterizer for BlankRasterizer {
        fn rasterize(&self, _: &str, _: FontSpec, _: Point, width: u32, height: u32) -> AlphaMask {
            AlphaMask::transparent(width, height)
        }
    }

    struct FullRasterizer;

    impl TextRasterizer for FullRasterizer {
        fn rasterize(&self, _: &str, _: FontSpec, _: Point, width: u32, height: u32) -> AlphaMask {
            let mut mask = AlphaMask::transparent(width, height);
            for y in 0..height {
                for x in 0..width {
                    mask.set_alpha(x, y, 255);
                }
            }
            mask
        }
    }

    fn spec(key: &str) -> PlateSpec<'static> {
        PlateSpec::new(
            "12",
            Palette::ControlA.colors(),
            Palette::ControlB.colors(),
            hash_seed(key),
        )
        .expect("palettes are populated")
    }

    #[test]
    fn font_shrinks_with_numeral_length() {
        assert_eq!(glyph_font("7").size, 170.0);
        assert_eq!(glyph_font("45").size, 150.0);
        assert_eq!(glyph_font("123").size, 120.0);
        assert_eq!(glyph_font("7").weight, 900);
    }

    #[test]
    fn default_geometry_matches_reference_canvas() {
        let geometry = PlateGeometry::default();
        assert_eq!(geometry.center(), Point::new(180.0, 180.0));
        assert!((geometry.disc_radius() - 172.8).abs() < 1e-9);
        assert_eq!(geometry.glyph_anchor(), Point::new(180.0, 188.0));
    }

    #[test]
    fn empty_palettes_are_rejected() {
        let seed = Seed::new(1);
        assert_eq!(
            PlateSpec::new("1", &[], Palette::ControlB.colors(), seed),
            Err(PlateSpecError::EmptyForeground)
        );
        assert_eq!(
            PlateSpec::new("1", Palette::ControlA.colors(), &[], seed),
            Err(PlateSpecError::EmptyBackground)
        );
    }

    #[test]
    fn first_dot_follows_draw_order() {
        let seed = Seed::new(1);
        let renderer = PlateRenderer::default();
        let spec = PlateSpec::new("1", &[Rgb::BLACK], Palette::ControlB.colors(), seed)
            .expect("palettes are populated");

        let composition = renderer.compose(&spec, &BlankRasterizer);

        let mut rng = RngState::from_seed(seed);
        let radius = renderer.geometry().disc_radius() * rng.draw().sqrt();
        let angle = TAU * rng.draw();
        let color_unit = rng.draw();
        let size_unit = rng.draw();
        let first = composition.dots()[0];
        assert_eq!(first.center.x, 180.0 + radius * angle.cos());
        assert_eq!(first.center.y, 180.0 + radius * angle.sin());
        assert_eq!(first.color, pick(Palette::ControlB.colors(), color_unit));
        assert_eq!(first.radius, 3.0 + 4.0 * size_unit);
    }

    #[test]
    fn dots_stay_inside_the_disc_with_bounded_radii() {
        let renderer = PlateRenderer::default();
        let composition = renderer.compose(&spec("C1:0"), &BlankRasterizer);
        let center = renderer.geometry().center();

        assert_eq!(composition.dots().len(), 1800);
        for dot in composition.dots() {
            let dx = dot.center.x - center.x;
            let dy = dot.center.y - center.y;
            assert!((dx * dx + dy * dy).sqrt() <= 172.8 + 1e-9);
            assert!(dot.radius >= 3.0 && dot.radius < 7.0);
            assert!(Palette::ControlB.colors().contains(&dot.color));
        }
    }

    #[test]
    fn covered_points_use_the_foreground_palette() {
        let renderer = PlateRenderer::default();
        let composition = renderer.compose(&spec("C1:0"), &FullRasterizer);

        assert!(composition
            .dots()
            .iter()
            .all(|dot| Palette::ControlA.colors().contains(&dot.color)));
    }

    #[test]
    fn composition_reports_a_faint_border() {
        let composition = PlateRenderer::default().compose(&spec("C1:0"), &BlankRasterizer);
        let border = composition.border();
        assert_eq!(border.line_width, 2.0);
        assert_eq!(border.color, Rgb::BLACK);
        assert!((border.alpha - 0.08).abs() < f32::EPSILON);
    }

    #[test]
    fn different_seeds_produce_different_fingerprints() {
        let renderer = PlateRenderer::default();
        let first = renderer.compose(&spec("C1:0"), &BlankRasterizer);
        let second = renderer.compose(&spec("C1:1"), &BlankRasterizer);
        assert_ne!(first.fingerprint(), second.fingerprint());
        assert_eq!(
            first.fingerprint(),
            renderer.compose(&spec("C1:0"), &BlankRasterizer).fingerprint()
        );
    }

    #[test]
    fn pick_never_indexes_past_the_palette() {
        let palette = Palette::TritanA.colors();
        assert_eq!(pick(palette, 0.0), palette[0]);
        assert_eq!(pick(palette, 0.999_999), palette[2]);
        assert_eq!(pick(palette, 1.0), palette[2]);
    }
}
