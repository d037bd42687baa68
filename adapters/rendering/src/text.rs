//! Numeral rasterizer backed by `swash` and the bundled DejaVu Sans faces.

use std::fmt;

use anyhow::{Context, Result as AnyResult};
use glam::Vec2;
use huecheck_core::{AlphaMask, FontSpec, Point, TextRasterizer};
use swash::scale::image::Image;
use swash::scale::{Render, ScaleContext, Source};
use swash::shape::ShapeContext;
use swash::zeno::{Format, Vector};
use swash::{FontRef, GlyphId};

const EXTRA_LIGHT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-ExtraLight.ttf");
const BOOK: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
const BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Bundled faces in ascending weight order.
const BUNDLED_FACES: [(&str, u16, &[u8]); 3] = [
    ("DejaVu Sans ExtraLight", 200, EXTRA_LIGHT),
    ("DejaVu Sans", 400, BOOK),
    ("DejaVu Sans Bold", 700, BOLD),
];

/// Outline growth per 100 weight units above the chosen face, in ems.
const EMBOLDEN_PER_HUNDRED: f32 = 0.012;

#[derive(Clone, Copy)]
struct Face {
    name: &'static str,
    weight: u16,
    font: FontRef<'static>,
}

/// Text rasterizer that shapes and renders outlines with `swash`.
///
/// Requested weights pick the heaviest bundled face not heavier than the
/// request; any remaining weight is simulated by emboldening the outline,
/// so a 900 request renders visibly heavier than plain bold.
#[derive(Clone)]
pub struct FontRasterizer {
    faces: Vec<Face>,
}

impl FontRasterizer {
    /// Loads the faces compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled face cannot be parsed.
    pub fn bundled() -> AnyResult<Self> {
        let faces = BUNDLED_FACES
            .iter()
            .map(|&(name, weight, data)| {
                FontRef::from_index(data, 0)
                    .map(|font| Face { name, weight, font })
                    .with_context(|| format!("bundled font `{name}` could not be parsed"))
            })
            .collect::<AnyResult<Vec<_>>>()?;
        Ok(Self { faces })
    }

    fn face_for(&self, weight: u16) -> Option<&Face> {
        self.faces
            .iter()
            .rev()
            .find(|face| face.weight <= weight)
            .or_else(|| self.faces.first())
    }
}

impl fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<(&str, u16)> = self
            .faces
            .iter()
            .map(|face| (face.name, face.weight))
            .collect();
        f.debug_struct("FontRasterizer")
            .field("faces", &faces)
            .finish()
    }
}

impl TextRasterizer for FontRasterizer {
    fn rasterize(
        &self,
        text: &str,
        font: FontSpec,
        anchor: Point,
        width: u32,
        height: u32,
    ) -> AlphaMask {
        let mut mask = AlphaMask::transparent(width, height);
        let size = font.size as f32;
        if text.is_empty() || size.is_nan() || size <= 0.0 {
            return mask;
        }
        let Some(face) = self.face_for(font.weight) else {
            return mask;
        };

        let mut shape_context = ShapeContext::new();
        let mut shaper = shape_context.builder(face.font).size(size).build();
        shaper.add_str(text);
        let mut glyphs: Vec<(GlyphId, Vec2)> = Vec::new();
        let mut pen = 0.0_f32;
        shaper.shape_with(|cluster| {
            for glyph in cluster.glyphs {
                glyphs.push((glyph.id, Vec2::new(pen + glyph.x, -glyph.y)));
                pen += glyph.advance;
            }
        });

        // Centred horizontally on the advance, vertically on the em box.
        let metrics = face.font.metrics(&[]).scale(size);
        let origin = Vec2::new(
            anchor.x as f32 - pen / 2.0,
            anchor.y as f32 + (metrics.ascent - metrics.descent.abs()) / 2.0,
        );
        let strength =
            f32::from(font.weight.saturating_sub(face.weight)) / 100.0 * size * EMBOLDEN_PER_HUNDRED;

        let mut scale_context = ScaleContext::new();
        let mut scaler = scale_context
            .builder(face.font)
            .size(size)
            .hint(false)
            .build();
        for (id, offset) in glyphs {
            let position = origin + offset;
            let whole_x = position.x.floor();
            let rendered = Render::new(&[Source::Outline])
                .format(Format::Alpha)
                .offset(Vector::new(position.x - whole_x, 0.0))
                .embolden(strength)
                .render(&mut scaler, id);
            if let Some(image) = rendered {
                let left = whole_x as i64 + i64::from(image.placement.left);
                let top = position.y.round() as i64 - i64::from(image.placement.top);
                blit_alpha(&mut mask, &image, left, top);
            }
        }
        mask
    }
}

/// Copies the glyph coverage onto `mask`, keeping the stronger alpha where glyphs overlap.
fn blit_alpha(mask: &mut AlphaMask, image: &Image, left: i64, top: i64) {
    let glyph_width = image.placement.width as usize;
    if glyph_width == 0 {
        return;
    }
    let rows = image
        .data
        .chunks(glyph_width)
        .take(image.placement.height as usize);
    for (row, line) in rows.enumerate() {
        for (column, &alpha) in line.iter().enumerate() {
            if alpha == 0 {
                continue;
            }
            let x = u32::try_from(left + column as i64);
            let y = u32::try_from(top + row as i64);
            if let (Ok(x), Ok(y)) = (x, y) {
                if x < mask.width() && y < mask.height() {
                    mask.set_alpha(x, y, mask.alpha(x, y).max(alpha));
                }
            }
        }
    }
}
