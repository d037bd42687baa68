//! Vector surface that serialises plate primitives into a standalone SVG document.

use std::fmt::Write as _;

use huecheck_core::{Dot, DrawingSurface, Rgb, Ring};

/// Drawing surface that accumulates an SVG document in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    body: String,
    elements: usize,
}

impl SvgSurface {
    /// Creates an empty document of `width` by `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            elements: 0,
        }
    }

    /// Number of shapes written since the last clear, background included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Completes the document and returns its text.
    #[must_use]
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }
}

impl DrawingSurface for SvgSurface {
    fn clear(&mut self, color: Rgb) {
        self.body.clear();
        let _ = writeln!(
            self.body,
            "<rect width=\"{}\" height=\"{}\" fill=\"{color}\"/>",
            self.width, self.height
        );
        self.elements = 1;
    }

    fn fill_circle(&mut self, dot: Dot) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            dot.center.x, dot.center.y, dot.radius, dot.color
        );
        self.elements += 1;
    }

    fn stroke_circle(&mut self, ring: Ring) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{:.2}\" stroke-width=\"{:.2}\"/>",
            ring.center.x, ring.center.y, ring.radius, ring.color, ring.alpha, ring.line_width
        );
        self.elements += 1;
    }
}
