#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for huecheck adapters.

mod svg;
mod text;

use anyhow::Result as AnyResult;
use huecheck_core::{Dot, DrawingSurface, Rgb, Ring};

pub use svg::SvgSurface;
pub use text::FontRasterizer;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Option the learner picked during this frame.
    pub selected_option: Option<usize>,
    /// Request to advance to the next plate.
    pub next: bool,
    /// Request to return to the previous plate.
    pub previous: bool,
    /// Request to restart the assessment.
    pub restart: bool,
}

impl FrameInput {
    /// Reports whether the frame carried no learner action.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Scene content describing one assessment screen.
///
/// The scene doubles as a [`DrawingSurface`] so plate renderers can draw
/// straight into it; adapters then present the recorded primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct PlateScene {
    /// Heading shown above the plate.
    pub title: String,
    /// One-based position and plate count.
    pub progress: (usize, usize),
    /// Canvas width the plate was composed for.
    pub canvas_width: u32,
    /// Canvas height the plate was composed for.
    pub canvas_height: u32,
    /// Fill color of the plate canvas.
    pub background: Color,
    /// Dots in draw order.
    pub dots: Vec<Dot>,
    /// Outline drawn around the disc, if any.
    pub border: Option<Ring>,
    /// Selectable answers for the plate.
    pub options: Vec<String>,
    /// Answer currently selected.
    pub selected: Option<usize>,
    /// Status message such as a missing-answer prompt or the verdict.
    pub banner: Option<String>,
    /// Accent color of the active display mode.
    pub accent: Color,
}

impl PlateScene {
    /// Creates an empty scene for a canvas of the provided size.
    #[must_use]
    pub fn new(canvas_width: u32, canvas_height: u32, accent: Color) -> Self {
        Self {
            title: String::new(),
            progress: (0, 0),
            canvas_width,
            canvas_height,
            background: Color::from(Rgb::WHITE),
            dots: Vec::new(),
            border: None,
            options: Vec::new(),
            selected: None,
            banner: None,
            accent,
        }
    }
}

impl DrawingSurface for PlateScene {
    fn clear(&mut self, color: Rgb) {
        self.background = Color::from(color);
        self.dots.clear();
        self.border = None;
    }

    fn fill_circle(&mut self, dot: Dot) {
        self.dots.push(dot);
    }

    fn stroke_circle(&mut self, ring: Ring) {
        self.border = Some(ring);
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: PlateScene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: PlateScene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting huecheck scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the learner input captured
    /// during the frame and may mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut PlateScene) + 'static;
}
