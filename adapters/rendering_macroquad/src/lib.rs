#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for huecheck.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The answer panel uses Macroquad's immediate-mode UI module. All UI-specific
//! calls live inside the local `ui` module so Macroquad UI types stay out of
//! the plate renderer.

mod ui;

use self::ui::{draw_answer_panel, AnswerPanelContext, AnswerPanelResult};
use anyhow::Result;
use glam::Vec2;
use huecheck_core::Point;
use huecheck_rendering::{Color, FrameInput, PlateScene, Presentation, RenderingBackend};
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;

/// Width of the answer panel docked to the right of the plate.
const PANEL_WIDTH: f32 = 300.0;
/// Gap kept around the plate canvas.
const CANVAS_MARGIN: f32 = 24.0;
const OPTION_KEYS: [KeyCode; 4] = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4];

/// Tracks panel clicks so they can be merged with keyboard input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct AnswerPanelInputState {
    latched: FrameInput,
}

impl AnswerPanelInputState {
    /// Records that an option button was clicked this frame.
    pub fn register_option(&mut self, option: usize) {
        self.latched.selected_option = Some(option);
    }

    /// Records that the next button was clicked this frame.
    pub fn register_next(&mut self) {
        self.latched.next = true;
    }

    /// Records that the previous button was clicked this frame.
    pub fn register_previous(&mut self) {
        self.latched.previous = true;
    }

    /// Records that the restart button was clicked this frame.
    pub fn register_restart(&mut self) {
        self.latched.restart = true;
    }

    /// Returns every latched click, clearing them so each fires only once.
    pub fn take(&mut self) -> FrameInput {
        std::mem::take(&mut self.latched)
    }

    fn register_panel(&mut self, result: AnswerPanelResult) {
        if let Some(option) = result.option {
            self.register_option(option);
        }
        if result.next {
            self.register_next();
        }
        if result.previous {
            self.register_previous();
        }
        if result.restart {
            self.register_restart();
        }
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to close the window.
    quit_requested: bool,
    /// `1` to `4` pick the matching option.
    option: Option<usize>,
    /// `Enter` or `Right` advances.
    next: bool,
    /// `Left` goes back.
    previous: bool,
    /// `R` restarts the assessment.
    restart: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            option: OPTION_KEYS.iter().position(|key| is_key_pressed(*key)),
            next: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Right),
            previous: is_key_pressed(KeyCode::Left),
            restart: is_key_pressed(KeyCode::R),
        }
    }
}

/// Combines latched panel clicks with the keys pressed this frame.
///
/// A clicked option takes precedence over a number key.
fn merge_frame_input(latched: FrameInput, keyboard: KeyboardShortcuts) -> FrameInput {
    FrameInput {
        selected_option: latched.selected_option.or(keyboard.option),
        next: latched.next || keyboard.next,
        previous: latched.previous || keyboard.previous,
        restart: latched.restart || keyboard.restart,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut PlateScene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (scene.canvas_width as f32 + 2.0 * CANVAS_MARGIN + PANEL_WIDTH) as i32,
            window_height: (scene.canvas_height as f32 + 2.0 * CANVAS_MARGIN) as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut panel_input = AnswerPanelInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let frame_input = merge_frame_input(panel_input.take(), keyboard);
                update_scene(frame_input, &mut scene);

                macroquad::window::clear_background(background);
                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let layout = PlateLayout::from_scene(&scene, screen_width, screen_height);
                draw_plate(&scene, &layout);

                let context = AnswerPanelContext {
                    origin: MacroquadVec2::new(layout.panel_left, 0.0),
                    size: MacroquadVec2::new(PANEL_WIDTH, screen_height),
                    accent: to_macroquad_color(scene.accent),
                    title: &scene.title,
                    progress: scene.progress,
                    options: &scene.options,
                    selected: scene.selected,
                    banner: scene.banner.as_deref(),
                };
                let result = draw_answer_panel(&mut macroquad::ui::root_ui(), &context);
                panel_input.register_panel(result);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Placement of the plate canvas on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PlateLayout {
    scale: f32,
    offset: Vec2,
    panel_left: f32,
}

impl PlateLayout {
    /// Fits the canvas into the screen area left of the answer panel, keeping
    /// its aspect ratio and centring it.
    fn from_scene(scene: &PlateScene, screen_width: f32, screen_height: f32) -> Self {
        let panel_left = (screen_width - PANEL_WIDTH).max(0.0);
        let available = Vec2::new(
            (panel_left - 2.0 * CANVAS_MARGIN).max(0.0),
            (screen_height - 2.0 * CANVAS_MARGIN).max(0.0),
        );
        let canvas = Vec2::new(scene.canvas_width as f32, scene.canvas_height as f32);
        if canvas.x <= f32::EPSILON || canvas.y <= f32::EPSILON {
            return Self {
                scale: 0.0,
                offset: Vec2::ZERO,
                panel_left,
            };
        }
        let scale = (available.x / canvas.x).min(available.y / canvas.y);
        let used = canvas * scale;
        let offset = Vec2::new(
            (panel_left - used.x) / 2.0,
            (screen_height - used.y) / 2.0,
        );
        Self {
            scale,
            offset,
            panel_left,
        }
    }

    fn to_screen(&self, point: Point) -> Vec2 {
        self.offset + Vec2::new(point.x as f32, point.y as f32) * self.scale
    }
}

fn draw_plate(scene: &PlateScene, layout: &PlateLayout) {
    if layout.scale <= f32::EPSILON {
        return;
    }
    macroquad::shapes::draw_rectangle(
        layout.offset.x,
        layout.offset.y,
        scene.canvas_width as f32 * layout.scale,
        scene.canvas_height as f32 * layout.scale,
        to_macroquad_color(scene.background),
    );
    for dot in &scene.dots {
        let center = layout.to_screen(dot.center);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            dot.radius as f32 * layout.scale,
            to_macroquad_color(Color::from(dot.color)),
        );
    }
    if let Some(ring) = scene.border {
        let center = layout.to_screen(ring.center);
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            ring.radius as f32 * layout.scale,
            (ring.line_width as f32 * layout.scale).max(1.0),
            to_macroquad_color(Color::from(ring.color).with_alpha(ring.alpha)),
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
