//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Buttons pressed on the answer panel during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AnswerPanelResult {
    /// Option button that was clicked.
    pub(crate) option: Option<usize>,
    /// Whether the next button was clicked.
    pub(crate) next: bool,
    /// Whether the previous button was clicked.
    pub(crate) previous: bool,
    /// Whether the restart button was clicked.
    pub(crate) restart: bool,
}

/// Snapshot of the answer panel's layout and content for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AnswerPanelContext<'a> {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Accent of the active display mode, used for the selected option.
    pub(crate) accent: Color,
    /// Heading of the current plate.
    pub(crate) title: &'a str,
    /// One-based position and plate count.
    pub(crate) progress: (usize, usize),
    /// Option labels in order.
    pub(crate) options: &'a [String],
    /// Option currently chosen.
    pub(crate) selected: Option<usize>,
    /// Status line such as a missing-answer prompt or the verdict.
    pub(crate) banner: Option<&'a str>,
}

/// Renders the answer panel and reports which buttons were clicked.
pub(crate) fn draw_answer_panel(ui: &mut Ui, context: &AnswerPanelContext<'_>) -> AnswerPanelResult {
    let background = Color::from_rgba(32, 32, 36, 255);
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(background)
        .color_hovered(background)
        .color_clicked(background)
        .color_selected(background)
        .color_selected_hovered(background)
        .color_inactive(background)
        .text_color(WHITE)
        .margin(RectOffset::new(16.0, 16.0, 16.0, 16.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(context.accent)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut result = AnswerPanelResult::default();
    let _ = ui.window(hash!("answer_panel"), context.origin, context.size, |ui| {
        ui.label(None, context.title);
        let (position, total) = context.progress;
        ui.label(None, format!("{position} / {total}").as_str());
        ui.label(None, "Which number do you see?");

        for (index, option) in context.options.iter().enumerate() {
            let label = if context.selected == Some(index) {
                format!("[{}] {option}  <", index + 1)
            } else {
                format!("[{}] {option}", index + 1)
            };
            if ui.button(None, label.as_str()) {
                result.option = Some(index);
            }
        }

        result.previous = ui.button(None, "Previous");
        result.next = ui.button(None, "Next");
        result.restart = ui.button(None, "Restart");

        if let Some(banner) = context.banner {
            ui.label(None, banner);
        }
    });

    ui.pop_skin();
    result
}
