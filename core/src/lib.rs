#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the huecheck engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative assessment session, and pure systems. Adapters submit
//! [`Command`] values describing learner actions, the session executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond with values or further events.
//!
//! The crate also owns the leaf building blocks every other crate agrees on:
//! the seeded xorshift32 stream, color types, the closed enumerations of
//! display modes, deficiency types and confusion axes, plate descriptors, and
//! the drawing-surface and preference-store boundaries.

mod color;
mod modes;
mod plate;
mod preferences;
mod seed;
mod surface;

use serde::{Deserialize, Serialize};

pub use color::{ColorPair, Hsl, Rgb};
pub use modes::{
    AxisSelection, ChallengeMode, ConfusionAxis, DeficiencyType, DisplayMode, ParseAxisError,
    ParseDeficiencyError, ParseModeError,
};
pub use plate::{AnswerRecord, Palette, Plate, PlateCategory, NOTHING_OPTION};
pub use preferences::{
    detected_deficiency, display_mode, save_verdict, set_display_mode, MemoryPreferences,
    PreferenceStore, DEFICIENCY_TYPE_KEY, DISPLAY_MODE_KEY, ONBOARDING_DONE_KEY,
};
pub use seed::{hash_seed, RngState, Seed};
pub use surface::{AlphaMask, Dot, DrawingSurface, FontSpec, Point, Ring, TextRasterizer};

/// Classifier output for a completed assessment.
///
/// Verdicts are derived on demand from the answer record and never stored as
/// session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    /// Detected deficiency category.
    pub category: DeficiencyType,
    /// Display mode the interface should switch to.
    pub recommended_mode: DisplayMode,
}

impl Verdict {
    /// Creates a new verdict.
    #[must_use]
    pub const fn new(category: DeficiencyType, recommended_mode: DisplayMode) -> Self {
        Self {
            category,
            recommended_mode,
        }
    }

    /// Human readable headline for the verdict.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.category.label()
    }

    /// Sentence presented beneath the headline.
    #[must_use]
    pub fn hint(&self) -> String {
        format!(
            "Orientative result used to personalise accessibility. Recommended mode: {}.",
            self.recommended_mode.label()
        )
    }
}

/// Position of an assessment session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentState {
    /// Showing the plate at the given zero-based index.
    AtPlate(usize),
    /// Every plate was answered and the learner finished the session.
    Completed,
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Records the learner's choice for the current plate.
    SelectOption {
        /// Zero-based index into the current plate's options.
        option: usize,
    },
    /// Advances to the next plate, or completes the session on the last one.
    NextPlate,
    /// Returns to the previous plate.
    PreviousPlate,
    /// Clears every answer and returns to the first plate.
    Restart,
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A plate became current and must be rendered.
    PlateEntered {
        /// Zero-based index of the plate.
        index: usize,
        /// Identity-derived seed to render the plate with.
        seed: Seed,
    },
    /// A choice was stored for a plate without re-rendering it.
    AnswerRecorded {
        /// Zero-based index of the plate.
        index: usize,
        /// Zero-based option index that was chosen.
        option: usize,
    },
    /// The learner tried to advance past a plate without answering it.
    AnswerMissing {
        /// Zero-based index of the unanswered plate.
        index: usize,
    },
    /// A choice referenced an option the plate does not offer.
    OptionRejected {
        /// Zero-based index of the plate.
        index: usize,
        /// Option index that was rejected.
        option: usize,
    },
    /// The learner finished the last plate.
    AssessmentCompleted,
    /// The classifier produced a verdict for a completed session.
    VerdictReady {
        /// Classification result.
        verdict: Verdict,
    },
}
