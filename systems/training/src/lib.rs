#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Odd-one-out training rounds that adapt their difficulty to the learner.
//!
//! Each round shows a square board in which every cell shares one color
//! except a single odd cell. Correct picks shrink the color difference and
//! level up; wrong picks widen it again.

use std::fmt;

use huecheck_core::{AxisSelection, ColorPair, ConfusionAxis, DeficiencyType, Hsl};
use huecheck_system_color_pairs::generate;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Difficulty a fresh session starts at.
pub const INITIAL_DELTA: u32 = 28;
/// Smallest difference the difficulty controls may reach.
pub const MIN_DELTA: u32 = 6;
/// Points awarded for a correct pick.
pub const CORRECT_POINTS: u32 = 10;
/// Points deducted for a wrong pick.
pub const WRONG_PENALTY: u32 = 5;

const EASIER_STEP: u32 = 6;
const HARDER_STEP: u32 = 4;
const CORRECT_STEP: u32 = 2;
const WRONG_STEP: u32 = 2;
const SMALL_BOARD_MAX_LEVEL: u32 = 2;
const SMALL_BOARD: usize = 5;
const LARGE_BOARD: usize = 6;

/// Errors raised by training actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TrainingError {
    /// The picked cell does not exist on the current board.
    #[error("cell {cell} is outside the {cells}-cell board")]
    CellOutOfRange {
        /// Requested cell index.
        cell: usize,
        /// Number of cells on the board.
        cells: usize,
    },
}

/// Result of picking a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// The learner found the odd cell.
    Correct,
    /// The learner picked a base cell.
    Wrong,
}

impl PickOutcome {
    /// Feedback shown after the pick.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Correct => "Correct! Level up.",
            Self::Wrong => "Close. The difference was widened a little to help you.",
        }
    }
}

/// One generated round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Board {
    side: usize,
    odd_cell: usize,
    axis: ConfusionAxis,
    pair: ColorPair,
}

impl Board {
    fn generate<R>(rng: &mut R, level: u32, axis: ConfusionAxis, delta: u32, assist: bool) -> Self
    where
        R: Rng + ?Sized,
    {
        let side = if level <= SMALL_BOARD_MAX_LEVEL {
            SMALL_BOARD
        } else {
            LARGE_BOARD
        };
        let pair = generate(rng, axis, delta as f32, assist);
        let odd_cell = rng.gen_range(0..side * side);
        Self {
            side,
            odd_cell,
            axis,
            pair,
        }
    }

    /// Number of cells per row and column.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.side * self.side
    }

    /// Index of the odd cell in row-major order.
    #[must_use]
    pub const fn odd_cell(&self) -> usize {
        self.odd_cell
    }

    /// Axis the colors were generated along.
    #[must_use]
    pub const fn axis(&self) -> ConfusionAxis {
        self.axis
    }

    /// Base and odd colors of the round.
    #[must_use]
    pub const fn pair(&self) -> ColorPair {
        self.pair
    }

    /// Color of `cell`, or `None` outside the board.
    #[must_use]
    pub fn color(&self, cell: usize) -> Option<Hsl> {
        if cell >= self.cell_count() {
            None
        } else if cell == self.odd_cell {
            Some(self.pair.odd)
        } else {
            Some(self.pair.base)
        }
    }
}

/// Progress of one training session.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSession {
    level: u32,
    score: u32,
    delta: u32,
    selection: AxisSelection,
    detected: Option<DeficiencyType>,
    assist: bool,
    board: Board,
}

impl TrainingSession {
    /// Starts a session at level one.
    ///
    /// `detected` is the stored deficiency type consulted when `selection` is
    /// [`AxisSelection::Auto`].
    pub fn new<R>(
        rng: &mut R,
        selection: AxisSelection,
        detected: Option<DeficiencyType>,
        assist: bool,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let axis = selection.resolve(detected);
        Self {
            level: 1,
            score: 0,
            delta: INITIAL_DELTA,
            selection,
            detected,
            assist,
            board: Board::generate(rng, 1, axis, INITIAL_DELTA, assist),
        }
    }

    /// Current level, starting at one.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Accumulated score, never negative.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Requested color difference for the next round.
    #[must_use]
    pub const fn delta(&self) -> u32 {
        self.delta
    }

    /// Reports whether assist mode is enabled.
    #[must_use]
    pub const fn assist(&self) -> bool {
        self.assist
    }

    /// Axis the session trains, after resolving `Auto`.
    #[must_use]
    pub fn axis(&self) -> ConfusionAxis {
        self.selection.resolve(self.detected)
    }

    /// Round currently on screen.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Scores a pick and deals the next round.
    pub fn pick<R>(&mut self, rng: &mut R, cell: usize) -> Result<PickOutcome, TrainingError>
    where
        R: Rng + ?Sized,
    {
        let cells = self.board.cell_count();
        if cell >= cells {
            return Err(TrainingError::CellOutOfRange { cell, cells });
        }
        let outcome = if cell == self.board.odd_cell {
            self.score += CORRECT_POINTS;
            self.level += 1;
            self.delta = self.delta.saturating_sub(CORRECT_STEP).max(MIN_DELTA);
            PickOutcome::Correct
        } else {
            self.score = self.score.saturating_sub(WRONG_PENALTY);
            self.delta += WRONG_STEP;
            PickOutcome::Wrong
        };
        debug!(
            ?outcome,
            level = self.level,
            score = self.score,
            delta = self.delta,
            "training pick scored"
        );
        self.new_round(rng);
        Ok(outcome)
    }

    /// Widens the difference and deals a new round.
    pub fn easier<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.delta += EASIER_STEP;
        self.new_round(rng);
    }

    /// Narrows the difference, never below [`MIN_DELTA`], and deals a new round.
    pub fn harder<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.delta = self.delta.saturating_sub(HARDER_STEP).max(MIN_DELTA);
        self.new_round(rng);
    }

    /// Changes the trained axis and deals a new round.
    pub fn set_axis<R>(&mut self, rng: &mut R, selection: AxisSelection)
    where
        R: Rng + ?Sized,
    {
        self.selection = selection;
        self.new_round(rng);
    }

    /// Toggles assist mode and deals a new round.
    pub fn set_assist<R>(&mut self, rng: &mut R, assist: bool)
    where
        R: Rng + ?Sized,
    {
        self.assist = assist;
        self.new_round(rng);
    }

    /// Returns to level one with the initial difficulty, keeping axis and assist.
    pub fn reset<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.level = 1;
        self.score = 0;
        self.delta = INITIAL_DELTA;
        self.new_round(rng);
    }

    /// Status line describing the session.
    #[must_use]
    pub fn status(&self) -> TrainingStatus {
        TrainingStatus {
            level: self.level,
            score: self.score,
            delta: self.delta,
            assist: self.assist,
            axis: self.board.axis,
        }
    }

    fn new_round<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.board = Board::generate(rng, self.level, self.axis(), self.delta, self.assist);
    }
}

/// Snapshot rendered as the session's status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainingStatus {
    /// Current level.
    pub level: u32,
    /// Current score.
    pub score: u32,
    /// Current difficulty.
    pub delta: u32,
    /// Whether assist mode is enabled.
    pub assist: bool,
    /// Axis of the round on screen.
    pub axis: ConfusionAxis,
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level: {} | Score: {} | Difference: {}",
            self.level, self.score, self.delta
        )?;
        if self.assist {
            f.write_str(" (assisted)")?;
        }
        write!(f, " \u{b7} {}", self.axis.label())
    }
}
