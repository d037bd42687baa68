#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative assessment session state for huecheck.
//!
//! A session walks a fixed sequence of plates. Learner actions arrive as
//! [`Command`] values through [`apply`], which mutates the session and
//! reports what happened as [`Event`] values. Entering a plate always emits
//! [`Event::PlateEntered`] so adapters re-render it; recording a choice only
//! emits [`Event::AnswerRecorded`] and never asks for a redraw.

pub mod plates;

use huecheck_core::{AnswerRecord, AssessmentState, Command, Event, Plate};
use thiserror::Error;
use tracing::debug;

pub use plates::{find_standard_plate, STANDARD_PLATES};

/// Errors raised while constructing a session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A session needs at least one plate.
    #[error("an assessment requires at least one plate")]
    NoPlates,
}

/// Represents the authoritative state of one assessment run.
#[derive(Clone, Debug)]
pub struct AssessmentSession {
    plates: Vec<Plate>,
    answers: AnswerRecord,
    state: AssessmentState,
}

impl AssessmentSession {
    /// Creates a session over [`STANDARD_PLATES`], positioned on the first plate.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(STANDARD_PLATES.to_vec())
    }

    /// Creates a session over a custom plate sequence.
    pub fn with_plates(plates: Vec<Plate>) -> Result<Self, SessionError> {
        if plates.is_empty() {
            return Err(SessionError::NoPlates);
        }
        Ok(Self::from_parts(plates))
    }

    fn from_parts(plates: Vec<Plate>) -> Self {
        let answers = AnswerRecord::unanswered(plates.len());
        Self {
            plates,
            answers,
            state: AssessmentState::AtPlate(0),
        }
    }

    fn enter(&mut self, index: usize, out_events: &mut Vec<Event>) {
        self.state = AssessmentState::AtPlate(index);
        let seed = self.plates[index].seed(index);
        debug!(index, seed = seed.get(), "entering plate");
        out_events.push(Event::PlateEntered { index, seed });
    }
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the session, mutating state deterministically.
///
/// Commands other than [`Command::Restart`] are ignored once the session has
/// completed.
pub fn apply(session: &mut AssessmentSession, command: Command, out_events: &mut Vec<Event>) {
    let AssessmentState::AtPlate(index) = session.state else {
        if command == Command::Restart {
            session.answers.clear();
            session.enter(0, out_events);
        } else {
            debug!(?command, "ignoring command on a completed session");
        }
        return;
    };

    match command {
        Command::SelectOption { option } => {
            if option < session.plates[index].options().len() {
                session.answers.record(index, option);
                out_events.push(Event::AnswerRecorded { index, option });
            } else {
                out_events.push(Event::OptionRejected { index, option });
            }
        }
        Command::NextPlate => {
            if !session.answers.is_answered(index) {
                out_events.push(Event::AnswerMissing { index });
            } else if index + 1 < session.plates.len() {
                session.enter(index + 1, out_events);
            } else {
                session.state = AssessmentState::Completed;
                debug!("assessment completed");
                out_events.push(Event::AssessmentCompleted);
            }
        }
        Command::PreviousPlate => {
            if index > 0 {
                session.enter(index - 1, out_events);
            }
        }
        Command::Restart => {
            session.answers.clear();
            session.enter(0, out_events);
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use huecheck_core::{AnswerRecord, AssessmentState, Plate, Seed};

    use super::AssessmentSession;

    /// Current position of the session.
    #[must_use]
    pub fn state(session: &AssessmentSession) -> AssessmentState {
        session.state
    }

    /// Reports whether the learner finished the last plate.
    #[must_use]
    pub fn is_completed(session: &AssessmentSession) -> bool {
        session.state == AssessmentState::Completed
    }

    /// Full plate sequence of the session.
    #[must_use]
    pub fn plates(session: &AssessmentSession) -> &[Plate] {
        &session.plates
    }

    /// Answers recorded so far.
    #[must_use]
    pub fn answers(session: &AssessmentSession) -> &AnswerRecord {
        &session.answers
    }

    /// Index of the plate on screen, if the session has not completed.
    #[must_use]
    pub fn current_index(session: &AssessmentSession) -> Option<usize> {
        match session.state {
            AssessmentState::AtPlate(index) => Some(index),
            AssessmentState::Completed => None,
        }
    }

    /// Plate on screen, if the session has not completed.
    #[must_use]
    pub fn current_plate(session: &AssessmentSession) -> Option<&Plate> {
        current_index(session).and_then(|index| session.plates.get(index))
    }

    /// Choice recorded for the plate on screen.
    #[must_use]
    pub fn current_choice(session: &AssessmentSession) -> Option<usize> {
        current_index(session).and_then(|index| session.answers.choice(index))
    }

    /// Render seed for the plate at `index`.
    #[must_use]
    pub fn plate_seed(session: &AssessmentSession, index: usize) -> Option<Seed> {
        session.plates.get(index).map(|plate| plate.seed(index))
    }

    /// One-based position and plate count, e.g. `(3, 8)`.
    ///
    /// A completed session reports the last position.
    #[must_use]
    pub fn progress(session: &AssessmentSession) -> (usize, usize) {
        let total = session.plates.len();
        let position = current_index(session).map_or(total, |index| index + 1);
        (position, total)
    }

    /// Reports whether the plate on screen is the last one.
    #[must_use]
    pub fn is_last_plate(session: &AssessmentSession) -> bool {
        current_index(session).is_some_and(|index| index + 1 == session.plates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plate_sequence_is_rejected() {
        assert_eq!(
            AssessmentSession::with_plates(Vec::new()).err(),
            Some(SessionError::NoPlates)
        );
    }

    #[test]
    fn fresh_session_starts_on_first_plate() {
        let session = AssessmentSession::new();
        assert_eq!(query::state(&session), AssessmentState::AtPlate(0));
        assert_eq!(query::progress(&session), (1, STANDARD_PLATES.len()));
        assert!(query::answers(&session).iter().all(|choice| choice.is_none()));
    }

    #[test]
    fn completed_session_ignores_navigation() {
        let plate = STANDARD_PLATES[0];
        let mut session = AssessmentSession::with_plates(vec![plate]).expect("one plate");
        let mut events = Vec::new();
        apply(&mut session, Command::SelectOption { option: 0 }, &mut events);
        apply(&mut session, Command::NextPlate, &mut events);
        assert!(query::is_completed(&session));

        events.clear();
        apply(&mut session, Command::PreviousPlate, &mut events);
        apply(&mut session, Command::SelectOption { option: 1 }, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::answers(&session).choice(0), Some(0));
    }
}
