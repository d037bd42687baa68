#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic classifier that turns a completed answer record into a verdict.

use huecheck_core::{AnswerRecord, DeficiencyType, DisplayMode, Event, Plate, PlateCategory, Verdict};
use tracing::info;

/// Misses within a bucket that make the bucket significant.
pub const MISS_THRESHOLD: u32 = 2;

/// Per-category miss counts of an answer record.
///
/// Unanswered plates count as misses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MissCounts {
    /// Missed control plates.
    pub control: u32,
    /// Missed generic red-green plates.
    pub red_green: u32,
    /// Missed protan-leaning plates.
    pub protan: u32,
    /// Missed deutan-leaning plates.
    pub deutan: u32,
    /// Missed tritan-leaning plates.
    pub tritan: u32,
}

impl MissCounts {
    /// Tallies misses for `plates` against `answers`.
    ///
    /// Plates beyond the end of the record are treated as unanswered.
    #[must_use]
    pub fn tally(plates: &[Plate], answers: &AnswerRecord) -> Self {
        let mut counts = Self::default();
        for (index, plate) in plates.iter().enumerate() {
            if !plate.is_miss(answers.choice(index)) {
                continue;
            }
            let bucket = match plate.category() {
                PlateCategory::Control => &mut counts.control,
                PlateCategory::RedGreen => &mut counts.red_green,
                PlateCategory::ProtanLeaning => &mut counts.protan,
                PlateCategory::DeutanLeaning => &mut counts.deutan,
                PlateCategory::TritanLeaning => &mut counts.tritan,
            };
            *bucket += 1;
        }
        counts
    }

    /// Maps the counts onto a verdict. First matching rule wins.
    ///
    /// An unreliable session keeps `active_mode` as its recommendation. Tritan
    /// misses are checked before the red-green bucket, and equal protan and
    /// deutan counts resolve to deuteranopia.
    #[must_use]
    pub fn verdict(&self, active_mode: DisplayMode) -> Verdict {
        if self.control >= MISS_THRESHOLD {
            return Verdict::new(DeficiencyType::Indeterminate, active_mode);
        }
        let category = if self.tritan >= MISS_THRESHOLD {
            DeficiencyType::Tritanopia
        } else if self.red_green >= MISS_THRESHOLD {
            if self.protan > self.deutan {
                DeficiencyType::Protanopia
            } else {
                DeficiencyType::Deuteranopia
            }
        } else {
            DeficiencyType::Normal
        };
        let recommended_mode = category.display_mode().unwrap_or(active_mode);
        Verdict::new(category, recommended_mode)
    }
}

/// Classifies `answers` for `plates`.
///
/// Total over every input: each combination of misses maps to exactly one verdict.
#[must_use]
pub fn classify(plates: &[Plate], answers: &AnswerRecord, active_mode: DisplayMode) -> Verdict {
    MissCounts::tally(plates, answers).verdict(active_mode)
}

/// Pure system that classifies a session once it completes.
#[derive(Debug, Default)]
pub struct Classifier {
    last_verdict: Option<Verdict>,
}

impl Classifier {
    /// Creates a classifier that has not yet observed a completed session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verdict published by the most recent completion, if any.
    #[must_use]
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    /// Consumes session events and emits [`Event::VerdictReady`] for every
    /// [`Event::AssessmentCompleted`] observed.
    ///
    /// Restarting the session (the first plate being entered again) forgets
    /// the previous verdict.
    pub fn handle(
        &mut self,
        events: &[Event],
        plates: &[Plate],
        answers: &AnswerRecord,
        active_mode: DisplayMode,
        out: &mut Vec<Event>,
    ) {
        for event in events {
            match event {
                Event::AssessmentCompleted => {
                    let counts = MissCounts::tally(plates, answers);
                    let verdict = counts.verdict(active_mode);
                    info!(
                        category = verdict.category.as_str(),
                        recommended_mode = verdict.recommended_mode.as_str(),
                        ?counts,
                        "assessment classified"
                    );
                    self.last_verdict = Some(verdict);
                    out.push(Event::VerdictReady { verdict });
                }
                Event::PlateEntered { index: 0, .. } => {
                    self.last_verdict = None;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_misses_are_normal() {
        let verdict = MissCounts::default().verdict(DisplayMode::Tritanopia);
        assert_eq!(
            verdict,
            Verdict::new(DeficiencyType::Normal, DisplayMode::Normal)
        );
    }

    #[test]
    fn control_misses_override_every_other_bucket() {
        let counts = MissCounts {
            control: 2,
            red_green: 3,
            protan: 1,
            deutan: 0,
            tritan: 2,
        };
        assert_eq!(
            counts.verdict(DisplayMode::Protanopia),
            Verdict::new(DeficiencyType::Indeterminate, DisplayMode::Protanopia)
        );
    }

    #[test]
    fn single_misses_stay_below_threshold() {
        let counts = MissCounts {
            control: 1,
            red_green: 1,
            protan: 1,
            deutan: 1,
            tritan: 1,
        };
        assert_eq!(
            counts.verdict(DisplayMode::Normal).category,
            DeficiencyType::Normal
        );
    }

    #[test]
    fn deutan_majority_is_deuteranopia() {
        let counts = MissCounts {
            red_green: 2,
            deutan: 1,
            ..MissCounts::default()
        };
        assert_eq!(
            counts.verdict(DisplayMode::Normal),
            Verdict::new(DeficiencyType::Deuteranopia, DisplayMode::Deuteranopia)
        );
    }

    #[test]
    fn every_bucket_combination_yields_a_verdict() {
        for control in 0..3 {
            for red_green in 0..4 {
                for protan in 0..2 {
                    for deutan in 0..2 {
                        for tritan in 0..3 {
                            let counts = MissCounts {
                                control,
                                red_green,
                                protan,
                                deutan,
                                tritan,
                            };
                            let verdict = counts.verdict(DisplayMode::Normal);
                            if verdict.category != DeficiencyType::Indeterminate {
                                assert_eq!(
                                    verdict.category.display_mode(),
                                    Some(verdict.recommended_mode)
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}
