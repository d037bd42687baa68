use serde::{Deserialize, Serialize};

use crate::{Rgb, Seed};

/// Option text offered on every plate for learners who cannot read a numeral.
pub const NOTHING_OPTION: &str = "I see nothing";

/// Screening bucket a plate contributes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlateCategory {
    /// Readable by every viewer; misses indicate an unreliable session.
    Control,
    /// Generic red-green screening plate.
    RedGreen,
    /// Plate whose palette is hardest for protan viewers.
    ProtanLeaning,
    /// Plate whose palette is hardest for deutan viewers.
    DeutanLeaning,
    /// Plate whose palette is hardest for tritan viewers.
    TritanLeaning,
}

/// Closed table of dot palettes used by the plate generator.
///
/// `A` palettes were designed for numerals and `B` palettes for fields, but
/// plates may swap them to invert the figure and ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Palette {
    /// Dark slate blues.
    ControlA,
    /// Purples.
    ControlB,
    /// Orange and red-orange.
    RedGreenA,
    /// Mid greens.
    RedGreenB,
    /// Reds.
    ProtanA,
    /// Light greens.
    ProtanB,
    /// Bright greens.
    DeutanA,
    /// Yellows and oranges.
    DeutanB,
    /// Blues.
    TritanA,
    /// Yellows.
    TritanB,
}

const CONTROL_A: [Rgb; 3] = [
    Rgb::from_hex(0x2c3e50),
    Rgb::from_hex(0x34495e),
    Rgb::from_hex(0x22313f),
];
const CONTROL_B: [Rgb; 3] = [
    Rgb::from_hex(0x8e44ad),
    Rgb::from_hex(0x9b59b6),
    Rgb::from_hex(0x7d3c98),
];
const RED_GREEN_A: [Rgb; 3] = [
    Rgb::from_hex(0xd35400),
    Rgb::from_hex(0xe67e22),
    Rgb::from_hex(0xca6f1e),
];
const RED_GREEN_B: [Rgb; 3] = [
    Rgb::from_hex(0x1e8449),
    Rgb::from_hex(0x27ae60),
    Rgb::from_hex(0x239b56),
];
const PROTAN_A: [Rgb; 3] = [
    Rgb::from_hex(0xc0392b),
    Rgb::from_hex(0xe74c3c),
    Rgb::from_hex(0xcd6155),
];
const PROTAN_B: [Rgb; 3] = [
    Rgb::from_hex(0x7dcea0),
    Rgb::from_hex(0x52be80),
    Rgb::from_hex(0x27ae60),
];
const DEUTAN_A: [Rgb; 3] = [
    Rgb::from_hex(0x2ecc71),
    Rgb::from_hex(0x27ae60),
    Rgb::from_hex(0x58d68d),
];
const DEUTAN_B: [Rgb; 3] = [
    Rgb::from_hex(0xf39c12),
    Rgb::from_hex(0xf5b041),
    Rgb::from_hex(0xd68910),
];
const TRITAN_A: [Rgb; 3] = [
    Rgb::from_hex(0x2874a6),
    Rgb::from_hex(0x3498db),
    Rgb::from_hex(0x2e86c1),
];
const TRITAN_B: [Rgb; 3] = [
    Rgb::from_hex(0xf4d03f),
    Rgb::from_hex(0xf7dc6f),
    Rgb::from_hex(0xd4ac0d),
];

impl Palette {
    /// Colors composing the palette. Never empty.
    #[must_use]
    pub const fn colors(self) -> &'static [Rgb] {
        match self {
            Self::ControlA => &CONTROL_A,
            Self::ControlB => &CONTROL_B,
            Self::RedGreenA => &RED_GREEN_A,
            Self::RedGreenB => &RED_GREEN_B,
            Self::ProtanA => &PROTAN_A,
            Self::ProtanB => &PROTAN_B,
            Self::DeutanA => &DEUTAN_A,
            Self::DeutanB => &DEUTAN_B,
            Self::TritanA => &TRITAN_A,
            Self::TritanB => &TRITAN_B,
        }
    }
}

/// Immutable description of a single screening plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Plate {
    id: &'static str,
    label: &'static str,
    category: PlateCategory,
    target: &'static str,
    options: &'static [&'static str],
    correct_option: usize,
    foreground: Palette,
    background: Palette,
}

impl Plate {
    /// Creates a new plate descriptor.
    ///
    /// `foreground` colors the numeral dots and `background` the field dots.
    #[must_use]
    #[allow(clippy::too_many_arguments)] // Plate tables spell out every field explicitly.
    pub const fn new(
        id: &'static str,
        label: &'static str,
        category: PlateCategory,
        target: &'static str,
        options: &'static [&'static str],
        correct_option: usize,
        foreground: Palette,
        background: Palette,
    ) -> Self {
        Self {
            id,
            label,
            category,
            target,
            options,
            correct_option,
            foreground,
            background,
        }
    }

    /// Stable identifier of the plate.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Title shown above the plate.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Screening bucket of the plate.
    #[must_use]
    pub const fn category(&self) -> PlateCategory {
        self.category
    }

    /// Numeral hidden in the dot field.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// Selectable answers in presentation order.
    #[must_use]
    pub const fn options(&self) -> &'static [&'static str] {
        self.options
    }

    /// Index of the option a typical viewer selects.
    #[must_use]
    pub const fn correct_option(&self) -> usize {
        self.correct_option
    }

    /// Palette used for dots inside the numeral.
    #[must_use]
    pub const fn foreground(&self) -> Palette {
        self.foreground
    }

    /// Palette used for dots outside the numeral.
    #[must_use]
    pub const fn background(&self) -> Palette {
        self.background
    }

    /// Reports whether `choice` counts as a miss for this plate.
    ///
    /// Unanswered plates are misses.
    #[must_use]
    pub fn is_miss(&self, choice: Option<usize>) -> bool {
        choice != Some(self.correct_option)
    }

    /// Key hashed into the render seed for the plate at `index`.
    #[must_use]
    pub fn seed_key(&self, index: usize) -> String {
        format!("{}:{index}", self.id)
    }

    /// Render seed for the plate at `index`, stable across sessions.
    #[must_use]
    pub fn seed(&self, index: usize) -> Seed {
        Seed::from_key(&self.seed_key(index))
    }
}

/// Learner choices indexed by plate position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerRecord {
    choices: Vec<Option<usize>>,
}

impl AnswerRecord {
    /// Creates an empty record for `plates` plates.
    #[must_use]
    pub fn unanswered(plates: usize) -> Self {
        Self {
            choices: vec![None; plates],
        }
    }

    /// Creates a record from explicit choices.
    #[must_use]
    pub fn from_choices(choices: Vec<Option<usize>>) -> Self {
        Self { choices }
    }

    /// Number of plates covered by the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Reports whether the record covers no plates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Choice recorded for `index`, if any.
    #[must_use]
    pub fn choice(&self, index: usize) -> Option<usize> {
        self.choices.get(index).copied().flatten()
    }

    /// Reports whether `index` holds a choice.
    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.choice(index).is_some()
    }

    /// Stores `option` for `index`. Out-of-range indices are ignored.
    pub fn record(&mut self, index: usize, option: usize) {
        if let Some(slot) = self.choices.get_mut(index) {
            *slot = Some(option);
        }
    }

    /// Marks every plate as unanswered.
    pub fn clear(&mut self) {
        self.choices.iter_mut().for_each(|slot| *slot = None);
    }

    /// Iterator over the recorded choices in plate order.
    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.choices.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{AnswerRecord, Palette, Plate, PlateCategory, NOTHING_OPTION};

    const SAMPLE: Plate = Plate::new(
        "C1",
        "Plate 1 (control)",
        PlateCategory::Control,
        "12",
        &["12", "8", "3", NOTHING_OPTION],
        0,
        Palette::ControlA,
        Palette::ControlB,
    );

    #[test]
    fn seed_key_combines_identity_and_position() {
        assert_eq!(SAMPLE.seed_key(0), "C1:0");
        assert_eq!(SAMPLE.seed(0).get(), 0xcfd1_676b);
    }

    #[test]
    fn unanswered_and_wrong_choices_are_misses() {
        assert!(SAMPLE.is_miss(None));
        assert!(SAMPLE.is_miss(Some(3)));
        assert!(!SAMPLE.is_miss(Some(0)));
    }

    #[test]
    fn answer_record_ignores_out_of_range_writes() {
        let mut record = AnswerRecord::unanswered(2);
        record.record(5, 1);
        record.record(1, 2);
        assert_eq!(record.iter().collect::<Vec<_>>(), vec![None, Some(2)]);

        record.clear();
        assert!(!record.is_answered(1));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn every_palette_is_populated() {
        let palettes = [
            Palette::ControlA,
            Palette::ControlB,
            Palette::RedGreenA,
            Palette::RedGreenB,
            Palette::ProtanA,
            Palette::ProtanB,
            Palette::DeutanA,
            Palette::DeutanB,
            Palette::TritanA,
            Palette::TritanB,
        ];
        for palette in palettes {
            assert_eq!(palette.colors().len(), 3, "{palette:?}");
        }
    }
}
