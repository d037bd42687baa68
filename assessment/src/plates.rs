//! Standard eight-plate screening sequence.

use huecheck_core::{Palette, Plate, PlateCategory, NOTHING_OPTION};

/// Plates presented by a default session, in order.
pub const STANDARD_PLATES: [Plate; 8] = [
    Plate::new(
        "C1",
        "Plate 1 (control)",
        PlateCategory::Control,
        "12",
        &["12", "8", "3", NOTHING_OPTION],
        0,
        Palette::ControlA,
        Palette::ControlB,
    ),
    Plate::new(
        "RG1",
        "Plate 2",
        PlateCategory::RedGreen,
        "7",
        &["7", "1", "4", NOTHING_OPTION],
        0,
        Palette::RedGreenA,
        Palette::RedGreenB,
    ),
    Plate::new(
        "RG2",
        "Plate 3",
        PlateCategory::RedGreen,
        "45",
        &["45", "29", "15", NOTHING_OPTION],
        0,
        Palette::RedGreenB,
        Palette::RedGreenA,
    ),
    Plate::new(
        "P1",
        "Plate 4",
        PlateCategory::ProtanLeaning,
        "6",
        &["6", "8", NOTHING_OPTION, "2"],
        0,
        Palette::ProtanA,
        Palette::ProtanB,
    ),
    Plate::new(
        "D1",
        "Plate 5",
        PlateCategory::DeutanLeaning,
        "3",
        &["3", "5", NOTHING_OPTION, "9"],
        0,
        Palette::DeutanA,
        Palette::DeutanB,
    ),
    Plate::new(
        "T1",
        "Plate 6",
        PlateCategory::TritanLeaning,
        "16",
        &["16", "18", NOTHING_OPTION, "10"],
        0,
        Palette::TritanA,
        Palette::TritanB,
    ),
    Plate::new(
        "T2",
        "Plate 7",
        PlateCategory::TritanLeaning,
        "2",
        &["2", "5", NOTHING_OPTION, "7"],
        0,
        Palette::TritanB,
        Palette::TritanA,
    ),
    Plate::new(
        "RG3",
        "Plate 8",
        PlateCategory::RedGreen,
        "9",
        &["9", "0", "6", NOTHING_OPTION],
        0,
        Palette::RedGreenA,
        Palette::RedGreenB,
    ),
];

/// Looks up a standard plate and its position by identifier.
#[must_use]
pub fn find_standard_plate(id: &str) -> Option<(usize, Plate)> {
    STANDARD_PLATES
        .iter()
        .enumerate()
        .find(|(_, plate)| plate.id().eq_ignore_ascii_case(id))
        .map(|(index, plate)| (index, *plate))
}
