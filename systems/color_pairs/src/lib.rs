#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Confusable color-pair generation along color-vision confusion axes.
//!
//! Every call draws from the caller's random source, so consecutive rounds
//! never repeat. Tests pass a seeded generator to pin the output.

mod challenge;

use std::ops::RangeInclusive;

use huecheck_core::{ColorPair, ConfusionAxis, Hsl};
use rand::Rng;
use tracing::trace;

pub use challenge::{challenge_pool, ChallengeColorMap, SymbolColor};

/// Minimum strength applied whenever assist mode is enabled.
pub const ASSIST_DELTA_FLOOR: f32 = 26.0;
/// Minimum lightness jump of an assisted luminance pair.
pub const LUMINANCE_ASSIST_JUMP: f32 = 28.0;
/// Darkest lightness an odd color may take.
pub const MIN_ODD_LIGHTNESS: f32 = 18.0;
/// Brightest lightness an odd color may take.
pub const MAX_ODD_LIGHTNESS: f32 = 82.0;

/// Band a jittered component is drawn from: `centre ± jitter`, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Jitter {
    centre: i32,
    jitter: i32,
}

impl Jitter {
    fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        (self.centre + rng.gen_range(-self.jitter..=self.jitter)) as f32
    }
}

/// Two opposing hue families sharing saturation and lightness bands.
#[derive(Clone, Debug, PartialEq, Eq)]
struct OpponentAxis {
    first: RangeInclusive<i32>,
    second: RangeInclusive<i32>,
    saturation: Jitter,
    lightness: Jitter,
}

const RED_GREEN: OpponentAxis = OpponentAxis {
    first: 10..=35,
    second: 105..=140,
    saturation: Jitter {
        centre: 60,
        jitter: 8,
    },
    lightness: Jitter {
        centre: 52,
        jitter: 6,
    },
};

const BLUE_YELLOW: OpponentAxis = OpponentAxis {
    first: 190..=220,
    second: 45..=65,
    saturation: Jitter {
        centre: 65,
        jitter: 8,
    },
    lightness: Jitter {
        centre: 55,
        jitter: 6,
    },
};

const LUMINANCE_SATURATION: Jitter = Jitter {
    centre: 55,
    jitter: 10,
};
const LUMINANCE_LIGHTNESS: Jitter = Jitter {
    centre: 55,
    jitter: 8,
};

/// Strength actually applied for the requested `strength_delta`.
///
/// Assist mode never goes below [`ASSIST_DELTA_FLOOR`].
#[must_use]
pub fn effective_delta(strength_delta: f32, assist: bool) -> f32 {
    if assist {
        strength_delta.max(ASSIST_DELTA_FLOOR)
    } else {
        strength_delta
    }
}

/// Generates a base and an odd color separated along `axis`.
///
/// On the luminance axis the pair shares hue and saturation and differs only
/// in lightness. On the opponent axes the pair differs only in hue unless
/// `assist` is set, in which case the odd color is also shifted in lightness.
pub fn generate<R>(rng: &mut R, axis: ConfusionAxis, strength_delta: f32, assist: bool) -> ColorPair
where
    R: Rng + ?Sized,
{
    let delta = effective_delta(strength_delta, assist);
    let pair = match axis {
        ConfusionAxis::Luminance => {
            let hue = rng.gen_range(0..360) as f32;
            let saturation = LUMINANCE_SATURATION.draw(rng);
            let lightness = LUMINANCE_LIGHTNESS.draw(rng);
            let jump = if assist {
                delta.max(LUMINANCE_ASSIST_JUMP)
            } else {
                delta
            };
            let base = Hsl::new(hue, saturation, lightness);
            ColorPair::new(base, base.with_lightness(shifted_lightness(rng, lightness, jump)))
        }
        ConfusionAxis::RedGreen => opponent_pair(rng, &RED_GREEN, delta, assist),
        ConfusionAxis::BlueYellow => opponent_pair(rng, &BLUE_YELLOW, delta, assist),
    };
    trace!(axis = axis.as_str(), delta, assist, base = %pair.base, odd = %pair.odd, "generated pair");
    pair
}

/// Generates a pair from the thread-local random source.
#[must_use]
pub fn generate_random(axis: ConfusionAxis, strength_delta: f32, assist: bool) -> ColorPair {
    generate(&mut rand::thread_rng(), axis, strength_delta, assist)
}

fn opponent_pair<R>(rng: &mut R, axis: &OpponentAxis, delta: f32, assist: bool) -> ColorPair
where
    R: Rng + ?Sized,
{
    let (base_hues, odd_hues) = if rng.gen_bool(0.5) {
        (axis.first.clone(), axis.second.clone())
    } else {
        (axis.second.clone(), axis.first.clone())
    };
    let base_hue = rng.gen_range(base_hues) as f32;
    let odd_hue = rng.gen_range(odd_hues) as f32;
    let saturation = axis.saturation.draw(rng);
    let lightness = axis.lightness.draw(rng);
    let odd_lightness = if assist {
        shifted_lightness(rng, lightness, delta)
    } else {
        lightness
    };
    ColorPair::new(
        Hsl::new(base_hue, saturation, lightness),
        Hsl::new(odd_hue, saturation, odd_lightness),
    )
}

fn shifted_lightness<R>(rng: &mut R, lightness: f32, jump: f32) -> f32
where
    R: Rng + ?Sized,
{
    let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    (lightness + sign * jump / 2.0).clamp(MIN_ODD_LIGHTNESS, MAX_ODD_LIGHTNESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn within(value: f32, band: RangeInclusive<i32>) -> bool {
        value >= *band.start() as f32 && value <= *band.end() as f32
    }

    fn in_either(hue: f32, axis: &OpponentAxis) -> u8 {
        u8::from(within(hue, axis.first.clone())) + 2 * u8::from(within(hue, axis.second.clone()))
    }

    #[test]
    fn effective_delta_floors_only_in_assist_mode() {
        assert_eq!(effective_delta(4.0, false), 4.0);
        assert_eq!(effective_delta(4.0, true), 26.0);
        assert_eq!(effective_delta(40.0, true), 40.0);
    }

    #[test]
    fn red_green_pairs_split_across_hue_families() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let pair = generate(&mut rng, ConfusionAxis::RedGreen, 12.0, false);
            let families = in_either(pair.base.hue(), &RED_GREEN) | in_either(pair.odd.hue(), &RED_GREEN);
            assert_eq!(families, 3, "{pair:?}");
            assert_ne!(
                in_either(pair.base.hue(), &RED_GREEN),
                in_either(pair.odd.hue(), &RED_GREEN)
            );
            assert!(within(pair.base.saturation(), 52..=68));
            assert!(within(pair.base.lightness(), 46..=58));
            assert_eq!(pair.base.saturation(), pair.odd.saturation());
            assert_eq!(pair.base.lightness(), pair.odd.lightness());
        }
    }

    #[test]
    fn blue_yellow_pairs_split_across_hue_families() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let pair = generate(&mut rng, ConfusionAxis::BlueYellow, 12.0, false);
            let base = in_either(pair.base.hue(), &BLUE_YELLOW);
            let odd = in_either(pair.odd.hue(), &BLUE_YELLOW);
            assert_eq!(base | odd, 3, "{pair:?}");
            assert!(within(pair.base.saturation(), 57..=73));
            assert!(within(pair.base.lightness(), 49..=61));
            assert_eq!(pair.lightness_separation(), 0.0);
        }
    }

    #[test]
    fn luminance_pairs_differ_only_in_lightness() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let pair = generate(&mut rng, ConfusionAxis::Luminance, 10.0, false);
            assert_eq!(pair.base.hue(), pair.odd.hue());
            assert!(pair.base.hue() < 360.0);
            assert_eq!(pair.base.saturation(), pair.odd.saturation());
            assert!(within(pair.base.saturation(), 45..=65));
            assert!(within(pair.base.lightness(), 47..=63));
            assert_eq!(pair.lightness_separation(), 5.0);
        }
    }

    #[test]
    fn odd_lightness_is_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let pair = generate(&mut rng, ConfusionAxis::Luminance, 200.0, false);
            let odd = pair.odd.lightness();
            assert!(odd == MIN_ODD_LIGHTNESS || odd == MAX_ODD_LIGHTNESS, "{odd}");
        }
    }

    #[test]
    fn assist_mode_guarantees_minimum_separation() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let axes = [
            ConfusionAxis::Luminance,
            ConfusionAxis::RedGreen,
            ConfusionAxis::BlueYellow,
        ];
        for axis in axes {
            for delta in [0.0, 1.0, 6.0, 12.0, 25.0, 60.0] {
                for _ in 0..200 {
                    let pair = generate(&mut rng, axis, delta, true);
                    assert!(
                        pair.lightness_separation() >= 13.0,
                        "{axis} delta {delta}: {pair:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn unseeded_generation_varies_between_calls() {
        let pairs: Vec<ColorPair> = (0..50)
            .map(|_| generate_random(ConfusionAxis::BlueYellow, 12.0, true))
            .collect();
        for pair in &pairs {
            assert!(pair.lightness_separation() >= 13.0, "{pair:?}");
        }
        assert!(pairs.iter().any(|pair| *pair != pairs[0]));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = generate(&mut ChaCha8Rng::seed_from_u64(1), ConfusionAxis::RedGreen, 8.0, true);
        let second = generate(&mut ChaCha8Rng::seed_from_u64(1), ConfusionAxis::RedGreen, 8.0, true);
        assert_eq!(first, second);
    }
}
