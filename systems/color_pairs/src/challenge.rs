//! Level-wide color traps for symbol matching boards.

use huecheck_core::{ChallengeMode, ColorPair, Hsl};
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

const NEUTRAL_SATURATION: f32 = 65.0;
const NEUTRAL_LIGHTNESS: f32 = 50.0;

type Triple = (f32, f32, f32);

const RED_GREEN_POOL: [(Triple, Triple); 3] = [
    ((20.0, 70.0, 52.0), (120.0, 42.0, 52.0)),
    ((30.0, 65.0, 55.0), (110.0, 40.0, 55.0)),
    ((15.0, 60.0, 50.0), (130.0, 38.0, 50.0)),
];

const BLUE_YELLOW_POOL: [(Triple, Triple); 3] = [
    ((205.0, 70.0, 50.0), (55.0, 80.0, 55.0)),
    ((200.0, 65.0, 52.0), (50.0, 75.0, 58.0)),
    ((215.0, 60.0, 48.0), (60.0, 70.0, 55.0)),
];

fn hsl((hue, saturation, lightness): Triple) -> Hsl {
    Hsl::new(hue, saturation, lightness)
}

/// Curated near-confusable pairs for `mode`. Empty for [`ChallengeMode::None`].
#[must_use]
pub fn challenge_pool(mode: ChallengeMode) -> Vec<ColorPair> {
    let pool: &[(Triple, Triple)] = match mode {
        ChallengeMode::None => &[],
        ChallengeMode::RedGreen => &RED_GREEN_POOL,
        ChallengeMode::BlueYellow => &BLUE_YELLOW_POOL,
    };
    pool.iter()
        .map(|(base, odd)| ColorPair::new(hsl(*base), hsl(*odd)))
        .collect()
}

/// Colors fixed for one symbol during a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolColor {
    /// Trap pair assigned to the symbol, absent without a challenge.
    pub pair: Option<ColorPair>,
    /// Color every card bearing the symbol is drawn with.
    pub color: Hsl,
}

/// Symbol-to-color assignment that stays fixed for an entire level.
#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeColorMap {
    mode: ChallengeMode,
    entries: Vec<(char, SymbolColor)>,
}

impl ChallengeColorMap {
    /// Assigns colors to each distinct symbol in `symbols`.
    ///
    /// With a challenge, the curated pool is shuffled and dealt to symbols in
    /// order, wrapping around when there are more symbols than pairs; each
    /// symbol then settles on one member of its pair. Without a challenge each
    /// symbol receives an unrelated random hue.
    pub fn build<R>(mode: ChallengeMode, symbols: &[char], rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut pool = challenge_pool(mode);
        pool.shuffle(rng);

        let mut entries: Vec<(char, SymbolColor)> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if entries.iter().any(|(known, _)| known == symbol) {
                continue;
            }
            let entry = if pool.is_empty() {
                SymbolColor {
                    pair: None,
                    color: Hsl::new(
                        rng.gen_range(0..360) as f32,
                        NEUTRAL_SATURATION,
                        NEUTRAL_LIGHTNESS,
                    ),
                }
            } else {
                let pair = pool[entries.len() % pool.len()];
                let color = if rng.gen_bool(0.5) { pair.base } else { pair.odd };
                SymbolColor {
                    pair: Some(pair),
                    color,
                }
            };
            entries.push((*symbol, entry));
        }
        debug!(?mode, symbols = entries.len(), "challenge colors assigned");
        Self { mode, entries }
    }

    /// Challenge the map was built for.
    #[must_use]
    pub const fn mode(&self) -> ChallengeMode {
        self.mode
    }

    /// Colors assigned to `symbol`, if it was part of the level.
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<SymbolColor> {
        self.entries
            .iter()
            .find(|(known, _)| *known == symbol)
            .map(|(_, entry)| *entry)
    }

    /// Trap pair assigned to `symbol`.
    #[must_use]
    pub fn pair_for(&self, symbol: char) -> Option<ColorPair> {
        self.get(symbol).and_then(|entry| entry.pair)
    }

    /// Color every card bearing `symbol` is drawn with.
    #[must_use]
    pub fn color_for(&self, symbol: char) -> Option<Hsl> {
        self.get(symbol).map(|entry| entry.color)
    }

    /// Distinct symbols in first-seen order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(symbol, _)| *symbol)
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the map holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
