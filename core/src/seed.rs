use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const UNIT_SCALE: f64 = 4_294_967_296.0;

/// Deterministic 32-bit seed derived from a stable string key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seed(u32);

impl Seed {
    /// Wraps an explicit seed value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Derives the seed for the provided key using [`hash_seed`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        hash_seed(key)
    }

    /// Retrieves the numeric representation of the seed.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Hashes `key` with 32-bit FNV-1a.
///
/// The key is consumed one UTF-16 code unit at a time so that the result
/// matches character-code based implementations bit for bit. Total over every
/// string, including the empty one, which yields the offset basis.
#[must_use]
pub fn hash_seed(key: &str) -> Seed {
    let hash = key.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    });
    Seed(hash)
}

/// Single-word xorshift32 generator state.
///
/// The state is passed by value: [`RngState::next`] consumes the current word
/// and returns the drawn value together with the successor state, so a stream
/// can be replayed from any intermediate state without hidden mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RngState(u32);

impl RngState {
    /// Seeds a stream from `seed`, coercing a zero seed to one.
    ///
    /// A zero word is a fixed point of xorshift32 and would freeze the stream.
    #[must_use]
    pub const fn from_seed(seed: Seed) -> Self {
        let word = seed.get();
        Self(if word == 0 { 1 } else { word })
    }

    /// Current 32-bit word of the generator.
    #[must_use]
    pub const fn word(&self) -> u32 {
        self.0
    }

    /// Advances the generator and returns a value in `[0, 1)`.
    #[must_use]
    pub fn next(self) -> (f64, Self) {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        (f64::from(x) / UNIT_SCALE, Self(x))
    }

    /// Draws a value in place, replacing `self` with the successor state.
    pub fn draw(&mut self) -> f64 {
        let (value, next) = self.next();
        *self = next;
        value
    }
}
