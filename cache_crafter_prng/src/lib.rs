// Deterministic, portable key hashing and pseudo-random number generation.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding,
// plus `hash_key()`, which folds an arbitrary string into a 64-bit seed with
// FNV-1a and a SplitMix64 finalizer. Hand-rolled with zero external
// dependencies so the output is identical on every platform.
//
// This crate is the single source of randomness for Cache Crafter. The grid
// never keeps a long-lived generator: every procedural decision seeds a fresh
// `GameRng` from a string key (see `GameRng::from_key`) and takes its first
// draw, so a cell's content is a pure function of its coordinates.
//
// **Critical constraint: determinism.** Every function here must produce
// identical output for identical input, regardless of platform, compiler
// version, or optimization level. No process-specific seeds, no OS entropy,
// no stdlib hashers (their keys are randomized per process).

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Xoshiro256++ PRNG.
///
/// Seeded either from a `u64` or from a string key. Two generators built
/// from the same seed (or the same key) produce identical sequences.
#[derive(Clone, Debug)]
pub struct GameRng {
    s: [u64; 4],
}

impl GameRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Create a PRNG whose seed is derived from a string key.
    ///
    /// Equivalent to `GameRng::new(hash_key(key))`.
    pub fn from_key(key: &str) -> Self {
        Self::new(hash_key(key))
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a uniform `f64` in [0, 1).
    ///
    /// Uses the upper 53 bits of a `u64` to fill the mantissa of an f64.
    /// The integer-to-float conversion is exact, so the result is
    /// bit-identical everywhere.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Hash a string key to a well-mixed `u64`.
///
/// FNV-1a over the UTF-8 bytes, then a SplitMix64 finalizer so that keys
/// differing in a single trailing character (`"3,4,spawn"` vs `"3,5,spawn"`)
/// land far apart.
pub fn hash_key(key: &str) -> u64 {
    let mut h = FNV_OFFSET_BASIS;
    for &byte in key.as_bytes() {
        h ^= u64::from(byte);
        h = h.wrapping_mul(FNV_PRIME);
    }
    splitmix64(&mut h)
}

/// SplitMix64 step. Used for seeding xoshiro256++ and for finalizing
/// `hash_key`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
