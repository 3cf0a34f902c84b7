// The deterministic value oracle: string key in, number in [0, 1) out.
//
// Every procedural decision about a cell is a roll against this oracle,
// keyed by the cell's coordinates plus a purpose tag (see
// `CellCoord::roll_key`). The production oracle is `HashOracle`, which
// hashes the key into a fresh `GameRng` and takes its first draw. Tests
// substitute a closure to force particular cells.

use cache_crafter_prng::GameRng;

/// A pure, total mapping from string keys to `[0, 1)`.
///
/// Implementations must be deterministic: the same key always yields the
/// same value, with no hidden mutable state.
pub trait ValueOracle {
    fn roll(&self, key: &str) -> f64;
}

/// The default oracle. Stateless; identical across instances, runs and
/// platforms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashOracle;

impl ValueOracle for HashOracle {
    fn roll(&self, key: &str) -> f64 {
        GameRng::from_key(key).next_f64()
    }
}

impl<F> ValueOracle for F
where
    F: Fn(&str) -> f64,
{
    fn roll(&self, key: &str) -> f64 {
        self(key)
    }
}
