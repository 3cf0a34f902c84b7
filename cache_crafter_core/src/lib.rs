// cache_crafter_core is the grid model and interaction rules of Cache Crafter.
//
// A player stands on a fixed cell of an infinite grid. Every cell holds 0 or
// a power of two, derived deterministically from its coordinates. The player
// picks up a token, carries at most one, and drops it on an empty cell or
// merges it with an equal token to double it. A merge at or above the win
// threshold wins the game.
//
// This crate has no rendering, map, or UI dependencies and runs headless.
// Renderers read `GameCore::current_value()` and react to the events each
// call returns; they never write cells directly.
//
// Module overview:
// - `types.rs`:     CellCoord, CellValue, Hand.
// - `oracle.rs`:    ValueOracle trait + HashOracle (key → [0, 1)).
// - `procgen.rs`:   BaseLayer: spawn and value rolls per cell.
// - `overrides.rs`: OverrideStore: sparse record of altered cells.
// - `grid.rs`:      Grid: the single read/write path, composing the two above.
// - `proximity.rs`: ProximityGate: Manhattan-radius reach test.
// - `game.rs`:      GameCore: session state and the click state machine.
// - `command.rs`:   PlayerAction: serialisable player input.
// - `event.rs`:     GameEvent / StepResult: what each call changed.
// - `config.rs`:    GameConfig: all tunables, loaded from JSON.
// - `geo.rs`:       GeoFrame: cell ↔ lat/lng for map renderers.
// - `error.rs`:     ConfigError, GridError.
// - `prng`:         Re-exported from `cache_crafter_prng`.
//
// **Critical constraint: determinism.** A cell's base value depends only on
// its coordinates. No system time, no OS entropy, no randomly keyed hashers.

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod geo;
pub mod grid;
pub mod oracle;
pub mod overrides;
pub use cache_crafter_prng as prng;
pub mod procgen;
pub mod proximity;
pub mod types;
