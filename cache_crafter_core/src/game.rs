// Game session state and the pickup/merge/drop state machine.
//
// `GameCore` is the single source of truth for a session. It owns the
// config, the grid (procedural base layer + override store), the proximity
// gate, and the player's hand. Nothing is global: any number of sessions can
// coexist, which is how the tests run.
//
// ## Click handling
//
// `on_cell_clicked(coord)` is the only way play changes state. In order:
//
//   1. Out of reach (`!is_nearby`) → nothing happens.
//   2. Read `here = current_value(coord)`.
//   3. Idle, here > 0          → pick up: cell becomes 0, hand holds `here`.
//   4. Holding v, here == v    → merge: cell becomes 2v, hand empties; a win
//                                if 2v >= win_threshold.
//   5. Holding v, here == 0    → drop: cell becomes v, hand empties.
//   6. Holding v, other value  → nothing happens.
//   7. Idle, here == 0         → nothing happens.
//
// Case 4 is matched before case 6. Only merges are checked for a win; a drop
// never wins, even if it places a value at or above the threshold. A merge
// whose result would not fit in a `CellValue` is treated like case 6.
//
// Each click returns a `StepResult` with the events it caused (see
// `event.rs`). The game has no terminal state: after a win, play continues.
//
// ## Outside writes
//
// `place_value()` lets a driver put a value on a cell directly (level
// setup, debugging). It goes through the grid's validated write path and is
// never used by the click handler.
//
// See also: `grid.rs` for the accessor, `proximity.rs` for the gate,
// `config.rs` for `GameConfig`, `command.rs` for `PlayerAction`.

use crate::command::PlayerAction;
use crate::config::GameConfig;
use crate::error::{ConfigError, GridError};
use crate::event::{GameEvent, GameEventKind, StepResult};
use crate::grid::{CellChange, Grid};
use crate::oracle::{HashOracle, ValueOracle};
use crate::procgen::BaseLayer;
use crate::proximity::ProximityGate;
use crate::types::{CellCoord, CellValue, Hand};
use tracing::{debug, info, trace};

/// One game session.
#[derive(Clone, Debug)]
pub struct GameCore<O = HashOracle> {
    /// Game configuration (immutable after initialization).
    config: GameConfig,
    grid: Grid<O>,
    gate: ProximityGate,
    hand: Hand,
    /// Number of clicks processed so far.
    turn: u64,
}

impl GameCore<HashOracle> {
    /// Create a session with the default config and the hash oracle.
    pub fn new() -> Self {
        Self::build(GameConfig::default(), HashOracle)
    }

    /// Create a session with the given config and the hash oracle.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_oracle(config, HashOracle)
    }
}

impl Default for GameCore<HashOracle> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ValueOracle> GameCore<O> {
    /// Create a session with the given config and a custom oracle.
    pub fn with_oracle(config: GameConfig, oracle: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, oracle))
    }

    fn build(config: GameConfig, oracle: O) -> Self {
        info!(
            origin = %config.player_origin,
            radius = config.nearby_radius,
            win_threshold = config.win_threshold,
            "starting session"
        );
        let grid = Grid::new(BaseLayer::new(oracle, config.spawn_probability));
        let gate = ProximityGate::new(config.player_origin, config.nearby_radius);
        Self {
            config,
            grid,
            gate,
            hand: Hand::Idle,
            turn: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid<O> {
        &self.grid
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// The carried value, 0 when idle.
    pub fn holding(&self) -> CellValue {
        self.hand.value()
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn current_value(&self, coord: CellCoord) -> CellValue {
        self.grid.current_value(coord)
    }

    pub fn is_nearby(&self, coord: CellCoord) -> bool {
        self.gate.is_nearby(coord)
    }

    /// Apply a batch of actions in order, collecting every event.
    pub fn apply(&mut self, actions: &[PlayerAction]) -> StepResult {
        let mut result = StepResult::default();
        for action in actions {
            match action {
                PlayerAction::ClickCell { coord } => result.extend(self.on_cell_clicked(*coord)),
            }
        }
        result
    }

    /// Handle a click on `coord`. See the module docs for the transitions.
    pub fn on_cell_clicked(&mut self, coord: CellCoord) -> StepResult {
        self.turn += 1;
        let mut result = StepResult::default();

        if !self.gate.is_nearby(coord) {
            trace!(%coord, "click out of reach");
            return result;
        }

        let here = self.grid.current_value(coord);
        match (self.hand, here) {
            (Hand::Idle, 0) => {
                trace!(%coord, "nothing to pick up");
            }
            (Hand::Idle, value) => {
                self.write_cell(coord, 0, &mut result);
                self.set_hand(Hand::Holding(value), &mut result);
                debug!(%coord, value, "picked up");
            }
            (Hand::Holding(held), value) if value == held => {
                let Some(merged) = held.checked_mul(2) else {
                    trace!(%coord, held, "merge would overflow");
                    return result;
                };
                self.write_cell(coord, merged, &mut result);
                self.set_hand(Hand::Idle, &mut result);
                debug!(%coord, value = merged, "merged");
                if merged >= self.config.win_threshold {
                    info!(%coord, value = merged, "win");
                    self.emit(GameEventKind::Won { value: merged }, &mut result);
                }
            }
            (Hand::Holding(held), 0) => {
                self.write_cell(coord, held, &mut result);
                self.set_hand(Hand::Idle, &mut result);
                debug!(%coord, value = held, "dropped");
            }
            (Hand::Holding(held), value) => {
                trace!(%coord, held, value, "target holds a different value");
            }
        }
        result
    }

    /// Put `value` on `coord` directly, bypassing the click rules but not
    /// value validation.
    pub fn place_value(
        &mut self,
        coord: CellCoord,
        value: CellValue,
    ) -> Result<Option<CellChange>, GridError> {
        let change = self.grid.try_set_current_value(coord, value)?;
        if let Some(change) = &change {
            debug!(coord = %change.coord, old = change.old, new = change.new, "placed value");
        }
        Ok(change)
    }

    /// Every cell in the square of half-width `neighborhood_radius` around
    /// the player, with its current value. Rows in increasing `i`, columns
    /// in increasing `j`. Rows or columns past the `i32` range are skipped.
    pub fn neighborhood(&self) -> impl Iterator<Item = (CellCoord, CellValue)> + '_ {
        let origin = self.gate.origin();
        let r = i64::from(self.config.neighborhood_radius);
        let rows = (i64::from(origin.i) - r)..=(i64::from(origin.i) + r);
        rows.filter_map(|i| i32::try_from(i).ok())
            .flat_map(move |i| {
                ((i64::from(origin.j) - r)..=(i64::from(origin.j) + r))
                    .filter_map(|j| i32::try_from(j).ok())
                    .map(move |j| CellCoord::new(i, j))
            })
            .map(|coord| (coord, self.grid.current_value(coord)))
    }

    /// Status-panel text: `"Holding: (none)"` or `"Holding: 4"`.
    pub fn status_line(&self) -> String {
        match self.hand {
            Hand::Idle => "Holding: (none)".to_string(),
            Hand::Holding(v) => format!("Holding: {v}"),
        }
    }

    fn write_cell(&mut self, coord: CellCoord, value: CellValue, result: &mut StepResult) {
        if let Some(change) = self.grid.set_current_value(coord, value) {
            self.emit(
                GameEventKind::CellChanged {
                    coord: change.coord,
                    value: change.new,
                },
                result,
            );
        }
    }

    fn set_hand(&mut self, hand: Hand, result: &mut StepResult) {
        self.hand = hand;
        self.emit(
            GameEventKind::HoldingChanged {
                holding: hand.value(),
            },
            result,
        );
    }

    fn emit(&self, kind: GameEventKind, result: &mut StepResult) {
        result.events.push(GameEvent {
            turn: self.turn,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Oracle roll that lands in the bucket for `value`.
    fn value_roll(value: CellValue) -> f64 {
        match value {
            1 => 0.1,
            2 => 0.3,
            4 => 0.6,
            8 => 0.9,
            other => panic!("{other} is not a base value"),
        }
    }

    /// A session where only the listed cells hold tokens.
    fn game_with(cells: &[((i32, i32), CellValue)]) -> GameCore<impl Fn(&str) -> f64> {
        let mut rolls = HashMap::new();
        for &((i, j), v) in cells {
            let c = CellCoord::new(i, j);
            rolls.insert(c.roll_key("spawn"), 0.0);
            rolls.insert(c.roll_key("value"), value_roll(v));
        }
        let oracle = move |key: &str| rolls.get(key).copied().unwrap_or(0.99);
        GameCore::with_oracle(GameConfig::default(), oracle).unwrap()
    }

    fn kinds(result: &StepResult) -> Vec<GameEventKind> {
        result.events.iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn new_game_is_idle() {
        let game = GameCore::new();
        assert_eq!(game.hand(), Hand::Idle);
        assert_eq!(game.holding(), 0);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.status_line(), "Holding: (none)");
    }

    #[test]
    fn with_config_rejects_invalid_config() {
        let config = GameConfig {
            win_threshold: 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameCore::with_config(config),
            Err(ConfigError::WinThreshold(1))
        ));
    }

    #[test]
    fn pickup_empties_cell_and_fills_hand() {
        let mut game = game_with(&[((1, 1), 2)]);
        let result = game.on_cell_clicked(CellCoord::new(1, 1));
        assert_eq!(
            kinds(&result),
            vec![
                GameEventKind::CellChanged {
                    coord: CellCoord::new(1, 1),
                    value: 0
                },
                GameEventKind::HoldingChanged { holding: 2 },
            ]
        );
        assert_eq!(game.hand(), Hand::Holding(2));
        assert_eq!(game.current_value(CellCoord::new(1, 1)), 0);
        assert_eq!(game.status_line(), "Holding: 2");
    }

    #[test]
    fn click_on_empty_cell_while_idle_does_nothing() {
        let mut game = game_with(&[]);
        let result = game.on_cell_clicked(CellCoord::new(0, 1));
        assert!(result.is_empty());
        assert_eq!(game.hand(), Hand::Idle);
        assert!(game.grid().overrides().is_empty());
    }

    #[test]
    fn drop_on_empty_cell() {
        let mut game = game_with(&[((0, 1), 4)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        let result = game.on_cell_clicked(CellCoord::new(1, 0));
        assert_eq!(
            kinds(&result),
            vec![
                GameEventKind::CellChanged {
                    coord: CellCoord::new(1, 0),
                    value: 4
                },
                GameEventKind::HoldingChanged { holding: 0 },
            ]
        );
        assert_eq!(game.current_value(CellCoord::new(1, 0)), 4);
        assert_eq!(game.hand(), Hand::Idle);
    }

    #[test]
    fn dropping_back_on_source_purges_overrides() {
        let mut game = game_with(&[((0, 1), 4)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        assert_eq!(game.grid().overrides().len(), 1);
        let result = game.on_cell_clicked(CellCoord::new(0, 1));
        assert_eq!(result.events.len(), 2);
        assert_eq!(game.current_value(CellCoord::new(0, 1)), 4);
        assert!(game.grid().overrides().is_empty());
    }

    #[test]
    fn merge_doubles_and_empties_hand() {
        let mut game = game_with(&[((0, 1), 4), ((0, 2), 4)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        let result = game.on_cell_clicked(CellCoord::new(0, 2));
        assert_eq!(game.current_value(CellCoord::new(0, 2)), 8);
        assert_eq!(game.holding(), 0);
        assert_eq!(result.won(), None);
    }

    #[test]
    fn merge_at_threshold_wins() {
        let mut game = game_with(&[((0, 1), 8), ((1, 0), 8)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        let result = game.on_cell_clicked(CellCoord::new(1, 0));
        assert_eq!(
            kinds(&result),
            vec![
                GameEventKind::CellChanged {
                    coord: CellCoord::new(1, 0),
                    value: 16
                },
                GameEventKind::HoldingChanged { holding: 0 },
                GameEventKind::Won { value: 16 },
            ]
        );
        assert!(result.events.iter().all(|e| e.turn == 2));
    }

    #[test]
    fn threshold_need_not_be_a_power_of_two() {
        let mut game = game_with(&[((0, 1), 4), ((1, 0), 4), ((0, 2), 8), ((2, 0), 8)]);
        game.config.win_threshold = 10;
        game.on_cell_clicked(CellCoord::new(0, 1));
        assert_eq!(game.on_cell_clicked(CellCoord::new(1, 0)).won(), None);
        game.on_cell_clicked(CellCoord::new(0, 2));
        assert_eq!(game.on_cell_clicked(CellCoord::new(2, 0)).won(), Some(16));
    }

    #[test]
    fn drop_at_or_above_threshold_does_not_win() {
        let mut game = game_with(&[]);
        game.place_value(CellCoord::new(0, 1), 32).unwrap();
        game.on_cell_clicked(CellCoord::new(0, 1));
        let result = game.on_cell_clicked(CellCoord::new(0, 2));
        assert_eq!(game.current_value(CellCoord::new(0, 2)), 32);
        assert_eq!(result.won(), None);
    }

    #[test]
    fn unequal_target_is_ignored() {
        let mut game = game_with(&[((0, 1), 2), ((1, 0), 4)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        let result = game.on_cell_clicked(CellCoord::new(1, 0));
        assert!(result.is_empty());
        assert_eq!(game.holding(), 2);
        assert_eq!(game.current_value(CellCoord::new(1, 0)), 4);
    }

    #[test]
    fn out_of_reach_click_is_ignored() {
        let mut game = game_with(&[((0, 1), 2), ((10, 10), 2)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        let result = game.on_cell_clicked(CellCoord::new(10, 10));
        assert!(result.is_empty());
        assert_eq!(game.holding(), 2);
        assert_eq!(game.current_value(CellCoord::new(10, 10)), 2);
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn overflowing_merge_is_ignored() {
        let mut game = game_with(&[]);
        let big = 1u64 << 63;
        game.place_value(CellCoord::new(0, 1), big).unwrap();
        game.place_value(CellCoord::new(0, 2), big).unwrap();
        game.on_cell_clicked(CellCoord::new(0, 1));
        let result = game.on_cell_clicked(CellCoord::new(0, 2));
        assert!(result.is_empty());
        assert_eq!(game.holding(), big);
        assert_eq!(game.current_value(CellCoord::new(0, 2)), big);
    }

    #[test]
    fn game_continues_after_win() {
        let mut game = game_with(&[((0, 1), 8), ((1, 0), 8), ((0, -1), 1)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        assert!(game.on_cell_clicked(CellCoord::new(1, 0)).won().is_some());
        game.on_cell_clicked(CellCoord::new(0, -1));
        assert_eq!(game.holding(), 1);
    }

    #[test]
    fn apply_collects_events_across_actions() {
        let mut game = game_with(&[((0, 1), 2), ((0, 2), 2)]);
        let result = game.apply(&[
            PlayerAction::ClickCell {
                coord: CellCoord::new(0, 1),
            },
            PlayerAction::ClickCell {
                coord: CellCoord::new(0, 2),
            },
        ]);
        assert_eq!(result.events.len(), 4);
        assert_eq!(result.events[0].turn, 1);
        assert_eq!(result.events[3].turn, 2);
        assert_eq!(game.current_value(CellCoord::new(0, 2)), 4);
    }

    #[test]
    fn place_value_rejects_invalid_values() {
        let mut game = game_with(&[]);
        assert!(game.place_value(CellCoord::new(0, 1), 3).is_err());
        assert_eq!(game.current_value(CellCoord::new(0, 1)), 0);
    }

    #[test]
    fn neighborhood_covers_square_around_player() {
        let config = GameConfig {
            player_origin: CellCoord::new(10, -4),
            neighborhood_radius: 2,
            ..GameConfig::default()
        };
        let game = GameCore::with_config(config).unwrap();
        let cells: Vec<_> = game.neighborhood().collect();
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[0].0, CellCoord::new(8, -6));
        assert_eq!(cells[24].0, CellCoord::new(12, -2));
        for (coord, value) in cells {
            assert_eq!(value, game.current_value(coord));
        }
    }

    #[test]
    fn neighborhood_reflects_mutations() {
        let mut game = game_with(&[((0, 1), 2)]);
        game.on_cell_clicked(CellCoord::new(0, 1));
        let value = game
            .neighborhood()
            .find(|&(c, _)| c == CellCoord::new(0, 1))
            .map(|(_, v)| v);
        assert_eq!(value, Some(0));
    }

    #[test]
    fn neighborhood_clips_at_coordinate_limits() {
        let config = GameConfig {
            player_origin: CellCoord::new(i32::MAX, 0),
            neighborhood_radius: 1,
            ..GameConfig::default()
        };
        let game = GameCore::with_config(config).unwrap();
        assert_eq!(game.neighborhood().count(), 6);
    }
}
