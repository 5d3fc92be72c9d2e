//! 合法移動判定
//!
//! 只回答「能不能走到相鄰格」，不計算滑行，也不檢查回合。

use crate::component::{Occupant, Position};
use crate::core_types::{BoardState, TerrainGrid};
use crate::logic::capability::RuleSet;
use crate::logic::movement::{Direction, step_in_direction};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

/// 計算起點棋子的所有合法落點
///
/// 起點為空或在棋盤外時回傳空集合。
pub fn possible_moves(
    terrain: &TerrainGrid,
    board_state: &BoardState,
    rules: &RuleSet,
    from: Position,
) -> BTreeSet<Position> {
    let Some(mover) = board_state.piece_at(from) else {
        return BTreeSet::new();
    };
    Direction::iter()
        .filter_map(|direction| step_in_direction(terrain.board(), from, direction))
        .filter(|to| is_legal_step(terrain, board_state, rules, mover, from, *to))
        .collect()
}

/// 單步是否合法（`to` 必須與 `from` 相鄰）
///
/// 1. `to` 在棋盤內
/// 2. 地形允許進入
/// 3. `to` 為空，或有可以吃掉的敵方棋子
pub fn is_legal_step(
    terrain: &TerrainGrid,
    board_state: &BoardState,
    rules: &RuleSet,
    mover: Occupant,
    from: Position,
    to: Position,
) -> bool {
    let (Some(from_tile), Some(to_tile)) = (terrain.get_tile(from), terrain.get_tile(to)) else {
        return false;
    };
    if !rules.can_enter(mover, to_tile) {
        return false;
    }
    match board_state.piece_at(to) {
        None => true,
        Some(defender) => rules.can_capture(mover, from_tile, defender, to_tile),
    }
}
