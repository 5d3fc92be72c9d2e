//! 移動邏輯：方向編解碼、單步移動、移動指令、水域滑行

use crate::component::{Board, PieceKind, Position};
use crate::core_types::TerrainGrid;
use crate::error::{LoadError, Result};
use crate::logic::board::offset_position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::trace;

/// 移動方向（四方向）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// 位移量轉方向，只接受四個單位向量
    ///
    /// 零位移、斜向或超過一格都回傳 `None`，呼叫端據此放棄拖曳或點擊手勢。
    pub fn from_offset(dx: isize, dy: isize) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// 從兩個位置推導方向（點擊選取用）
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let (dx, dy) = position_delta(from, to)?;
        Direction::from_offset(dx, dy)
    }

    /// 移動指令中使用的單字元代碼
    pub fn code(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    pub fn from_code(code: char) -> Option<Direction> {
        Direction::iter().find(|direction| direction.code() == code)
    }
}

/// `to - from` 的位移量，超出 `isize` 範圍時回傳 `None`
pub fn position_delta(from: Position, to: Position) -> Option<(isize, isize)> {
    let axis = |a: usize, b: usize| {
        let a = isize::try_from(a).ok()?;
        isize::try_from(b).ok()?.checked_sub(a)
    };
    Some((axis(from.x, to.x)?, axis(from.y, to.y)?))
}

/// 計算從當前位置往指定方向移動一格後的位置，檢查棋盤邊界
///
/// 返回 `None` 當新位置超出棋盤邊界
pub fn step_in_direction(board: Board, pos: Position, direction: Direction) -> Option<Position> {
    let (dx, dy) = direction.offset();
    offset_position(board, pos, dx, dy)
}

/// 移動指令（棋子種類 + 方向）
///
/// 字串形式為 `<種類代碼><方向代碼>`，例如 `rR` 表示鼠往右。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveToken {
    pub kind: PieceKind,
    pub direction: Direction,
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.code(), self.direction.code())
    }
}

impl FromStr for MoveToken {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let (Some(kind), Some(direction), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(LoadError::ParseError(format!("移動指令長度錯誤: `{s}`")).into());
        };
        let kind = PieceKind::from_code(kind)
            .ok_or_else(|| LoadError::ParseError(format!("未知的棋子代碼: `{kind}`")))?;
        let direction = Direction::from_code(direction)
            .ok_or_else(|| LoadError::ParseError(format!("未知的方向代碼: `{direction}`")))?;
        Ok(MoveToken { kind, direction })
    }
}

/// 水域滑行軌跡
///
/// 從落點開始，只要當前格是水域且下一格仍在棋盤內，就沿同方向前進一格。
/// 回傳的軌跡包含落點與終點；終點是第一個非水域格，若先碰到邊界則停在最後一格水域。
/// 只用於標示，不會移動棋子。
pub fn slide_trail(terrain: &TerrainGrid, landing: Position, direction: Direction) -> Vec<Position> {
    let mut trail = vec![landing];
    let mut current = landing;
    while terrain.is_water(current) {
        let Some(next) = step_in_direction(terrain.board(), current, direction) else {
            break;
        };
        trace!(?next, "slide");
        trail.push(next);
        current = next;
    }
    trail
}
