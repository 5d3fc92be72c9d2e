//! 基本元件定義（座標、陣營、棋子、地形）

use crate::alias::Coord;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// 棋盤尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: Coord,
    pub height: Coord,
}

/// 棋盤位置（x = 欄, y = 列）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

/// 陣營
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Team {
    A,
    B,
}

/// 棋子種類
///
/// 引擎只把種類當作查詢能力表的 key，不在程式中寫死等級或地形規則。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum PieceKind {
    Rat,
    Cat,
    Dog,
    Wolf,
    Leopard,
    Tiger,
    Lion,
    Elephant,
}

impl PieceKind {
    /// 移動指令中使用的單字元代碼
    pub fn code(self) -> char {
        match self {
            PieceKind::Rat => 'r',
            PieceKind::Cat => 'c',
            PieceKind::Dog => 'd',
            PieceKind::Wolf => 'w',
            PieceKind::Leopard => 'p',
            PieceKind::Tiger => 't',
            PieceKind::Lion => 'l',
            PieceKind::Elephant => 'e',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        PieceKind::iter().find(|kind| kind.code() == code)
    }
}

/// 格子上的佔據者（陣營 + 種類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub team: Team,
    pub kind: PieceKind,
}

/// 名冊中的棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub team: Team,
    pub kind: PieceKind,
    pub position: Position,
}

impl Piece {
    pub fn occupant(&self) -> Occupant {
        Occupant {
            team: self.team,
            kind: self.kind,
        }
    }
}

/// 地形
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Terrain {
    #[default]
    Land,
    Water,
    Trap,
    Den,
}

/// 地形格
///
/// `owner` 只對陷阱與獸穴有意義，`None` 表示中立。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub owner: Option<Team>,
}

impl Tile {
    pub fn is_water(&self) -> bool {
        self.terrain == Terrain::Water
    }
}
