//! Loader 相關的資料結構定義

use crate::alias::{PlayerName, Rank};
use crate::component::{PieceKind, Position, Team};
use crate::constants::DEFAULT_STARTING_TEAM;
use serde::{Deserialize, Serialize};

// ============================================================================
// 對局設定 (Match Setup)
// ============================================================================

/// 玩家
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    pub team: Team,
}

/// 棋子配置（開局時的棋子放置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecePlacement {
    pub team: Team,
    pub kind: PieceKind,
    pub position: Position,
}

/// 對局設定
///
/// `terrain` 為 ASCII 地形，格式見 `loader::load_terrain_from_ascii`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub name: String,
    #[serde(default = "default_starting_team")]
    pub starting_team: Team,
    pub terrain: String,
    pub players: Vec<Player>,
    #[serde(default)]
    pub pieces: Vec<PiecePlacement>,
}

fn default_starting_team() -> Team {
    DEFAULT_STARTING_TEAM
}

// ============================================================================
// 能力表 (Rule Set)
// ============================================================================

/// 能力表中的一筆
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityEntry {
    pub kind: PieceKind,
    pub rank: Rank,
    #[serde(default)]
    pub can_swim: bool,
    #[serde(default)]
    pub extra_prey: Vec<PieceKind>,
    #[serde(default)]
    pub forbidden_prey: Vec<PieceKind>,
}

/// 能力表檔案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetToml {
    pub capabilities: Vec<CapabilityEntry>,
}
