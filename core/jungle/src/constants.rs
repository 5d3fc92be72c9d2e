//! 遊戲常數定義

use crate::component::Team;

/// 預設先手陣營
pub const DEFAULT_STARTING_TEAM: Team = Team::B;

/// 經典 7x9 棋盤與開局配置
pub const STANDARD_LEVEL_TOML: &str = include_str!("../data/standard_level.toml");

/// 經典能力表
pub const STANDARD_RULES_TOML: &str = include_str!("../data/standard_rules.toml");
