//! 型別別名

/// 棋盤座標分量
pub type Coord = usize;

/// 棋子等級（數字越大越強）
pub type Rank = u8;

/// 玩家名稱
pub type PlayerName = String;
