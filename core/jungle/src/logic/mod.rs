//! 規則核心邏輯（純函式，不持有對局狀態）

pub mod board;
pub mod capability;
pub mod legality;
pub mod movement;
pub mod turn;
