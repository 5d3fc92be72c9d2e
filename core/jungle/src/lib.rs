//! 鬥獸棋規則引擎
//!
//! - `logic`：純規則（方向、合法移動、能力表、回合）
//! - `match_state`：對局狀態與走子
//! - `session`：選子、點擊、拖曳的互動控制
//! - `loader`：ASCII 地形與 TOML 設定載入

pub mod alias;
pub mod component;
pub mod constants;
pub mod core_types;
pub mod error;
pub mod loader;
pub mod loader_schema;
pub mod logic;
pub mod match_state;
pub mod session;

pub use component::{Occupant, Piece, PieceKind, Position, Team, Terrain, Tile};
pub use error::{Error, MoveRejection, Result};
pub use logic::capability::{Capability, RuleSet};
pub use logic::movement::{Direction, MoveToken};
pub use match_state::{MatchState, MoveRecord, MoveRequest};
pub use session::GameSession;
