//! 錯誤處理系統
//!
//! - `Error`：載入與開局設定失敗，包含原始錯誤和 context 鏈
//! - `MoveRejection`：對局中被拒絕的移動，屬於正常的否定結果，不帶 context

use crate::alias::Coord;
use crate::component::{PieceKind, Team};
use crate::logic::movement::Direction;
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// 棋盤錯誤
#[derive(Debug, ThisError)]
pub enum BoardError {
    #[error("位置超出棋盤邊界: ({x}, {y}) 邊界 ({width}, {height})")]
    OutOfBounds {
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
    },
    #[error("位置 ({x}, {y}) 已有棋子: {occupant}")]
    CellOccupied { occupant: String, x: Coord, y: Coord },
    #[error("棋盤為空")]
    EmptyBoard,
    #[error("第 {row} 列寬度為 {found}，應為 {expected}")]
    RaggedRow {
        row: Coord,
        expected: Coord,
        found: Coord,
    },
    #[error("位置 ({x}, {y}) 的地形 {terrain} 不能有所屬陣營")]
    OwnerOnPlainTile {
        terrain: String,
        x: Coord,
        y: Coord,
    },
}

/// 格式載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("解析失敗: {0}")]
    ParseError(String),
    #[error("未知的地形符號 `{symbol}` 於 ({x}, {y})")]
    UnknownSymbol { symbol: String, x: Coord, y: Coord },
    #[error("{format} 反序列化失敗: {reason}")]
    DeserializeError { format: String, reason: String },
    #[error("{format} 序列化失敗: {reason}")]
    SerializeError { format: String, reason: String },
}

/// 開局設定錯誤
#[derive(Debug, ThisError)]
pub enum SetupError {
    #[error("玩家數量必須為 2，實際為 {count}")]
    PlayerCount { count: usize },
    #[error("陣營 {team} 重複指派給多位玩家")]
    DuplicateTeam { team: Team },
    #[error("陣營 {team} 的 {kind} 重複")]
    DuplicatePiece { team: Team, kind: PieceKind },
    #[error("陣營 {team} 沒有任何棋子")]
    NoPieces { team: Team },
    #[error("能力表缺少 {kind}")]
    MissingCapability { kind: PieceKind },
    #[error("能力表中 {kind} 重複")]
    DuplicateCapability { kind: PieceKind },
    #[error("{kind} 不會游泳，不能放在水域 ({x}, {y})")]
    SwimmerRequired { kind: PieceKind, x: Coord, y: Coord },
}

/// 被拒絕的移動
///
/// 拒絕時對局狀態不變、回合不切換。
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum MoveRejection {
    #[error("對局已結束，勝方為 {winner}")]
    GameOver { winner: Team },
    #[error("位置 ({x}, {y}) 沒有棋子")]
    NoPieceAtOrigin { x: Coord, y: Coord },
    #[error("現在輪到 {turn}，不能移動 {team} 的棋子")]
    NotYourTurn { team: Team, turn: Team },
    #[error("移動指令的棋子 {requested} 與起點的 {found} 不符")]
    PieceMismatch {
        requested: PieceKind,
        found: PieceKind,
    },
    #[error("目標格 ({x}, {y}) 離起點太遠，無法計算位移")]
    TargetOutOfBounds { x: Coord, y: Coord },
    #[error("位移 ({dx}, {dy}) 不是合法方向")]
    InvalidDirection { dx: isize, dy: isize },
    #[error("無法解析移動指令 `{token}`")]
    MalformedToken { token: String },
    #[error("({x}, {y}) 往 {direction} 不是合法移動")]
    IllegalDestination {
        x: Coord,
        y: Coord,
        direction: Direction,
    },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(e.context(context)),
        }
    }
}
