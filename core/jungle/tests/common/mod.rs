//! 測試輔助：LevelBuilder 與 load_from_ascii
//!
//! 用 ASCII art 定義地形與棋子位置，組成 TOML 後走正式的載入流程。
#![allow(dead_code)]

use jungle::component::{Board, PieceKind, Position, Team};
use jungle::error::{LoadError, Result};
use jungle::loader::{parse_match_setup, serialize_match_setup};
use jungle::loader_schema::{MatchSetup, PiecePlacement, Player};
use jungle::{MatchState, RuleSet};
use std::collections::HashMap;

// ============================================================================
// load_from_ascii
// ============================================================================

/// 從 ASCII 格式讀出棋盤尺寸與標記
///
/// ASCII 格式：每行用空格分隔的符號
/// - `.` = 空位置
/// - 其他字符串（`S`、`E` 等）= 標記位置
/// - 相同的標記會全部收集成 Vec
pub fn load_from_ascii(ascii: &str) -> Result<(Board, HashMap<String, Vec<Position>>)> {
    let lines: Vec<&str> = ascii
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LoadError::ParseError("棋盤為空".to_string()).into());
    }

    let width = lines[0].split_whitespace().count();
    let height = lines.len();
    let board = Board { width, height };

    let mut markers: HashMap<String, Vec<Position>> = HashMap::new();
    for (y, line) in lines.iter().enumerate() {
        for (x, cell) in line.split_whitespace().enumerate() {
            if cell != "." {
                markers
                    .entry(cell.to_string())
                    .or_default()
                    .push(Position { x, y });
            }
        }
    }

    Ok((board, markers))
}

// ============================================================================
// LevelBuilder
// ============================================================================

struct PieceMarkerDef {
    marker: String,
    team: Team,
    kind: PieceKind,
}

/// 用 ASCII art 建立對局
///
/// # 使用範例
///
/// ```ignore
/// let state = LevelBuilder::from_ascii("
///   . ~ .
///   . ~ .
/// ")
/// .pieces("
///   R . .
///   . . c
/// ")
/// .piece("R", Team::B, PieceKind::Rat)
/// .piece("c", Team::A, PieceKind::Cat)
/// .build()
/// .unwrap();
/// ```
pub struct LevelBuilder {
    terrain: String,
    pieces: String,
    starting_team: Team,
    piece_markers: Vec<PieceMarkerDef>,
}

impl LevelBuilder {
    /// 以 ASCII 地形初始化 builder
    pub fn from_ascii(terrain: &str) -> Self {
        LevelBuilder {
            terrain: terrain.to_string(),
            pieces: String::new(),
            starting_team: Team::B,
            piece_markers: Vec::new(),
        }
    }

    /// 棋子位置圖（尺寸與地形相同）
    pub fn pieces(mut self, ascii: &str) -> Self {
        self.pieces = ascii.to_string();
        self
    }

    /// 設定標記對應的陣營與種類
    pub fn piece(mut self, marker: &str, team: Team, kind: PieceKind) -> Self {
        self.piece_markers.push(PieceMarkerDef {
            marker: marker.to_string(),
            team,
            kind,
        });
        self
    }

    pub fn starting_team(mut self, team: Team) -> Self {
        self.starting_team = team;
        self
    }

    pub fn to_setup(&self) -> Result<MatchSetup> {
        let markers = if self.pieces.trim().is_empty() {
            HashMap::new()
        } else {
            load_from_ascii(&self.pieces)?.1
        };

        let pieces = self
            .piece_markers
            .iter()
            .flat_map(|def| {
                markers
                    .get(&def.marker)
                    .map(|positions| {
                        positions
                            .iter()
                            .map(|pos| PiecePlacement {
                                team: def.team,
                                kind: def.kind,
                                position: *pos,
                            })
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            })
            .collect();

        Ok(MatchSetup {
            name: "test-level".to_string(),
            starting_team: self.starting_team,
            terrain: self.terrain.clone(),
            players: vec![
                Player {
                    name: "red".to_string(),
                    team: Team::A,
                },
                Player {
                    name: "blue".to_string(),
                    team: Team::B,
                },
            ],
            pieces,
        })
    }

    /// 組裝完整 TOML 字串
    pub fn to_toml(&self) -> Result<String> {
        serialize_match_setup(&self.to_setup()?)
    }

    /// 經 TOML 載入後以經典能力表開局
    pub fn build(&self) -> Result<MatchState> {
        self.build_with(&RuleSet::standard())
    }

    pub fn build_with(&self, rules: &RuleSet) -> Result<MatchState> {
        let setup = parse_match_setup(&self.to_toml()?)?;
        MatchState::new(&setup, rules)
    }
}

/// 7x9 陸地，第 2 至 3 欄、第 3 至 5 列為水域
pub const RIVER_7X9: &str = r#"
. . . . . . .
. . . . . . .
. . . . . . .
. . ~ ~ . . .
. . ~ ~ . . .
. . ~ ~ . . .
. . . . . . .
. . . . . . .
. . . . . . .
"#;

pub fn pos(x: usize, y: usize) -> Position {
    Position { x, y }
}
