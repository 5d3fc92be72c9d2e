//! 對局載入器：ASCII 地形、TOML 對局設定與能力表

use crate::component::{Team, Terrain, Tile};
use crate::constants::{STANDARD_LEVEL_TOML, STANDARD_RULES_TOML};
use crate::core_types::TerrainGrid;
use crate::error::{Context, LoadError, Result};
use crate::loader_schema::{MatchSetup, RuleSetToml};
use crate::logic::capability::{Capability, RuleSet};

/// 從 ASCII 格式載入地形
///
/// ASCII 格式：每行用空格分隔的符號
/// - `.` = 陸地
/// - `~` = 水域
/// - `T` = 陷阱，`D` = 獸穴
/// - 陷阱與獸穴可加上 `a` / `b` 表示所屬陣營（`Ta`、`Db`），不加為中立
///
/// 例如：
/// ```text
/// .  Ta Da
/// ~  ~  .
/// .  Tb Db
/// ```
pub fn load_terrain_from_ascii(ascii: &str) -> Result<TerrainGrid> {
    let lines: Vec<&str> = ascii
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LoadError::ParseError("地形為空".to_string()).into());
    }

    let mut tiles = Vec::with_capacity(lines.len());
    for (y, line) in lines.iter().enumerate() {
        let mut row = Vec::new();
        for (x, symbol) in line.split_whitespace().enumerate() {
            let tile = parse_tile_symbol(symbol).ok_or_else(|| LoadError::UnknownSymbol {
                symbol: symbol.to_string(),
                x,
                y,
            })?;
            row.push(tile);
        }
        tiles.push(row);
    }

    TerrainGrid::from_tiles(tiles)
}

fn parse_tile_symbol(symbol: &str) -> Option<Tile> {
    let mut chars = symbol.chars();
    let terrain = match chars.next()? {
        '.' => Terrain::Land,
        '~' => Terrain::Water,
        'T' => Terrain::Trap,
        'D' => Terrain::Den,
        _ => return None,
    };
    let owner = match chars.next() {
        None => None,
        Some('a') => Some(Team::A),
        Some('b') => Some(Team::B),
        Some(_) => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    // 只有陷阱與獸穴可以標示陣營
    if owner.is_some() && !matches!(terrain, Terrain::Trap | Terrain::Den) {
        return None;
    }
    Some(Tile { terrain, owner })
}

/// 反序列化對局設定 TOML
pub fn parse_match_setup(match_toml: &str) -> Result<MatchSetup> {
    toml::from_str(match_toml).map_err(|e| {
        LoadError::DeserializeError {
            format: "match.toml".to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// 序列化對局設定為 TOML
pub fn serialize_match_setup(setup: &MatchSetup) -> Result<String> {
    toml::to_string_pretty(setup).map_err(|e| {
        LoadError::SerializeError {
            format: "match.toml".to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// 反序列化能力表 TOML
pub fn parse_rule_set(rules_toml: &str) -> Result<RuleSet> {
    let parsed: RuleSetToml =
        toml::from_str(rules_toml).map_err(|e| LoadError::DeserializeError {
            format: "rules.toml".to_string(),
            reason: e.to_string(),
        })?;

    RuleSet::from_entries(parsed.capabilities.into_iter().map(|entry| {
        (
            entry.kind,
            Capability {
                rank: entry.rank,
                can_swim: entry.can_swim,
                extra_prey: entry.extra_prey,
                forbidden_prey: entry.forbidden_prey,
            },
        )
    }))
}

/// 經典 7x9 對局設定
pub fn standard_setup() -> Result<MatchSetup> {
    parse_match_setup(STANDARD_LEVEL_TOML).context("載入內建經典棋盤")
}

/// 內建經典能力表（資料檔版本，應與 `RuleSet::standard` 一致）
pub fn standard_rule_set() -> Result<RuleSet> {
    parse_rule_set(STANDARD_RULES_TOML).context("載入內建經典能力表")
}
