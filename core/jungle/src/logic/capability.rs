//! 棋子能力表
//!
//! 每種棋子的等級、能否下水、額外可吃與不可吃的對象，全部以資料描述，
//! 由呼叫端注入合法性判定，不在判定邏輯中針對種類寫分支。

use crate::alias::Rank;
use crate::component::{Occupant, PieceKind, Team, Terrain, Tile};
use crate::error::{Result, SetupError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// 單一棋子種類的能力描述
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub rank: Rank,
    #[serde(default)]
    pub can_swim: bool,
    /// 不論等級都能吃的種類
    #[serde(default)]
    pub extra_prey: Vec<PieceKind>,
    /// 不論等級都不能吃的種類
    #[serde(default)]
    pub forbidden_prey: Vec<PieceKind>,
}

/// 能力表（PieceKind → Capability）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    capabilities: HashMap<PieceKind, Capability>,
}

impl RuleSet {
    /// 由 (種類, 能力) 清單建立，種類重複時回傳錯誤
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (PieceKind, Capability)>,
    {
        let mut capabilities = HashMap::new();
        for (kind, capability) in entries {
            if capabilities.insert(kind, capability).is_some() {
                return Err(SetupError::DuplicateCapability { kind }.into());
            }
        }
        Ok(RuleSet { capabilities })
    }

    /// 經典鬥獸棋規則：鼠會游泳且能吃象，象不能吃鼠
    pub fn standard() -> Self {
        let capabilities = PieceKind::iter()
            .map(|kind| {
                let capability = match kind {
                    PieceKind::Rat => Capability {
                        rank: 1,
                        can_swim: true,
                        extra_prey: vec![PieceKind::Elephant],
                        forbidden_prey: Vec::new(),
                    },
                    PieceKind::Cat => Capability::ranked(2),
                    PieceKind::Dog => Capability::ranked(3),
                    PieceKind::Wolf => Capability::ranked(4),
                    PieceKind::Leopard => Capability::ranked(5),
                    PieceKind::Tiger => Capability::ranked(6),
                    PieceKind::Lion => Capability::ranked(7),
                    PieceKind::Elephant => Capability {
                        rank: 8,
                        forbidden_prey: vec![PieceKind::Rat],
                        ..Default::default()
                    },
                };
                (kind, capability)
            })
            .collect();
        RuleSet { capabilities }
    }

    pub fn capability(&self, kind: PieceKind) -> Option<&Capability> {
        self.capabilities.get(&kind)
    }

    /// 能力表中缺少的種類
    pub fn missing_kinds(&self) -> Vec<PieceKind> {
        PieceKind::iter()
            .filter(|kind| !self.capabilities.contains_key(kind))
            .collect()
    }

    /// 地形是否允許進入（不處理佔據者）
    ///
    /// - 水域：只有會游泳的種類
    /// - 獸穴：不能進入自己陣營的獸穴
    pub fn can_enter(&self, mover: Occupant, tile: &Tile) -> bool {
        let Some(capability) = self.capability(mover.kind) else {
            return false;
        };
        match tile.terrain {
            Terrain::Water => capability.can_swim,
            Terrain::Den => tile.owner != Some(mover.team),
            Terrain::Land | Terrain::Trap => true,
        }
    }

    /// 攻擊方能否吃掉防守方
    ///
    /// 依序判定：
    /// 1. 同陣營不能吃
    /// 2. 不能跨越水岸（一方在水中、另一方不在）
    /// 3. `forbidden_prey` 不能吃
    /// 4. 防守方站在攻擊方（或中立）的陷阱上：可吃
    /// 5. `extra_prey` 可吃
    /// 6. 等級大於等於防守方可吃
    pub fn can_capture(
        &self,
        attacker: Occupant,
        attacker_tile: &Tile,
        defender: Occupant,
        defender_tile: &Tile,
    ) -> bool {
        if attacker.team == defender.team {
            return false;
        }
        if attacker_tile.is_water() != defender_tile.is_water() {
            return false;
        }
        let (Some(attack), Some(defend)) = (
            self.capability(attacker.kind),
            self.capability(defender.kind),
        ) else {
            return false;
        };
        if attack.forbidden_prey.contains(&defender.kind) {
            return false;
        }
        if is_trapped(defender_tile, attacker.team) {
            return true;
        }
        if attack.extra_prey.contains(&defender.kind) {
            return true;
        }
        attack.rank >= defend.rank
    }
}

impl Capability {
    fn ranked(rank: Rank) -> Self {
        Capability {
            rank,
            ..Default::default()
        }
    }
}

// 陷阱屬於攻擊方或中立時，防守方被削弱
fn is_trapped(tile: &Tile, attacker_team: Team) -> bool {
    tile.terrain == Terrain::Trap && tile.owner.is_none_or(|owner| owner == attacker_team)
}
