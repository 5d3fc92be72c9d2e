//! 對局狀態與走子
//!
//! `MatchState` 同時持有地形、盤面佔據、名冊與回合，只透過 `apply_move` 變更，
//! 確保盤面與名冊永遠一致。`apply_move` 不修改自身，成功時回傳新的狀態。

use crate::component::{Occupant, Piece, PieceKind, Position, Team, Terrain};
use crate::core_types::{BoardState, Roster, TerrainGrid};
use crate::error::{Context, MoveRejection, Result, SetupError};
use crate::loader::{load_terrain_from_ascii, standard_setup};
use crate::loader_schema::{MatchSetup, Player};
use crate::logic::capability::RuleSet;
use crate::logic::legality;
use crate::logic::movement::{
    Direction, MoveToken, position_delta, slide_trail, step_in_direction,
};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// 移動請求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    /// 種類 + 方向（拖曳手勢或網路傳來的指令）
    Step { from: Position, token: MoveToken },
    /// 起點 + 目標格（兩段式點擊）
    Target { from: Position, to: Position },
}

impl MoveRequest {
    pub fn origin(&self) -> Position {
        match self {
            MoveRequest::Step { from, .. } | MoveRequest::Target { from, .. } => *from,
        }
    }
}

/// 成功走子的紀錄，供呈現層標示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub token: MoveToken,
    pub origin: Position,
    /// 棋子實際停留的位置
    pub landing: Position,
    /// 水域滑行軌跡（落點 ..= 滑行終點）
    pub trail: Vec<Position>,
    pub captured: Option<Occupant>,
    /// 標示用：[起點, 滑行終點]
    pub highlight: [Position; 2],
    pub outcome: Option<Team>,
}

impl MoveRecord {
    pub fn slide_end(&self) -> Position {
        self.highlight[1]
    }
}

/// 對局狀態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    terrain: Arc<TerrainGrid>,
    players: Arc<[Player]>,
    board_state: BoardState,
    roster: Roster,
    turn: Team,
}

impl MatchState {
    /// 依對局設定開局
    ///
    /// # Fail fast 驗證：
    /// - 恰好兩位玩家且陣營不同
    /// - 能力表涵蓋所有出場的棋子種類
    /// - 棋子在棋盤內、不重疊、(陣營, 種類) 唯一
    /// - 不會游泳的棋子不能放在水域
    /// - 雙方都至少有一枚棋子
    #[instrument(skip_all, fields(name = %setup.name))]
    pub fn new(setup: &MatchSetup, rules: &RuleSet) -> Result<Self> {
        let terrain = load_terrain_from_ascii(&setup.terrain).context("載入地形")?;

        if setup.players.len() != 2 {
            return Err(SetupError::PlayerCount {
                count: setup.players.len(),
            }
            .into());
        }
        let mut seen_teams = HashSet::new();
        for player in &setup.players {
            if !seen_teams.insert(player.team) {
                return Err(SetupError::DuplicateTeam { team: player.team }.into());
            }
        }

        let mut board_state = BoardState::empty(terrain.board());
        let mut roster = Roster::default();
        for placement in &setup.pieces {
            let Some(capability) = rules.capability(placement.kind) else {
                return Err(SetupError::MissingCapability {
                    kind: placement.kind,
                }
                .into());
            };
            let pos = placement.position;
            let occupant = Occupant {
                team: placement.team,
                kind: placement.kind,
            };
            board_state
                .place(pos, occupant)
                .context(format!("放置 {} {}", placement.team, placement.kind))?;
            if terrain.terrain_at(pos) == Terrain::Water && !capability.can_swim {
                return Err(SetupError::SwimmerRequired {
                    kind: placement.kind,
                    x: pos.x,
                    y: pos.y,
                }
                .into());
            }
            roster.insert(Piece {
                team: placement.team,
                kind: placement.kind,
                position: pos,
            })?;
        }
        for team in Team::iter() {
            if roster.pieces_of(team).next().is_none() {
                return Err(SetupError::NoPieces { team }.into());
            }
        }

        debug!(pieces = roster.len(), turn = %setup.starting_team, "match created");
        Ok(MatchState {
            terrain: Arc::new(terrain),
            players: setup.players.clone().into(),
            board_state,
            roster,
            turn: setup.starting_team,
        })
    }

    /// 經典 7x9 開局
    pub fn standard(rules: &RuleSet) -> Result<Self> {
        let setup = standard_setup()?;
        MatchState::new(&setup, rules)
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    pub fn board_state(&self) -> &BoardState {
        &self.board_state
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn turn(&self) -> Team {
        self.turn
    }

    pub fn piece_at(&self, pos: Position) -> Option<Occupant> {
        self.board_state.piece_at(pos)
    }

    pub fn roster_entry(&self, team: Team, kind: PieceKind) -> Option<&Piece> {
        self.roster.roster_entry(team, kind)
    }

    /// 勝負判定
    ///
    /// 一方棋子進入對方獸穴，或對方已無棋子，即為勝方。
    pub fn outcome(&self) -> Option<Team> {
        Team::iter().find(|team| {
            let opponent = team.toggle();
            let in_enemy_den = self.roster.pieces_of(*team).any(|piece| {
                self.terrain.terrain_at(piece.position) == Terrain::Den
                    && self.terrain.owner_at(piece.position) == Some(opponent)
            });
            in_enemy_den || self.roster.pieces_of(opponent).next().is_none()
        })
    }

    /// 當前回合可走的落點
    ///
    /// 起點不是輪到的一方、沒有棋子、或對局已結束時回傳空集合。
    pub fn possible_moves(&self, rules: &RuleSet, from: Position) -> BTreeSet<Position> {
        if self.outcome().is_some() {
            return BTreeSet::new();
        }
        match self.board_state.piece_at(from) {
            Some(occupant) if occupant.team == self.turn => {
                legality::possible_moves(&self.terrain, &self.board_state, rules, from)
            }
            _ => BTreeSet::new(),
        }
    }

    /// 套用移動，成功時回傳新的狀態與走子紀錄
    ///
    /// 依序檢查（任一失敗即拒絕，狀態不變、回合不切換）：
    /// 1. 對局尚未結束
    /// 2. 起點有棋子且屬於輪到的一方
    /// 3. 請求能解出方向，且指令的棋子種類與起點一致
    /// 4. 落點在合法移動集合中
    ///
    /// 成功後：移動棋子（吃子時從名冊移除）、計算水域滑行、切換回合。
    #[instrument(skip(self, rules), fields(turn = %self.turn))]
    pub fn apply_move(
        &self,
        rules: &RuleSet,
        request: MoveRequest,
    ) -> Result<(MatchState, MoveRecord), MoveRejection> {
        let result = self.resolve_move(rules, request);
        if let Err(rejection) = &result {
            debug!(%rejection, "move rejected");
        }
        result
    }

    /// 原地套用移動，只有成功時才替換自身
    pub fn apply_move_in_place(
        &mut self,
        rules: &RuleSet,
        request: MoveRequest,
    ) -> Result<MoveRecord, MoveRejection> {
        let (next, record) = self.apply_move(rules, request)?;
        *self = next;
        Ok(record)
    }

    /// 套用字串形式的移動指令（例如網路傳來的 `rR`）
    pub fn apply_token_str(
        &self,
        rules: &RuleSet,
        token: &str,
        from: Position,
    ) -> Result<(MatchState, MoveRecord), MoveRejection> {
        let token: MoveToken = token.parse().map_err(|_| MoveRejection::MalformedToken {
            token: token.to_string(),
        })?;
        self.apply_move(rules, MoveRequest::Step { from, token })
    }

    fn resolve_move(
        &self,
        rules: &RuleSet,
        request: MoveRequest,
    ) -> Result<(MatchState, MoveRecord), MoveRejection> {
        if let Some(winner) = self.outcome() {
            return Err(MoveRejection::GameOver { winner });
        }

        let from = request.origin();
        let Some(mover) = self.board_state.piece_at(from) else {
            return Err(MoveRejection::NoPieceAtOrigin {
                x: from.x,
                y: from.y,
            });
        };
        if mover.team != self.turn {
            return Err(MoveRejection::NotYourTurn {
                team: mover.team,
                turn: self.turn,
            });
        }

        let direction = match request {
            MoveRequest::Step { token, .. } => {
                if token.kind != mover.kind {
                    return Err(MoveRejection::PieceMismatch {
                        requested: token.kind,
                        found: mover.kind,
                    });
                }
                token.direction
            }
            MoveRequest::Target { from, to } => {
                let Some((dx, dy)) = position_delta(from, to) else {
                    return Err(MoveRejection::TargetOutOfBounds { x: to.x, y: to.y });
                };
                Direction::from_offset(dx, dy)
                    .ok_or(MoveRejection::InvalidDirection { dx, dy })?
            }
        };

        let legal = legality::possible_moves(&self.terrain, &self.board_state, rules, from);
        let Some(landing) = step_in_direction(self.terrain.board(), from, direction)
            .filter(|to| legal.contains(to))
        else {
            return Err(MoveRejection::IllegalDestination {
                x: from.x,
                y: from.y,
                direction,
            });
        };

        let mut next = self.clone();
        let captured = next.board_state.move_piece_token(from, landing);
        if let Some(captured) = captured {
            next.roster.remove(captured.team, captured.kind);
            info!(attacker = %mover.kind, defender = %captured.kind, "capture");
        }
        next.roster.relocate(mover.team, mover.kind, landing);

        let trail = slide_trail(&self.terrain, landing, direction);
        let slide_end = trail.last().copied().unwrap_or(landing);
        next.turn = self.turn.toggle();

        let outcome = next.outcome();
        if let Some(winner) = outcome {
            info!(%winner, "match over");
        }

        let record = MoveRecord {
            token: MoveToken {
                kind: mover.kind,
                direction,
            },
            origin: from,
            landing,
            trail,
            captured,
            highlight: [from, slide_end],
            outcome,
        };
        Ok((next, record))
    }
}
