//! 對局互動控制
//!
//! 把「選子、點擊落點、拖曳放開」轉成走子請求，並維護標示用的暫時資料
//! （可走落點、已選棋子、高亮格）。不負責繪製，只處理格座標與位移量。

use crate::component::{Position, Team};
use crate::error::MoveRejection;
use crate::loader_schema::Player;
use crate::logic::capability::RuleSet;
use crate::logic::movement::{Direction, MoveToken};
use crate::match_state::{MatchState, MoveRecord, MoveRequest};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, instrument};

/// 走子成功時的通知（指令, 起點）
pub type MoveCallback = Box<dyn FnMut(&MoveToken, Position)>;

pub struct GameSession {
    state: MatchState,
    rules: RuleSet,
    active: Vec<Position>,
    possible_moves: BTreeSet<Position>,
    selected: Option<Position>,
    on_move: Option<MoveCallback>,
}

impl GameSession {
    pub fn new(state: MatchState, rules: RuleSet) -> Self {
        GameSession {
            state,
            rules,
            active: Vec::new(),
            possible_moves: BTreeSet::new(),
            selected: None,
            on_move: None,
        }
    }

    /// 註冊走子成功通知，每次成功走子恰好呼叫一次，被拒絕時不呼叫
    pub fn on_move<F>(&mut self, callback: F)
    where
        F: FnMut(&MoveToken, Position) + 'static,
    {
        self.on_move = Some(Box::new(callback));
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn turn(&self) -> Team {
        self.state.turn()
    }

    pub fn players(&self) -> &[Player] {
        self.state.players()
    }

    /// 高亮格（選取的棋子，或上一步的起點與滑行終點）
    pub fn active(&self) -> &[Position] {
        &self.active
    }

    pub fn possible_moves(&self) -> &BTreeSet<Position> {
        &self.possible_moves
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// 點選棋子：記錄選取並列出可走落點
    ///
    /// 對方的棋子也能選取，但可走落點為空。該格沒有棋子時不做任何事。
    pub fn select(&mut self, pos: Position) -> bool {
        if self.state.piece_at(pos).is_none() {
            return false;
        }
        // 換選其他棋子時取代前一個選取，高亮最多為上一步兩格加目前選取
        if let Some(previous) = self.selected.take() {
            if self.active.last() == Some(&previous) {
                self.active.pop();
            }
        }
        self.possible_moves = self.state.possible_moves(&self.rules, pos);
        self.selected = Some(pos);
        self.active.push(pos);
        true
    }

    /// 點擊格子：在可走落點上則走子，否則只清除可走落點
    pub fn click(&mut self, pos: Position) -> bool {
        let Some(from) = self.selected else {
            self.possible_moves.clear();
            return false;
        };
        if !self.possible_moves.contains(&pos) {
            self.possible_moves.clear();
            return false;
        }
        self.request(MoveRequest::Target { from, to: pos }).is_ok()
    }

    /// 拖曳放開：位移量無法解出方向時直接忽略
    pub fn release(&mut self, from: Position, dx: isize, dy: isize) -> bool {
        let Some(direction) = Direction::from_offset(dx, dy) else {
            return false;
        };
        let Some(occupant) = self.state.piece_at(from) else {
            return false;
        };
        self.active.clear();
        let token = MoveToken {
            kind: occupant.kind,
            direction,
        };
        self.request(MoveRequest::Step { from, token }).is_ok()
    }

    /// 送出走子請求
    ///
    /// 成功時：更新狀態、高亮 [起點, 滑行終點]、清除選取與可走落點、通知回呼。
    /// 被拒絕時只清除可走落點，狀態不變。
    #[instrument(skip(self))]
    pub fn request(&mut self, request: MoveRequest) -> Result<MoveRecord, MoveRejection> {
        let record = match self.state.apply_move_in_place(&self.rules, request) {
            Ok(record) => record,
            Err(rejection) => {
                self.possible_moves.clear();
                return Err(rejection);
            }
        };
        self.active = record.highlight.to_vec();
        self.possible_moves.clear();
        self.selected = None;
        if let Some(callback) = self.on_move.as_mut() {
            callback(&record.token, record.origin);
        }
        debug!(token = %record.token, "move accepted");
        Ok(record)
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("active", &self.active)
            .field("possible_moves", &self.possible_moves)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
