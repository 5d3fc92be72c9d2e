//! 對局資料結構：地形網格、盤面佔據、棋子名冊

use crate::component::{Board, Occupant, Piece, PieceKind, Position, Team, Terrain, Tile};
use crate::error::{BoardError, Result, SetupError};
use crate::logic::board::is_valid_position;

/// 地形網格，開局後不再改變
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    board: Board,
    tiles: Vec<Vec<Tile>>,
}

impl TerrainGrid {
    /// 由逐列的地形格建立
    ///
    /// 檢查：非空、每列等寬、只有陷阱與獸穴能有所屬陣營。
    pub fn from_tiles(tiles: Vec<Vec<Tile>>) -> Result<Self> {
        let width = tiles.first().map_or(0, |row| row.len());
        if width == 0 {
            return Err(BoardError::EmptyBoard.into());
        }
        for (y, row) in tiles.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                }
                .into());
            }
            for (x, tile) in row.iter().enumerate() {
                let ownable = matches!(tile.terrain, Terrain::Trap | Terrain::Den);
                if tile.owner.is_some() && !ownable {
                    return Err(BoardError::OwnerOnPlainTile {
                        terrain: tile.terrain.to_string(),
                        x,
                        y,
                    }
                    .into());
                }
            }
        }
        let board = Board {
            width,
            height: tiles.len(),
        };
        Ok(TerrainGrid { board, tiles })
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn width(&self) -> usize {
        self.board.width
    }

    pub fn height(&self) -> usize {
        self.board.height
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        is_valid_position(self.board, pos)
    }

    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        let Position { x, y } = pos;
        self.tiles.get(y)?.get(x)
    }

    /// 查詢地形
    ///
    /// # Panics
    /// `pos` 必須在棋盤內，呼叫端應先做邊界檢查；越界視為程式錯誤。
    pub fn terrain_at(&self, pos: Position) -> Terrain {
        match self.get_tile(pos) {
            Some(tile) => tile.terrain,
            None => panic!(
                "terrain_at: 位置 ({}, {}) 超出棋盤邊界 ({}, {})",
                pos.x, pos.y, self.board.width, self.board.height
            ),
        }
    }

    pub fn owner_at(&self, pos: Position) -> Option<Team> {
        self.get_tile(pos).and_then(|tile| tile.owner)
    }

    /// 棋盤外視為非水域
    pub fn is_water(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some_and(Tile::is_water)
    }

    /// 指定陣營的獸穴（多個時取第一個）
    pub fn den_of(&self, team: Team) -> Option<Position> {
        self.positions().find(|pos| {
            self.get_tile(*pos)
                .is_some_and(|tile| tile.terrain == Terrain::Den && tile.owner == Some(team))
        })
    }

    /// 逐列走訪所有位置
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let Board { width, height } = self.board;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}

/// 盤面佔據層：每格最多一個佔據者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    cells: Vec<Option<Occupant>>,
}

impl BoardState {
    pub fn empty(board: Board) -> Self {
        BoardState {
            board,
            cells: vec![None; board.width * board.height],
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if is_valid_position(self.board, pos) {
            Some(pos.y * self.board.width + pos.x)
        } else {
            None
        }
    }

    /// 查詢佔據者，空格或棋盤外回傳 `None`
    pub fn piece_at(&self, pos: Position) -> Option<Occupant> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// 放置佔據者（開局用），位置越界或已被佔據時回傳錯誤
    pub(crate) fn place(&mut self, pos: Position, occupant: Occupant) -> Result<()> {
        let Some(i) = self.index(pos) else {
            return Err(BoardError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.board.width,
                height: self.board.height,
            }
            .into());
        };
        if let Some(existing) = self.cells[i] {
            return Err(BoardError::CellOccupied {
                occupant: format!("{existing:?}"),
                x: pos.x,
                y: pos.y,
            }
            .into());
        }
        self.cells[i] = Some(occupant);
        Ok(())
    }

    /// 把 `from` 的佔據者移到 `to`，覆蓋並回傳 `to` 原本的佔據者（吃子）
    ///
    /// `from` 為空或任一位置越界時不做任何事。名冊同步由呼叫端負責。
    pub(crate) fn move_piece_token(&mut self, from: Position, to: Position) -> Option<Occupant> {
        let (Some(from_i), Some(to_i)) = (self.index(from), self.index(to)) else {
            return None;
        };
        let occupant = self.cells[from_i].take()?;
        self.cells[to_i].replace(occupant)
    }

    /// 走訪所有非空格
    pub fn occupants(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        let width = self.board.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|occupant| {
                (
                    Position {
                        x: i % width,
                        y: i / width,
                    },
                    occupant,
                )
            })
        })
    }
}

/// 棋子名冊，(陣營, 種類) 唯一
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pieces: Vec<Piece>,
}

impl Roster {
    pub(crate) fn insert(&mut self, piece: Piece) -> Result<()> {
        if self.roster_entry(piece.team, piece.kind).is_some() {
            return Err(SetupError::DuplicatePiece {
                team: piece.team,
                kind: piece.kind,
            }
            .into());
        }
        self.pieces.push(piece);
        Ok(())
    }

    pub fn roster_entry(&self, team: Team, kind: PieceKind) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|piece| piece.team == team && piece.kind == kind)
    }

    pub(crate) fn relocate(&mut self, team: Team, kind: PieceKind, to: Position) {
        if let Some(piece) = self
            .pieces
            .iter_mut()
            .find(|piece| piece.team == team && piece.kind == kind)
        {
            piece.position = to;
        }
    }

    /// 移除被吃掉的棋子
    pub(crate) fn remove(&mut self, team: Team, kind: PieceKind) -> Option<Piece> {
        let i = self
            .pieces
            .iter()
            .position(|piece| piece.team == team && piece.kind == kind)?;
        Some(self.pieces.remove(i))
    }

    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |piece| piece.team == team)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
