//! 棋盤邏輯

use crate::component::{Board, Position};

/// 驗證位置是否在棋盤邊界內
pub fn is_valid_position(board: Board, pos: Position) -> bool {
    pos.x < board.width && pos.y < board.height
}

/// 以位移量平移位置，超出棋盤（含負座標）回傳 `None`
pub fn offset_position(board: Board, pos: Position, dx: isize, dy: isize) -> Option<Position> {
    let new_pos = Position {
        x: pos.x.checked_add_signed(dx)?,
        y: pos.y.checked_add_signed(dy)?,
    };
    if is_valid_position(board, new_pos) {
        Some(new_pos)
    } else {
        None
    }
}
