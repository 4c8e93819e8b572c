//! 棋盘状态

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, COLUMN_LETTERS, NUM_SQUARES};
use crate::error::OthelloError;
use crate::piece::{Position, Side};

/// 棋盘
///
/// 按值使用：落子得到的是新棋盘，原棋盘保持不变，
/// 因此搜索中的兄弟分支之间不会互相影响。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Side>>,
}

/// 反序列化的中间形式，格数校验通过后才成为 `Board`
#[derive(Deserialize)]
struct RawBoard {
    squares: Vec<Option<Side>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = OthelloError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.squares.len() != NUM_SQUARES {
            return Err(OthelloError::InvalidBoard {
                expected: NUM_SQUARES,
                actual: raw.squares.len(),
            });
        }
        Ok(Self {
            squares: raw.squares,
        })
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; NUM_SQUARES],
        }
    }

    /// 创建初始棋盘：中心四格，白占 d4/e5，黑占 e4/d5
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.set(Position::new_unchecked(3, 3), Some(Side::White));
        board.set(Position::new_unchecked(3, 4), Some(Side::Black));
        board.set(Position::new_unchecked(4, 3), Some(Side::Black));
        board.set(Position::new_unchecked(4, 4), Some(Side::White));
        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Side> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, pos: Position, side: Option<Side>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = side;
        }
    }

    /// 指定位置是否为空
    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_valid() && self.squares[pos.to_index()].is_none()
    }

    /// 统计指定阵营的棋子数
    pub fn count(&self, side: Side) -> usize {
        self.squares.iter().filter(|s| **s == Some(side)).count()
    }

    /// 空格数
    pub fn empty_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_none()).count()
    }

    /// 棋子总数
    pub fn piece_count(&self) -> usize {
        NUM_SQUARES - self.empty_count()
    }

    /// 棋盘是否已下满
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// 获取指定阵营的所有棋子位置（行优先）
    pub fn pieces(&self, side: Side) -> Vec<Position> {
        Position::all().filter(|pos| self.get(*pos) == Some(side)).collect()
    }

    /// 获取所有空格位置（行优先）
    pub fn empties(&self) -> Vec<Position> {
        Position::all().filter(|pos| self.is_empty_at(*pos)).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for letter in COLUMN_LETTERS {
            write!(f, " {}", letter)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{}", row + 1)?;
            for col in 0..BOARD_SIZE {
                let c = match self.get(Position::new_unchecked(row as u8, col as u8)) {
                    Some(side) => side.symbol(),
                    None => '.',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
