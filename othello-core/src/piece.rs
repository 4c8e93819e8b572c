//! 阵营、位置与方向定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, NUM_SQUARES};
use crate::error::{OthelloError, Result};

/// 阵营
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 黑方（先手）
    #[default]
    Black,
    /// 白方（后手）
    White,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// 获取棋盘文本中的棋子字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Black => 'B',
            Side::White => 'W',
        }
    }

    /// 从棋子字符解析（不区分大小写）
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'b' | 'B' => Some(Side::Black),
            'w' | 'W' => Some(Side::White),
            _ => None,
        }
    }

    /// 棋盘显示用的符号
    pub fn symbol(&self) -> char {
        match self {
            Side::Black => 'X',
            Side::White => 'O',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Black => f.write_str("Black"),
            Side::White => f.write_str("White"),
        }
    }
}

/// 扫描方向（八个方位的单位向量）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// 全部八个方向，顺序固定
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// (行增量, 列增量)，行号向下递增
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// 棋盘位置（同时也是一步落子）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-7)，0 为最上方
    pub row: u8,
    /// 列 (0-7)，0 为最左侧
    pub col: u8,
}

impl Position {
    /// 创建新位置，越界返回 None
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置，越界时报告错误
    pub fn try_new(row: i32, col: i32) -> Result<Self> {
        let in_range = |v: i32| (0..BOARD_SIZE as i32).contains(&v);
        if in_range(row) && in_range(col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(OthelloError::InvalidPosition { row, col })
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 沿方向移动一格，出界返回 None
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row >= 0 && (row as usize) < BOARD_SIZE && col >= 0 && (col as usize) < BOARD_SIZE {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引（行优先）
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_SQUARES {
            Some(Position {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 按行优先顺序（从上到下、从左到右）遍历所有位置
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_SQUARES).map(|i| Position::new_unchecked((i / BOARD_SIZE) as u8, (i % BOARD_SIZE) as u8))
    }
}
