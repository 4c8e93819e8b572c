//! 规则常量定义

/// 棋盘边长
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// 列字母（记法用）
pub const COLUMN_LETTERS: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
