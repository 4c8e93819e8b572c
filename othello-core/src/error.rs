//! 错误类型定义

use thiserror::Error;

/// 黑白棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OthelloError {
    /// 坐标越界
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: i32, col: i32 },

    /// 非法落子（非空格或无子可翻）
    #[error("Illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    /// 当前方仍有合法走法，不能停着
    #[error("Pass is not allowed while legal moves exist")]
    PassNotAllowed,

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的棋盘文本
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 棋盘格数不是 64
    #[error("Invalid board: expected {expected} squares, got {actual}")]
    InvalidBoard { expected: usize, actual: usize },

    /// 无效的坐标记法
    #[error("Invalid notation: {text:?}")]
    InvalidNotation { text: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, OthelloError>;
