//! 黑白棋（Othello / Reversi）规则引擎
//!
//! 包含:
//! - 阵营、位置、方向、棋盘等核心数据结构
//! - 合法走法生成、翻子计算、落子
//! - 对局驱动（轮次、停着、终局判定）
//! - 棋盘文本格式与坐标记法

mod board;
mod constants;
mod error;
mod fen;
mod game;
mod moves;
mod notation;
mod piece;

pub use board::Board;
pub use constants::*;
pub use error::{OthelloError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{Action, Game, GameResult, GameStatus};
pub use moves::{Move, MoveGenerator};
pub use piece::{Direction, Position, Side};
