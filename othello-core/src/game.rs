//! 对局驱动
//!
//! 规则引擎本身不持有状态；`Game` 把“当前棋盘”和“当前走子方”
//! 作为显式状态保存，每次落子都用新棋盘替换旧棋盘。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::error::{OthelloError, Result};
use crate::fen::Fen;
use crate::moves::MoveGenerator;
use crate::piece::{Position, Side};

/// 一步动作：落子或停着
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Place(Position),
    Pass,
}

impl From<Position> for Action {
    fn from(pos: Position) -> Self {
        Action::Place(pos)
    }
}

/// 终局结果（子数多者胜，相等为和棋）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win { winner: Side, black: usize, white: usize },
    Draw { black: usize, white: usize },
}

impl GameResult {
    /// 按棋盘上的子数判定
    pub fn from_board(board: &Board) -> Self {
        let black = board.count(Side::Black);
        let white = board.count(Side::White);
        if black > white {
            GameResult::Win { winner: Side::Black, black, white }
        } else if white > black {
            GameResult::Win { winner: Side::White, black, white }
        } else {
            GameResult::Draw { black, white }
        }
    }

    /// 胜者，和棋为 None
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::Win { winner, .. } => Some(*winner),
            GameResult::Draw { .. } => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win { winner, black, white } => {
                write!(f, "{} wins {}-{}", winner, black, white)
            }
            GameResult::Draw { black, white } => write!(f, "Draw {}-{}", black, white),
        }
    }
}

/// 当前轮次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// 该方有合法走法
    ToMove(Side),
    /// 该方无子可下，对方可以，必须停着
    MustPass(Side),
    /// 双方都无子可下
    Finished(GameResult),
}

/// 一局棋的完整状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    current_turn: Side,
    /// 上一步动作（开局为 None）
    last_action: Option<Action>,
}

impl Game {
    /// 从初始局面开始，黑方先行
    pub fn new() -> Self {
        Self::from_position(Board::initial(), Side::Black)
    }

    /// 从任意局面开始
    pub fn from_position(board: Board, current_turn: Side) -> Self {
        Self {
            board,
            current_turn,
            last_action: None,
        }
    }

    /// 从棋盘文本开始
    pub fn from_fen(fen: &str) -> Result<Self> {
        let (board, side) = Fen::parse(fen)?;
        Ok(Self::from_position(board, side))
    }

    /// 导出棋盘文本
    pub fn to_fen(&self) -> String {
        Fen::to_string(&self.board, self.current_turn)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// 当前走子方的合法走法（行优先）
    pub fn valid_moves(&self) -> Vec<Position> {
        MoveGenerator::valid_moves(&self.board, self.current_turn)
    }

    /// 判定当前轮次状态
    pub fn status(&self) -> GameStatus {
        if MoveGenerator::has_valid_move(&self.board, self.current_turn) {
            GameStatus::ToMove(self.current_turn)
        } else if MoveGenerator::has_valid_move(&self.board, self.current_turn.opponent()) {
            GameStatus::MustPass(self.current_turn)
        } else {
            GameStatus::Finished(GameResult::from_board(&self.board))
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status(), GameStatus::Finished(_))
    }

    /// 终局结果，对局未结束时为 None
    pub fn result(&self) -> Option<GameResult> {
        match self.status() {
            GameStatus::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// 当前走子方落子，返回被翻转的棋子
    pub fn play(&mut self, pos: Position) -> Result<Vec<Position>> {
        if self.is_over() {
            return Err(OthelloError::GameOver);
        }

        let side = self.current_turn;
        let (next, flips) = MoveGenerator::apply(&self.board, side, pos).ok_or(
            OthelloError::IllegalMove {
                row: pos.row,
                col: pos.col,
            },
        )?;

        debug!("{} plays {} flipping {} pieces", side, pos, flips.len());

        self.board = next;
        self.current_turn = side.opponent();
        self.last_action = Some(Action::Place(pos));
        Ok(flips)
    }

    /// 按行列坐标落子，越界报告 `InvalidPosition`
    pub fn play_at(&mut self, row: i32, col: i32) -> Result<Vec<Position>> {
        let pos = Position::try_new(row, col)?;
        self.play(pos)
    }

    /// 当前走子方停着，仅在无子可下且对方可下时允许
    pub fn pass(&mut self) -> Result<()> {
        match self.status() {
            GameStatus::MustPass(side) => {
                debug!("{} passes", side);
                self.current_turn = side.opponent();
                self.last_action = Some(Action::Pass);
                Ok(())
            }
            GameStatus::ToMove(_) => Err(OthelloError::PassNotAllowed),
            GameStatus::Finished(_) => Err(OthelloError::GameOver),
        }
    }

    /// 执行一步动作，停着时返回空列表
    pub fn act(&mut self, action: Action) -> Result<Vec<Position>> {
        match action {
            Action::Place(pos) => self.play(pos),
            Action::Pass => self.pass().map(|_| Vec::new()),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
