//! 搜索引擎
//!
//! 实现固定深度的 Minimax + Alpha-Beta 剪枝

use std::time::Instant;

use othello_core::{Board, MoveGenerator, Position, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::{EvalWeights, Evaluator};

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=2
    Easy,
    /// 中等：depth=4
    #[default]
    Medium,
    /// 困难：depth=6
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 搜索深度（层数）
    pub max_depth: u8,
    #[serde(default)]
    pub weights: EvalWeights,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let max_depth = match difficulty {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        };
        Self {
            difficulty,
            max_depth,
            weights: EvalWeights::default(),
        }
    }

    /// 指定深度，其余保持默认
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// 实际搜索深度，至少一层，保证根节点有走法时一定选出一步
    pub fn search_depth(&self) -> u8 {
        self.max_depth.max(MIN_SEARCH_DEPTH)
    }
}

/// 最小搜索深度
pub const MIN_SEARCH_DEPTH: u8 = 1;

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 搜索结果：分数及取得该分数的走法
///
/// 叶子节点和停着节点没有走法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Position>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// AI 引擎
///
/// 除节点计数外不持有状态，同样的棋盘、走子方和深度总是得到同样的走法。
pub struct AiEngine {
    config: AiConfig,
    evaluator: Evaluator,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        let evaluator = Evaluator::new(config.weights.clone());
        Self {
            config,
            evaluator,
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法，无合法走法时返回 None（调用方应停着）
    pub fn search(&mut self, board: &Board, side: Side) -> Option<Position> {
        if !MoveGenerator::has_valid_move(board, side) {
            debug!("{} has no legal move, nothing to search", side);
            return None;
        }
        self.analyze(board, side).best_move
    }

    /// 从根节点搜索，返回根节点分数和最佳走法
    pub fn analyze(&mut self, board: &Board, side: Side) -> SearchResult {
        self.nodes_searched = 0;
        let started = Instant::now();
        let depth = self.config.search_depth();

        let result = self.alpha_beta(board, side, side, depth, i32::MIN, i32::MAX, true);

        debug!(
            "search depth={} side={} score={} move={:?} nodes={} elapsed={:?}",
            depth,
            side,
            result.score,
            result.best_move.map(|mv| mv.to_string()),
            self.nodes_searched,
            started.elapsed()
        );

        result
    }

    /// Alpha-Beta 搜索
    ///
    /// 所有叶子都从 `root` 视角评估，极大/极小层的交替体现双方立场。
    /// 停着不消耗深度；双方都无子可下的局面在此之前已作为叶子返回。
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &Board,
        to_move: Side,
        root: Side,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes_searched += 1;

        if depth == 0 {
            return SearchResult::leaf(self.evaluator.evaluate(board, root));
        }

        let moves = MoveGenerator::valid_moves(board, to_move);
        let opponent = to_move.opponent();

        if moves.is_empty() {
            if !MoveGenerator::has_valid_move(board, opponent) {
                // 终局
                return SearchResult::leaf(self.evaluator.evaluate(board, root));
            }
            // 停着：换对方走，深度不变
            let passed = self.alpha_beta(board, opponent, root, depth, alpha, beta, !maximizing);
            return SearchResult::leaf(passed.score);
        }

        let mut best = SearchResult {
            score: if maximizing { i32::MIN } else { i32::MAX },
            best_move: None,
        };

        for mv in moves {
            let Some(next) = MoveGenerator::resulting_board(board, to_move, mv) else {
                continue;
            };
            let score = self
                .alpha_beta(&next, opponent, root, depth - 1, alpha, beta, !maximizing)
                .score;

            // 同分保留先出现（行优先靠前）的走法
            let improved = if maximizing {
                score > best.score
            } else {
                score < best.score
            };
            if improved || best.best_move.is_none() {
                best = SearchResult {
                    score,
                    best_move: Some(mv),
                };
            }

            if maximizing {
                alpha = alpha.max(best.score);
            } else {
                beta = beta.min(best.score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// 获取上一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}
