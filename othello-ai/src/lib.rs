//! 黑白棋 AI 引擎
//!
//! 包含:
//! - 棋局评估函数（位置权重 + 行动力）
//! - Minimax + Alpha-Beta 搜索
//! - 对手抽象：搜索型、策略模型型及带回退的组合

mod error;
mod evaluate;
mod opponent;
mod search;

pub use error::AiError;
pub use evaluate::{EvalWeights, Evaluator, DEFAULT_MOBILITY_WEIGHT, DEFAULT_POSITION_WEIGHTS};
pub use opponent::{AiBackend, FallbackOpponent, MovePolicy, Opponent, PolicyOpponent, SearchOpponent};
pub use search::{AiConfig, AiEngine, Difficulty, SearchResult, MIN_SEARCH_DEPTH};
