//! 对手抽象
//!
//! 驱动方只依赖 [`Opponent`]：给出棋盘和走子方，得到一步落子或 None（停着）。
//! 搜索型对手和外部策略模型型对手可以互相替换。

use othello_core::{Board, MoveGenerator, Position, Side, NUM_SQUARES};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AiError;
use crate::search::{AiConfig, AiEngine};

/// 对手能力
///
/// `Ok(None)` 表示无合法走法，调用方应停着；
/// 有合法走法时绝不能返回 `Ok(None)`。
pub trait Opponent: Send + Sync {
    fn name(&self) -> &str;

    /// 是否可以立即计算走法
    fn is_ready(&self) -> bool;

    fn find_best_move(&self, board: &Board, side: Side) -> Result<Option<Position>, AiError>;
}

/// Alpha-Beta 搜索对手
///
/// 每次调用新建引擎，调用之间不共享可变状态。
#[derive(Debug, Clone, Default)]
pub struct SearchOpponent {
    config: AiConfig,
}

impl SearchOpponent {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl Opponent for SearchOpponent {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn find_best_move(&self, board: &Board, side: Side) -> Result<Option<Position>, AiError> {
        let mut engine = AiEngine::new(self.config.clone());
        Ok(engine.search(board, side))
    }
}

/// 外部策略模型
///
/// 模型如何编码棋盘、如何加载都由实现方负责；
/// 这里只要求按行优先给出 64 个格子的分数，分数越高越倾向落子。
pub trait MovePolicy: Send + Sync {
    /// 模型是否已加载
    fn is_loaded(&self) -> bool;

    fn policy(&self, board: &Board, side: Side) -> Result<Vec<f32>, AiError>;
}

impl<P: MovePolicy + ?Sized> MovePolicy for Box<P> {
    fn is_loaded(&self) -> bool {
        (**self).is_loaded()
    }

    fn policy(&self, board: &Board, side: Side) -> Result<Vec<f32>, AiError> {
        (**self).policy(board, side)
    }
}

/// 策略模型对手：在合法走法中选分数最高的格子
pub struct PolicyOpponent<P> {
    name: String,
    policy: P,
}

impl<P: MovePolicy> PolicyOpponent<P> {
    pub fn new(name: impl Into<String>, policy: P) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }

    /// 按模型分数在合法走法中挑选，同分取行优先靠前的；NaN 视为最低分
    fn pick(moves: &[Position], scores: &[f32]) -> Option<Position> {
        let score_of = |mv: &Position| {
            let s = scores[mv.to_index()];
            if s.is_nan() {
                f32::NEG_INFINITY
            } else {
                s
            }
        };

        let mut best: Option<(Position, f32)> = None;
        for mv in moves {
            let s = score_of(mv);
            match best {
                Some((_, best_score)) if s <= best_score => {}
                _ => best = Some((*mv, s)),
            }
        }
        best.map(|(mv, _)| mv)
    }
}

impl<P: MovePolicy> Opponent for PolicyOpponent<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ready(&self) -> bool {
        self.policy.is_loaded()
    }

    fn find_best_move(&self, board: &Board, side: Side) -> Result<Option<Position>, AiError> {
        if !self.policy.is_loaded() {
            return Err(AiError::NotReady {
                name: self.name.clone(),
            });
        }

        let moves = MoveGenerator::valid_moves(board, side);
        if moves.is_empty() {
            return Ok(None);
        }

        let scores = self.policy.policy(board, side)?;
        if scores.len() != NUM_SQUARES {
            return Err(AiError::PolicyShape {
                expected: NUM_SQUARES,
                actual: scores.len(),
            });
        }

        let chosen = Self::pick(&moves, &scores);
        debug!("{} picked {:?} among {} moves", self.name, chosen, moves.len());
        Ok(chosen)
    }
}

/// 组合对手：主对手未就绪或出错时改用备用对手
pub struct FallbackOpponent {
    name: String,
    primary: Box<dyn Opponent>,
    fallback: Box<dyn Opponent>,
}

impl FallbackOpponent {
    pub fn new(primary: Box<dyn Opponent>, fallback: Box<dyn Opponent>) -> Self {
        let name = format!("{}+{}", primary.name(), fallback.name());
        Self {
            name,
            primary,
            fallback,
        }
    }
}

impl Opponent for FallbackOpponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ready(&self) -> bool {
        self.primary.is_ready() || self.fallback.is_ready()
    }

    fn find_best_move(&self, board: &Board, side: Side) -> Result<Option<Position>, AiError> {
        if self.primary.is_ready() {
            match self.primary.find_best_move(board, side) {
                Ok(mv) => return Ok(mv),
                Err(e) => warn!(
                    "{} failed: {}, falling back to {}",
                    self.primary.name(),
                    e,
                    self.fallback.name()
                ),
            }
        } else {
            warn!(
                "{} is not ready, falling back to {}",
                self.primary.name(),
                self.fallback.name()
            );
        }
        self.fallback.find_best_move(board, side)
    }
}

/// AI 后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiBackend {
    /// 传统搜索算法（Alpha-Beta）
    #[default]
    Search,
    /// 外部策略模型
    Policy,
    /// 混合模式：策略模型失败时回退到搜索
    Hybrid,
}

impl AiBackend {
    /// 按后端类型组装对手
    ///
    /// `Policy` 需要提供模型；`Hybrid` 缺少模型时只使用搜索。
    pub fn build(
        self,
        config: AiConfig,
        policy: Option<Box<dyn MovePolicy>>,
    ) -> Result<Box<dyn Opponent>, AiError> {
        match (self, policy) {
            (AiBackend::Search, _) => Ok(Box::new(SearchOpponent::new(config))),
            (AiBackend::Policy, Some(policy)) => Ok(Box::new(PolicyOpponent::new("policy", policy))),
            (AiBackend::Policy, None) => Err(AiError::NotReady {
                name: "policy".to_string(),
            }),
            (AiBackend::Hybrid, Some(policy)) => Ok(Box::new(FallbackOpponent::new(
                Box::new(PolicyOpponent::new("policy", policy)),
                Box::new(SearchOpponent::new(config)),
            ))),
            (AiBackend::Hybrid, None) => {
                warn!("No policy model supplied, hybrid backend uses search only");
                Ok(Box::new(SearchOpponent::new(config)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::Fen;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    /// 固定输出的测试模型
    struct FixedPolicy {
        loaded: bool,
        scores: Vec<f32>,
    }

    impl FixedPolicy {
        fn with_scores(entries: &[(Position, f32)]) -> Self {
            let mut scores = vec![0.0; NUM_SQUARES];
            for (p, s) in entries {
                scores[p.to_index()] = *s;
            }
            Self {
                loaded: true,
                scores,
            }
        }
    }

    impl MovePolicy for FixedPolicy {
        fn is_loaded(&self) -> bool {
            self.loaded
        }

        fn policy(&self, _board: &Board, _side: Side) -> Result<Vec<f32>, AiError> {
            Ok(self.scores.clone())
        }
    }

    struct BrokenPolicy;

    impl MovePolicy for BrokenPolicy {
        fn is_loaded(&self) -> bool {
            true
        }

        fn policy(&self, _board: &Board, _side: Side) -> Result<Vec<f32>, AiError> {
            Err(AiError::Policy("session closed".to_string()))
        }
    }

    #[test]
    fn test_search_opponent() {
        let opponent = SearchOpponent::default();
        assert!(opponent.is_ready());
        assert_eq!(opponent.name(), "alpha-beta");
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(2, 3)))
        );
    }

    #[test]
    fn test_search_opponent_with_zero_depth_config() {
        let config: AiConfig =
            serde_json::from_str(r#"{"difficulty": "Easy", "max_depth": 0}"#).unwrap();
        let opponent = SearchOpponent::new(config);
        let board = Board::initial();

        let chosen = opponent.find_best_move(&board, Side::Black).unwrap();
        let legal = MoveGenerator::valid_moves(&board, Side::Black);
        assert!(chosen.is_some_and(|mv| legal.contains(&mv)));
    }

    #[test]
    fn test_policy_ignores_illegal_cells() {
        // 角上分数最高，但不是合法走法
        let policy = FixedPolicy::with_scores(&[(pos(0, 0), 9.0), (pos(4, 5), 0.7), (pos(3, 2), 0.2)]);
        let opponent = PolicyOpponent::new("net", policy);
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(4, 5)))
        );
    }

    #[test]
    fn test_policy_ties_take_first_in_row_major_order() {
        let policy = FixedPolicy::with_scores(&[(pos(5, 4), 0.5), (pos(3, 2), 0.5)]);
        let opponent = PolicyOpponent::new("net", policy);
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(3, 2)))
        );

        let nan = FixedPolicy::with_scores(&[(pos(2, 3), f32::NAN), (pos(5, 4), -1.0)]);
        let opponent = PolicyOpponent::new("net", nan);
        // 其余合法走法分数为 0，NaN 视为最低
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(3, 2)))
        );
    }

    #[test]
    fn test_policy_not_ready() {
        let policy = FixedPolicy {
            loaded: false,
            scores: vec![0.0; NUM_SQUARES],
        };
        let opponent = PolicyOpponent::new("net", policy);
        assert!(!opponent.is_ready());
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Err(AiError::NotReady {
                name: "net".to_string()
            })
        );
    }

    #[test]
    fn test_policy_wrong_shape_is_an_error() {
        let policy = FixedPolicy {
            loaded: true,
            scores: vec![1.0; 10],
        };
        let opponent = PolicyOpponent::new("net", policy);
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Err(AiError::PolicyShape {
                expected: 64,
                actual: 10
            })
        );
    }

    #[test]
    fn test_policy_no_legal_move() {
        let (board, _) = Fen::parse("WB6/8/8/8/8/8/8/8 b").unwrap();
        let opponent = PolicyOpponent::new("net", BrokenPolicy);
        // 无子可下时不调用模型
        assert_eq!(opponent.find_best_move(&board, Side::Black), Ok(None));
    }

    #[test]
    fn test_fallback_on_error() {
        let opponent = FallbackOpponent::new(
            Box::new(PolicyOpponent::new("net", BrokenPolicy)),
            Box::new(SearchOpponent::default()),
        );
        assert_eq!(opponent.name(), "net+alpha-beta");
        assert!(opponent.is_ready());
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(2, 3)))
        );
    }

    #[test]
    fn test_fallback_when_not_ready() {
        let unloaded = FixedPolicy {
            loaded: false,
            scores: vec![0.0; NUM_SQUARES],
        };
        let opponent = FallbackOpponent::new(
            Box::new(PolicyOpponent::new("net", unloaded)),
            Box::new(SearchOpponent::default()),
        );
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(2, 3)))
        );
    }

    #[test]
    fn test_primary_used_when_healthy() {
        let policy = FixedPolicy::with_scores(&[(pos(5, 4), 1.0)]);
        let opponent = FallbackOpponent::new(
            Box::new(PolicyOpponent::new("net", policy)),
            Box::new(SearchOpponent::default()),
        );
        assert_eq!(
            opponent.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(5, 4)))
        );
    }

    #[test]
    fn test_backend_build() {
        assert_eq!(AiBackend::default(), AiBackend::Search);

        let search = AiBackend::Search.build(AiConfig::default(), None).unwrap();
        assert_eq!(search.name(), "alpha-beta");

        assert!(AiBackend::Policy.build(AiConfig::default(), None).is_err());

        let policy: Box<dyn MovePolicy> = Box::new(FixedPolicy::with_scores(&[(pos(4, 5), 1.0)]));
        let hybrid = AiBackend::Hybrid.build(AiConfig::default(), Some(policy)).unwrap();
        assert_eq!(hybrid.name(), "policy+alpha-beta");
        assert_eq!(
            hybrid.find_best_move(&Board::initial(), Side::Black),
            Ok(Some(pos(4, 5)))
        );

        let hybrid = AiBackend::Hybrid.build(AiConfig::default(), None).unwrap();
        assert_eq!(hybrid.name(), "alpha-beta");
    }
}
