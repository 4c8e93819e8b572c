//! 棋局评估函数

use othello_core::{Board, MoveGenerator, Position, Side, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// 位置分值表：角最高，紧邻角的格子大幅扣分，其余接近零
#[rustfmt::skip]
pub const DEFAULT_POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [100, -20, 10,  5,  5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [ 10,  -2, -1, -1, -1, -1,  -2,  10],
    [  5,  -2, -1, -1, -1, -1,  -2,   5],
    [  5,  -2, -1, -1, -1, -1,  -2,   5],
    [ 10,  -2, -1, -1, -1, -1,  -2,  10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10,  5,  5, 10, -20, 100],
];

/// 行动力权重（位置项权重为 1）
pub const DEFAULT_MOBILITY_WEIGHT: i32 = 5;

/// 评估权重
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// 行优先的 8x8 位置分值
    pub position: [[i32; BOARD_SIZE]; BOARD_SIZE],
    /// 行动力差的系数
    pub mobility: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION_WEIGHTS,
            mobility: DEFAULT_MOBILITY_WEIGHT,
        }
    }
}

/// 评估器
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// 评估棋局（`side` 视角，正值对 `side` 有利）
    ///
    /// 分数 = 位置项 + 行动力权重 × 行动力项。两项都对双方反对称，
    /// 所以 `evaluate(b, s) == -evaluate(b, s.opponent())`。
    /// 权重来自配置文件，运算一律饱和，不会溢出。
    pub fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let mobility = self.weights.mobility.saturating_mul(Self::mobility(board, side));
        self.positional(board, side).saturating_add(mobility)
    }

    /// 位置项：己方棋子的分值之和减去对方棋子的分值之和
    pub fn positional(&self, board: &Board, side: Side) -> i32 {
        let mut score: i32 = 0;
        for pos in Position::all() {
            let weight = self.weights.position[pos.row as usize][pos.col as usize];
            match board.get(pos) {
                Some(s) if s == side => score = score.saturating_add(weight),
                Some(_) => score = score.saturating_sub(weight),
                None => {}
            }
        }
        score
    }

    /// 行动力项：己方合法走法数减去对方合法走法数
    pub fn mobility(board: &Board, side: Side) -> i32 {
        let mine = MoveGenerator::valid_moves(board, side).len() as i32;
        let theirs = MoveGenerator::valid_moves(board, side.opponent()).len() as i32;
        mine - theirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::Fen;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_initial_evaluation() {
        let evaluator = Evaluator::default();
        let board = Board::initial();
        // 初始局面完全对称
        assert_eq!(evaluator.evaluate(&board, Side::Black), 0);
        assert_eq!(evaluator.evaluate(&board, Side::White), 0);
    }

    #[test]
    fn test_weight_table_is_symmetric() {
        let w = DEFAULT_POSITION_WEIGHTS;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                assert_eq!(w[r][c], w[c][r]);
                assert_eq!(w[r][c], w[BOARD_SIZE - 1 - r][c]);
                assert_eq!(w[r][c], w[r][BOARD_SIZE - 1 - c]);
            }
        }
    }

    #[test]
    fn test_corner_beats_x_square() {
        let evaluator = Evaluator::default();
        // 黑占角
        let corner = Fen::parse_board("B7/8/8/8/8/8/8/8").unwrap();
        // 黑占角旁的 X 格
        let x_square = Fen::parse_board("8/1B6/8/8/8/8/8/8").unwrap();

        assert_eq!(evaluator.positional(&corner, Side::Black), 100);
        assert_eq!(evaluator.positional(&x_square, Side::Black), -50);
        assert!(
            evaluator.evaluate(&corner, Side::Black) > evaluator.evaluate(&x_square, Side::Black)
        );
    }

    #[test]
    fn test_mobility_term() {
        // 黑无子可下，白有一步
        let board = Fen::parse_board("WB6/8/8/8/8/8/8/8").unwrap();
        assert_eq!(Evaluator::mobility(&board, Side::Black), -1);
        assert_eq!(Evaluator::mobility(&board, Side::White), 1);

        let evaluator = Evaluator::default();
        // 位置项：白角 100，黑 (0,1) -20 → 黑视角 -20 - 100 = -120
        assert_eq!(evaluator.positional(&board, Side::Black), -120);
        assert_eq!(evaluator.evaluate(&board, Side::Black), -120 + 5 * -1);
    }

    #[test]
    fn test_custom_weights() {
        let weights = EvalWeights {
            position: [[0; BOARD_SIZE]; BOARD_SIZE],
            mobility: 1,
        };
        let evaluator = Evaluator::new(weights);
        let board = Fen::parse_board("WB6/8/8/8/8/8/8/8").unwrap();
        assert_eq!(evaluator.evaluate(&board, Side::White), 1);
    }

    #[test]
    fn test_antisymmetric() {
        let evaluator = Evaluator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10 {
            let mut board = Board::initial();
            let mut side = Side::Black;
            while !MoveGenerator::is_game_over(&board) {
                assert_eq!(
                    evaluator.evaluate(&board, Side::Black),
                    -evaluator.evaluate(&board, Side::White)
                );
                let moves = MoveGenerator::valid_moves(&board, side);
                if let Some(mv) = moves.choose(&mut rng) {
                    board = MoveGenerator::resulting_board(&board, side, *mv).unwrap();
                }
                side = side.opponent();
            }
        }
    }

    #[test]
    fn test_extreme_weights_saturate() {
        let evaluator = Evaluator::new(EvalWeights {
            position: [[i32::MAX; BOARD_SIZE]; BOARD_SIZE],
            mobility: i32::MIN,
        });

        let corner = Fen::parse_board("B7/8/8/8/8/8/8/8").unwrap();
        assert_eq!(evaluator.evaluate(&corner, Side::Black), i32::MAX);

        // 位置项两子抵消为 0，白方行动力 +1
        let board = Fen::parse_board("WB6/8/8/8/8/8/8/8").unwrap();
        assert_eq!(evaluator.positional(&board, Side::White), 0);
        assert_eq!(evaluator.evaluate(&board, Side::White), i32::MIN);

        let full = Fen::parse_board("BBBBBBBB/BBBBBBBB/BBBBBBBB/BBBBBBBB/8/8/8/8").unwrap();
        assert_eq!(evaluator.positional(&full, Side::Black), i32::MAX);
        assert_eq!(evaluator.positional(&full, Side::White), i32::MIN);
    }

    #[test]
    fn test_weights_serde_defaults() {
        let weights: EvalWeights = serde_json::from_str(r#"{"mobility": 3}"#).unwrap();
        assert_eq!(weights.mobility, 3);
        assert_eq!(weights.position, DEFAULT_POSITION_WEIGHTS);
    }
}
