//! 走法生成和落子

use crate::board::Board;
use crate::piece::{Direction, Position, Side};

/// 一步落子就是一个棋盘位置
pub type Move = Position;

/// 走法生成器
///
/// 全部为纯函数：不持有状态，不修改传入的棋盘。
pub struct MoveGenerator;

impl MoveGenerator {
    /// 计算在 `pos` 落子后可以翻转的对方棋子
    ///
    /// 沿八个方向逐格扫描：连续的对方棋子被收集起来，
    /// 若扫描终止于己方棋子，则这一方向收集到的棋子全部可翻；
    /// 遇到空格或出界则该方向不贡献任何棋子。
    /// 结果按方向顺序、由近及远排列。目标格非空时同样按扫描规则计算，
    /// 是否允许落子由调用方判断。
    pub fn flippable_pieces(board: &Board, side: Side, pos: Position) -> Vec<Position> {
        let mut flips = Vec::new();
        if !pos.is_valid() {
            return flips;
        }

        for direction in Direction::ALL {
            Self::scan_direction(board, side, pos, direction, &mut flips);
        }

        flips
    }

    /// 扫描单个方向，可翻的棋子追加到 `flips`
    fn scan_direction(
        board: &Board,
        side: Side,
        from: Position,
        direction: Direction,
        flips: &mut Vec<Position>,
    ) {
        let opponent = side.opponent();
        let start = flips.len();
        let mut current = from;

        while let Some(next) = current.step(direction) {
            match board.get(next) {
                Some(s) if s == opponent => flips.push(next),
                Some(_) => return,
                None => break,
            }
            current = next;
        }

        // 空格或出界，撤销这一方向的收集
        flips.truncate(start);
    }

    /// 生成指定阵营的所有合法走法，行优先顺序（从上到下、从左到右）
    ///
    /// 顺序决定了 AI 在同分时的选择，必须保持稳定。
    pub fn valid_moves(board: &Board, side: Side) -> Vec<Move> {
        Position::all()
            .filter(|pos| Self::is_valid_move(board, side, *pos))
            .collect()
    }

    /// 是否有任何合法走法
    pub fn has_valid_move(board: &Board, side: Side) -> bool {
        Position::all().any(|pos| Self::is_valid_move(board, side, pos))
    }

    /// 检查落子是否合法：目标为空格且至少能翻一子
    pub fn is_valid_move(board: &Board, side: Side, pos: Position) -> bool {
        board.is_empty_at(pos) && !Self::flippable_pieces(board, side, pos).is_empty()
    }

    /// 落子后的新棋盘；非法落子返回 None，原棋盘不变
    pub fn resulting_board(board: &Board, side: Side, pos: Position) -> Option<Board> {
        Self::apply(board, side, pos).map(|(next, _)| next)
    }

    /// 落子后的新棋盘及被翻转的棋子；非法落子返回 None
    pub fn apply(board: &Board, side: Side, pos: Position) -> Option<(Board, Vec<Position>)> {
        if !board.is_empty_at(pos) {
            return None;
        }

        let flips = Self::flippable_pieces(board, side, pos);
        if flips.is_empty() {
            return None;
        }

        let mut next = board.clone();
        next.set(pos, Some(side));
        for flipped in &flips {
            next.set(*flipped, Some(side));
        }
        Some((next, flips))
    }

    /// 双方都没有合法走法，对局结束
    pub fn is_game_over(board: &Board) -> bool {
        !Self::has_valid_move(board, Side::Black) && !Self::has_valid_move(board, Side::White)
    }

    /// 当前方无子可下但对方可以，必须停着
    pub fn must_pass(board: &Board, side: Side) -> bool {
        !Self::has_valid_move(board, side) && Self::has_valid_move(board, side.opponent())
    }
}
