//! 棋盘文本格式解析和生成
//!
//! 格式：`<棋盘> <走子方>`
//!
//! 棋盘自上而下共 8 行，以 `/` 分隔；`B` 为黑子，`W` 为白子，
//! 数字表示连续的空格数。走子方为 `b` 或 `w`，省略时默认黑方。
//!
//! 示例：
//! `8/8/8/3WB3/3BW3/8/8/8 b`

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::{OthelloError, Result};
use crate::piece::{Position, Side};

/// 初始局面
pub const INITIAL_FEN: &str = "8/8/8/3WB3/3BW3/8/8/8 b";

/// 棋盘文本格式处理
pub struct Fen;

impl Fen {
    /// 解析为棋盘和走子方
    pub fn parse(fen: &str) -> Result<(Board, Side)> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(OthelloError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }
        if parts.len() > 2 {
            return Err(OthelloError::InvalidFen {
                reason: format!("Expected at most 2 fields, got {}", parts.len()),
            });
        }

        let board = Self::parse_board(parts[0])?;

        let side = match parts.get(1) {
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => {
                        return Err(OthelloError::InvalidFen {
                            reason: format!("Invalid side to move: {}", field),
                        })
                    }
                }
            }
            None => Side::Black,
        };

        Ok((board, side))
    }

    /// 解析棋盘部分
    pub fn parse_board(board_str: &str) -> Result<Board> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(OthelloError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(OthelloError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(OthelloError::InvalidFen {
                            reason: format!("Zero-length gap in row {}", row_idx),
                        });
                    }
                    col += empty_count as usize;
                } else if let Some(side) = Side::from_fen_char(c) {
                    board.set(Position::new_unchecked(row_idx as u8, col as u8), Some(side));
                    col += 1;
                } else {
                    return Err(OthelloError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(OthelloError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, BOARD_SIZE),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘和走子方转换为文本
    pub fn to_string(board: &Board, side: Side) -> String {
        format!(
            "{} {}",
            Self::board_to_string(board),
            side.to_fen_char().to_ascii_lowercase()
        )
    }

    /// 将棋盘转换为文本棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE {
            let mut text = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE {
                if let Some(side) = board.get(Position::new_unchecked(row as u8, col as u8)) {
                    if empty_count > 0 {
                        text.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    text.push(side.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }

            rows.push(text);
        }

        rows.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_initial_fen() {
        let (board, side) = Fen::parse(INITIAL_FEN).unwrap();
        assert_eq!(board, Board::initial());
        assert_eq!(side, Side::Black);
    }

    #[test]
    fn test_initial_to_string() {
        assert_eq!(Fen::to_string(&Board::initial(), Side::Black), INITIAL_FEN);
    }

    #[test]
    fn test_parse_custom_fen() {
        let (board, side) = Fen::parse("B7/8/8/8/8/8/8/6ww w").unwrap();
        assert_eq!(side, Side::White);
        assert_eq!(board.get(Position::new_unchecked(0, 0)), Some(Side::Black));
        assert_eq!(board.get(Position::new_unchecked(7, 6)), Some(Side::White));
        assert_eq!(board.get(Position::new_unchecked(7, 7)), Some(Side::White));
        assert_eq!(board.piece_count(), 3);
    }

    #[test]
    fn test_side_defaults_to_black() {
        let (_, side) = Fen::parse("8/8/8/8/8/8/8/8").unwrap();
        assert_eq!(side, Side::Black);
    }

    #[test]
    fn test_invalid_fen() {
        // 行数不对
        assert!(Fen::parse("8/8/8").is_err());

        // 列数不对
        assert!(Fen::parse("9/8/8/8/8/8/8/8").is_err());
        assert!(Fen::parse("7/8/8/8/8/8/8/8").is_err());
        assert!(Fen::parse("BBBBBBBBB/8/8/8/8/8/8/8").is_err());

        // 无效字符
        assert!(Fen::parse("7x/8/8/8/8/8/8/8").is_err());

        // 无效走子方
        assert!(Fen::parse("8/8/8/8/8/8/8/8 x").is_err());
        assert!(Fen::parse("8/8/8/8/8/8/8/8 bw").is_err());

        assert!(matches!(
            Fen::parse(""),
            Err(OthelloError::InvalidFen { .. })
        ));
    }
}
