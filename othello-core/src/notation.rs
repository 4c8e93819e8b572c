//! 坐标记法
//!
//! 列用字母 a-h（从左到右），行用数字 1-8（从上到下），
//! 例如 `d3` 即 (row 2, col 3)。停着记为 `pass`。

use std::fmt;
use std::str::FromStr;

use crate::constants::{BOARD_SIZE, COLUMN_LETTERS};
use crate::error::OthelloError;
use crate::game::Action;
use crate::piece::Position;

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", COLUMN_LETTERS[self.col as usize], self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Position {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OthelloError::InvalidNotation {
            text: s.to_string(),
        };

        let text = s.trim().to_ascii_lowercase();
        let mut chars = text.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let digit = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }

        let col = COLUMN_LETTERS
            .iter()
            .position(|c| *c == letter)
            .ok_or_else(invalid)?;
        let row = digit.to_digit(10).ok_or_else(invalid)? as usize;
        if row == 0 || row > BOARD_SIZE {
            return Err(invalid());
        }

        Ok(Position::new_unchecked((row - 1) as u8, col as u8))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(pos) => write!(f, "{}", pos),
            Action::Pass => f.write_str("pass"),
        }
    }
}

impl FromStr for Action {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("pass") {
            Ok(Action::Pass)
        } else {
            s.parse().map(Action::Place)
        }
    }
}
