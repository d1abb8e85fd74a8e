//! Tic-tac-toe implementation of the game-state capability.
//!
//! Teams are [`Mark::X`] and [`Mark::O`], moves are cell indices 0-8
//! (row-major). A finished game rewards the team that made the last move
//! with 1.0 if it completed a line and 0.0 for a draw.
//!
//! States render (and parse) as `"X : XX_/___/___"`: the team to move,
//! then the three rows separated by `/`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameState, Reward};

/// Tic-tac-toe team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing team.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Tic-tac-toe board state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Mark>; 9],

    /// Team to move.
    to_move: Mark,
}

impl TicTacToe {
    /// Create a new empty board with X to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board([None; 9], Mark::X)
    }

    /// Create a state from an arbitrary board.
    #[must_use]
    pub fn from_board(board: [Option<Mark>; 9], to_move: Mark) -> Self {
        Self { board, to_move }
    }

    /// Get the mark in a cell, if any.
    #[must_use]
    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.board.get(cell).copied().flatten()
    }

    /// The team that completed a line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2], // rows
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6], // columns
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8], // diagonals
            [2, 4, 6],
        ];

        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.board[a]?;
            (self.board[b] == Some(mark) && self.board[c] == Some(mark)).then_some(mark)
        })
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(Option::is_some)
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Team = Mark;
    type Move = usize;

    fn current_team(&self) -> Mark {
        self.to_move
    }

    fn legal_moves(&self) -> Vec<usize> {
        (0..9).filter(|&cell| self.board[cell].is_none()).collect()
    }

    fn make_move(&self, mv: &usize) -> Self {
        let mut board = self.board;
        board[*mv] = Some(self.to_move);
        Self::from_board(board, self.to_move.opposite())
    }

    fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    fn reward(&self, _terminal_team: &Mark) -> Reward<Mark> {
        Reward::Scalar(if self.winner().is_some() { 1.0 } else { 0.0 })
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : ", self.to_move)?;
        for (i, cell) in self.board.iter().enumerate() {
            if i == 3 || i == 6 {
                write!(f, "/")?;
            }
            match cell {
                Some(mark) => write!(f, "{mark}")?,
                None => write!(f, "_")?,
            }
        }
        Ok(())
    }
}

/// Error parsing a rendered tic-tac-toe state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected \"<team> : <row>/<row>/<row>\", got {0:?}")]
    Layout(String),

    #[error("invalid cell {0:?}")]
    Cell(char),
}

impl FromStr for TicTacToe {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let layout = || ParseBoardError::Layout(s.to_string());

        let (team, rows) = s.split_once(" : ").ok_or_else(layout)?;
        let mut team_chars = team.chars();
        let to_move = match (team_chars.next().and_then(Mark::from_char), team_chars.next()) {
            (Some(mark), None) => mark,
            _ => return Err(layout()),
        };

        let rows: Vec<&str> = rows.split('/').collect();
        if rows.len() != 3 || rows.iter().any(|row| row.chars().count() != 3) {
            return Err(layout());
        }

        let mut board = [None; 9];
        for (cell, c) in board.iter_mut().zip(rows.concat().chars()) {
            *cell = match c {
                '_' => None,
                other => Some(Mark::from_char(other).ok_or(ParseBoardError::Cell(other))?),
            };
        }

        Ok(Self::from_board(board, to_move))
    }
}
