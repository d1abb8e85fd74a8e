//! Reference game implementations.
//!
//! Small, complete games used to exercise the search end to end.

pub mod tictactoe;
