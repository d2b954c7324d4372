//! Game rules for sliding-mark tic-tac-toe.
//!
//! Pure functions over a player's active marks. A board never fills up
//! (each seat keeps at most three marks), so there is no draw rule.

pub mod win;

pub use win::{WIN_LINES, is_win_line, winning_line};
