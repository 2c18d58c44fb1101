//! Pure tic-tac-toe rules.
//!
//! The board value type, its nine-character storage encoding, and the
//! win/draw evaluation used by the game server. Nothing in this crate
//! performs I/O.
//!
//! # Example
//!
//! ```
//! use tictac_rules::{Board, Cell, Mark, Outcome, evaluate};
//!
//! let board: Board = "XXX OO   ".parse()?;
//! assert_eq!(evaluate(&board), Some(Outcome::Winner(Mark::X)));
//! assert_eq!(board.get(3)?, Cell::Empty);
//! # Ok::<(), tictac_rules::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod outcome;
mod rules;
mod types;

pub use board::{Board, BoardError, CELL_COUNT};
pub use outcome::{Outcome, UnknownOutcome};
pub use rules::{LINES, check_winner, evaluate, is_full};
pub use types::{Cell, Mark, UnknownCell};
