//! Decided game results.

use crate::types::Mark;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Result of a decided game.
///
/// Stored and serialized as `"X"`, `"O"` or `"Draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Outcome {
    /// The mark completed a line.
    Winner(Mark),
    /// Board filled with no completed line.
    Draw,
}

impl Outcome {
    /// Returns the winning mark, if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// Stored text form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Winner(Mark::X) => "X",
            Outcome::Winner(Mark::O) => "O",
            Outcome::Draw => "Draw",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that does not name an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown outcome {_0:?}")]
pub struct UnknownOutcome(#[error(not(source))] pub String);

impl FromStr for Outcome {
    type Err = UnknownOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Outcome::Winner(Mark::X)),
            "O" => Ok(Outcome::Winner(Mark::O)),
            "Draw" => Ok(Outcome::Draw),
            other => Err(UnknownOutcome(other.to_string())),
        }
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        outcome.as_str().to_string()
    }
}

impl TryFrom<String> for Outcome {
    type Error = UnknownOutcome;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
