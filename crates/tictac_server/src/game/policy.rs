//! Who may play the mark whose turn it is.

use tictac_rules::Mark;

use crate::AccountId;
use crate::game::GameRecord;

/// Decides whether `mover` may place `mark` in a game.
///
/// The engine derives `mark` from ply parity before asking; the policy only
/// accepts or refuses the caller.
pub trait MovePolicy: Send + Sync + std::fmt::Debug {
    /// Returns true if `mover` may play `mark` on `record`.
    fn permits(&self, record: &GameRecord, mover: AccountId, mark: Mark) -> bool;
}

/// Any authenticated caller may play whichever mark is due.
///
/// There is no membership or seat check: the creator, an opponent or a third
/// account are all accepted, and legality rests on ply parity and cell occupancy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSeating;

impl MovePolicy for OpenSeating {
    fn permits(&self, _record: &GameRecord, _mover: AccountId, _mark: Mark) -> bool {
        true
    }
}
