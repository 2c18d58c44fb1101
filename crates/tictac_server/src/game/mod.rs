//! Game records, their stores and the engine that moves them forward.

mod engine;
mod events;
mod memory_store;
mod policy;
mod record;
mod sqlite_store;
mod store;

pub use engine::{DEFAULT_MAX_ATTEMPTS, EngineError, GameEngine};
pub use events::{AccountCommand, NotifyError, RecordingNotifier, WinNotifier};
pub use memory_store::InMemoryGameStore;
pub use policy::{MovePolicy, OpenSeating};
pub use record::{FIRST_PLY, GameId, GameRecord, NewGame};
pub use sqlite_store::SqliteGameStore;
pub use store::{GameStore, SwapOutcome};
