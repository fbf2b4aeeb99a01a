// Library interface for hangman
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod driver;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod persistence;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use board::Board;
pub use driver::{Command, GameInterface, Notice, UserAction, dispatch, game_loop, parse_key};
pub use error::{LoadError, PersistError, SnapshotError, WordBankError};
pub use game_state::{GUESS_LIMIT, GameState, GuessOutcome, Status};
pub use persistence::SaveStore;
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
