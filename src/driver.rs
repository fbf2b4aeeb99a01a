//! The loop that connects an interface to a round.
//!
//! One input is read, turned into a [`Command`], dispatched to completion,
//! and the board is drawn again. Nothing here holds state of its own; the
//! round is owned by whoever calls [`game_loop`].

use crate::board::Board;
use crate::game_state::{GameState, GuessOutcome};
use crate::persistence::SaveStore;
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use std::fmt;
use std::path::PathBuf;

pub const SAVE_KEY: char = '1';
pub const LOAD_KEY: char = '2';
pub const RESET_KEY: char = '3';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Save,
    Load,
    Reset,
    Guess(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Command(Command),
    Exit,
}

/// Map one input character to a command. Letters are lowercased; anything
/// that is neither a menu key nor an ASCII letter is ignored.
pub fn parse_key(key: char) -> Option<Command> {
    match key {
        SAVE_KEY => Some(Command::Save),
        LOAD_KEY => Some(Command::Load),
        RESET_KEY => Some(Command::Reset),
        c if c.is_ascii_alphabetic() => Some(Command::Guess(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Message for the status line after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Welcome,
    Guessed(char, GuessOutcome),
    Saved(PathBuf),
    SaveFailed(String),
    Loaded,
    NothingToLoad,
    LoadFailed(String),
    Reset,
    ResetFailed(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::SaveFailed(_) | Self::LoadFailed(_) | Self::ResetFailed(_)
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome => write!(f, "Guess a letter to begin."),
            Self::Guessed(c, GuessOutcome::Correct) => write!(f, "'{c}' is in the word."),
            Self::Guessed(c, GuessOutcome::Incorrect) => write!(f, "No '{c}' in the word."),
            Self::Guessed(c, GuessOutcome::AlreadyGuessed) => {
                write!(f, "You already guessed '{c}'.")
            }
            Self::Guessed(c, GuessOutcome::NotALetter) => write!(f, "{c:?} is not a letter."),
            Self::Guessed(_, GuessOutcome::RoundOver) => {
                write!(f, "This round is over. Press {RESET_KEY} to play again.")
            }
            Self::Saved(path) => write!(f, "Game saved to {}.", path.display()),
            Self::SaveFailed(e) => write!(f, "Save failed: {e}"),
            Self::Loaded => write!(f, "Saved game loaded."),
            Self::NothingToLoad => write!(f, "No saved game to load."),
            Self::LoadFailed(e) => write!(f, "Load failed: {e}"),
            Self::Reset => write!(f, "New word drawn."),
            Self::ResetFailed(e) => write!(f, "Reset failed: {e}"),
        }
    }
}

/// Run one command against the round. Failed saves, loads and resets leave
/// `state` exactly as it was.
pub fn dispatch(
    state: &mut GameState,
    bank: &WordBank,
    store: &SaveStore,
    command: Command,
) -> Notice {
    debug_log!("dispatch() - {:?}", command);
    match command {
        Command::Guess(letter) => Notice::Guessed(letter, state.guess(letter)),
        Command::Save => match store.save(state) {
            Ok(()) => Notice::Saved(store.path().to_path_buf()),
            Err(e) => {
                log::warn!("save failed: {e}");
                Notice::SaveFailed(e.to_string())
            }
        },
        Command::Load => match store.load() {
            Ok(Some(loaded)) => {
                *state = loaded;
                Notice::Loaded
            }
            Ok(None) => Notice::NothingToLoad,
            Err(e) => {
                log::warn!("load failed: {e}");
                Notice::LoadFailed(e.to_string())
            }
        },
        Command::Reset => match state.reset(bank) {
            Ok(()) => Notice::Reset,
            Err(e) => {
                log::error!("reset failed: {e}");
                Notice::ResetFailed(e.to_string())
            }
        },
    }
}

/// Anything that can show a board and hand back the player's next action.
pub trait GameInterface {
    fn render(&mut self, board: &Board, notice: &Notice);

    /// `None` when the input was not something the game understands.
    fn read_action(&mut self) -> Option<UserAction>;

    fn display_exit_message(&mut self, _board: &Board) {}
}

/// Play until the interface asks to exit; returns the final round.
pub fn game_loop<I: GameInterface + ?Sized>(
    mut state: GameState,
    bank: &WordBank,
    store: &SaveStore,
    interface: &mut I,
) -> GameState {
    let mut notice = Notice::Welcome;
    loop {
        interface.render(&Board::from(&state), &notice);
        match interface.read_action() {
            Some(UserAction::Exit) => {
                info_log!("game_loop() - exit requested");
                interface.display_exit_message(&Board::from(&state));
                break;
            }
            Some(UserAction::Command(command)) => {
                notice = dispatch(&mut state, bank, store, command);
            }
            None => {}
        }
    }
    state
}
