use std::io;
use std::path::PathBuf;

/// Failures building the word bank or choosing a secret word.
#[derive(Debug, thiserror::Error)]
pub enum WordBankError {
    #[error("word source '{}' could not be read: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("word bank has no words between {min} and {max} letters")]
    EmptyBank { min: usize, max: usize },

    #[error("{0:?} is not a lowercase word")]
    InvalidWord(String),
}

/// A save that did not reach disk. The in-memory round is untouched.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not write save file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not encode game snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A load that was refused. The caller keeps its current round.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read save file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("save file '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },
}

/// Why a snapshot could not be turned back into a game.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Format(#[from] serde_json::Error),

    #[error("secret word {0:?} is not a lowercase word")]
    BadSecretWord(String),

    #[error("{0:?} is not a lowercase letter")]
    BadLetter(char),

    #[error("correct letter '{0}' is not in the secret word")]
    CorrectNotInWord(char),

    #[error("incorrect letter '{0}' is in the secret word")]
    IncorrectInWord(char),

    #[error("guess count {stored} does not match {actual} incorrect letters")]
    GuessCountMismatch { stored: usize, actual: usize },

    #[error("guess count {0} exceeds the limit")]
    TooManyGuesses(usize),

    #[error("status '{stored}' does not match the letters guessed (expected '{derived}')")]
    StatusMismatch {
        stored: &'static str,
        derived: &'static str,
    },
}
