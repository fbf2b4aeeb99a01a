//! Save file handling.
//!
//! A round is stored as a small JSON document:
//!
//! ```json
//! {"correct":["a"],"incorrect":["z"],"secret_word":"apple","guesses":1,"status":"prog"}
//! ```
//!
//! Loading is all-or-nothing. The snapshot is checked against every rule the
//! live game keeps, and any violation is reported as corruption.

use crate::error::{LoadError, PersistError, SnapshotError};
use crate::game_state::{GUESS_LIMIT, GameState, Status, derive_status};
use crate::wordbank::is_valid_word;
use crate::{debug_log, info_log};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_SAVE_FILE: &str = "save.json";

/// On-disk spelling of [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum StatusToken {
    #[serde(rename = "prog")]
    Prog,
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "lose")]
    Lose,
}

impl StatusToken {
    fn as_str(self) -> &'static str {
        match self {
            Self::Prog => "prog",
            Self::Win => "win",
            Self::Lose => "lose",
        }
    }
}

impl From<Status> for StatusToken {
    fn from(status: Status) -> Self {
        match status {
            Status::InProgress => Self::Prog,
            Status::Won => Self::Win,
            Status::Lost => Self::Lose,
        }
    }
}

impl From<StatusToken> for Status {
    fn from(token: StatusToken) -> Self {
        match token {
            StatusToken::Prog => Self::InProgress,
            StatusToken::Win => Self::Won,
            StatusToken::Lose => Self::Lost,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Snapshot {
    correct: Vec<char>,
    incorrect: Vec<char>,
    secret_word: String,
    guesses: usize,
    status: StatusToken,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            correct: state.correct_letters().iter().copied().collect(),
            incorrect: state.incorrect_letters().iter().copied().collect(),
            secret_word: state.secret_word().to_string(),
            guesses: state.guess_count(),
            status: state.status().into(),
        }
    }
}

fn letter_set(letters: Vec<char>) -> Result<BTreeSet<char>, SnapshotError> {
    letters
        .into_iter()
        .map(|c| {
            if c.is_ascii_lowercase() {
                Ok(c)
            } else {
                Err(SnapshotError::BadLetter(c))
            }
        })
        .collect()
}

impl TryFrom<Snapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let Snapshot {
            correct,
            incorrect,
            secret_word,
            guesses,
            status,
        } = snapshot;

        if !is_valid_word(&secret_word) {
            return Err(SnapshotError::BadSecretWord(secret_word));
        }
        let correct = letter_set(correct)?;
        let incorrect = letter_set(incorrect)?;

        if let Some(&c) = correct.iter().find(|&&c| !secret_word.contains(c)) {
            return Err(SnapshotError::CorrectNotInWord(c));
        }
        if let Some(&c) = incorrect.iter().find(|&&c| secret_word.contains(c)) {
            return Err(SnapshotError::IncorrectInWord(c));
        }
        if guesses != incorrect.len() {
            return Err(SnapshotError::GuessCountMismatch {
                stored: guesses,
                actual: incorrect.len(),
            });
        }
        if guesses > GUESS_LIMIT {
            return Err(SnapshotError::TooManyGuesses(guesses));
        }
        let derived = StatusToken::from(derive_status(&secret_word, &correct, guesses));
        if derived != status {
            return Err(SnapshotError::StatusMismatch {
                stored: status.as_str(),
                derived: derived.as_str(),
            });
        }

        Ok(GameState::from_parts(
            secret_word,
            correct,
            incorrect,
            guesses,
            status.into(),
        ))
    }
}

pub fn encode(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Snapshot::from(state))
}

pub fn decode(data: &str) -> Result<GameState, SnapshotError> {
    decode_bytes(data.as_bytes())
}

/// Like [`decode`], for raw file contents. Bytes that are not UTF-8 are a
/// format error.
pub fn decode_bytes(data: &[u8]) -> Result<GameState, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_slice(data)?;
    GameState::try_from(snapshot)
}

/// Default save location: `<data dir>/hangman/save.json`, or `save.json` in
/// the working directory when the platform has no data dir.
pub fn default_save_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("hangman").join(DEFAULT_SAVE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE))
}

/// The save file for one player.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the save file with `state`.
    pub fn save(&self, state: &GameState) -> Result<(), PersistError> {
        let json = encode(state)?;
        write_atomic(&self.path, &json).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;
        info_log!("SaveStore::save() - wrote {}", self.path.display());
        Ok(())
    }

    /// `Ok(None)` when there is nothing saved yet.
    pub fn load(&self) -> Result<Option<GameState>, LoadError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug_log!("SaveStore::load() - no save at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let state = decode_bytes(&data).map_err(|source| LoadError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        info_log!("SaveStore::load() - restored {}", self.path.display());
        Ok(Some(state))
    }
}

/// Write to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_SAVE_FILE);
    let tmp_path = dir.join(format!(".{}.tmp-{}", base, std::process::id()));

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
