//! Read-only view of a round for the interfaces to draw.

use crate::game_state::{GUESS_LIMIT, GameState, Status};
use std::collections::BTreeSet;

pub const ALPHABET: std::ops::RangeInclusive<char> = 'a'..='z';

const HIDDEN: char = '_';

/// Gallows drawings indexed by the number of incorrect guesses.
static GALLOWS: [[&str; 6]; GUESS_LIMIT + 1] = [
    ["  +---+", "  |   |", "      |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", "  |   |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|   |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " /    |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " / \\  |", "========="],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// One slot per letter of the secret word; `None` while still hidden.
    pub word: Vec<Option<char>>,
    pub status: Status,
    pub guess_count: usize,
    pub correct: BTreeSet<char>,
    pub incorrect: BTreeSet<char>,
}

impl From<&GameState> for Board {
    fn from(state: &GameState) -> Self {
        let reveal_all = state.is_over();
        let word = state
            .secret_word()
            .chars()
            .map(|c| (reveal_all || state.correct_letters().contains(&c)).then_some(c))
            .collect();
        Self {
            word,
            status: state.status(),
            guess_count: state.guess_count(),
            correct: state.correct_letters().clone(),
            incorrect: state.incorrect_letters().clone(),
        }
    }
}

impl Board {
    pub fn guesses_left(&self) -> usize {
        GUESS_LIMIT.saturating_sub(self.guess_count)
    }

    pub fn status_line(&self) -> String {
        match self.status {
            Status::InProgress => match self.guesses_left() {
                1 => "1 limb left!".to_string(),
                n => format!("{n} limbs left!"),
            },
            Status::Won => "Game won!".to_string(),
            Status::Lost => "Game lost!".to_string(),
        }
    }

    pub fn word_label(&self) -> &'static str {
        match self.status {
            Status::InProgress => "Secret",
            Status::Won => "Solved",
            Status::Lost => "Solution",
        }
    }

    /// Letters separated by spaces, hidden ones as `_`.
    pub fn word_text(&self) -> String {
        let letters: Vec<String> = self
            .word
            .iter()
            .map(|slot| slot.unwrap_or(HIDDEN).to_string())
            .collect();
        letters.join(" ")
    }

    /// The alphabet followed by the correct and incorrect rows, each with a
    /// blank where the letter has not been guessed into that row.
    pub fn letter_rows(&self) -> [(&'static str, Vec<char>); 3] {
        let mark = |set: &BTreeSet<char>| {
            ALPHABET
                .map(|c| if set.contains(&c) { c } else { ' ' })
                .collect::<Vec<_>>()
        };
        [
            ("Letters", ALPHABET.collect()),
            ("Correct", mark(&self.correct)),
            ("Incorrect", mark(&self.incorrect)),
        ]
    }

    pub fn gallows(&self) -> &'static [&'static str] {
        &GALLOWS[self.guess_count.min(GUESS_LIMIT)]
    }
}
