//! The hangman round: secret word, guessed letters, and outcome.
//!
//! # State Machine
//! - `InProgress` → `Won` when every distinct letter of the secret is guessed
//! - `InProgress` → `Lost` when the sixth incorrect guess lands
//! - Only [`GameState::reset`] leaves `Won` or `Lost`
//!
//! The win check runs before the loss check, so a guess that completes the
//! word always wins.

use crate::error::WordBankError;
use crate::wordbank::{WordBank, is_valid_word};
use crate::{debug_log, info_log};
use rand::Rng;
use std::collections::BTreeSet;

/// Incorrect guesses allowed before the round is lost.
pub const GUESS_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

/// What a single call to [`GameState::guess`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    AlreadyGuessed,
    NotALetter,
    RoundOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    secret_word: String,
    correct: BTreeSet<char>,
    incorrect: BTreeSet<char>,
    guess_count: usize,
    status: Status,
}

impl GameState {
    pub fn new_round(bank: &WordBank) -> Result<Self, WordBankError> {
        Self::new_round_with(bank, &mut rand::thread_rng())
    }

    pub fn new_round_with<R: Rng + ?Sized>(
        bank: &WordBank,
        rng: &mut R,
    ) -> Result<Self, WordBankError> {
        let word = bank.random_word_with(rng)?;
        info_log!("GameState::new_round() - new secret word drawn ({} letters)", word.len());
        Ok(Self::fresh(word.to_string()))
    }

    /// Start a round on a known word. The word must be non-empty lowercase
    /// ASCII letters, the same rule the word bank applies.
    pub fn with_secret_word(word: impl Into<String>) -> Result<Self, WordBankError> {
        let word = word.into();
        if !is_valid_word(&word) {
            return Err(WordBankError::InvalidWord(word));
        }
        Ok(Self::fresh(word))
    }

    fn fresh(secret_word: String) -> Self {
        Self {
            secret_word,
            correct: BTreeSet::new(),
            incorrect: BTreeSet::new(),
            guess_count: 0,
            status: Status::InProgress,
        }
    }

    /// Rebuild a state from stored parts. Callers are expected to have
    /// checked the parts against each other.
    pub(crate) fn from_parts(
        secret_word: String,
        correct: BTreeSet<char>,
        incorrect: BTreeSet<char>,
        guess_count: usize,
        status: Status,
    ) -> Self {
        Self {
            secret_word,
            correct,
            incorrect,
            guess_count,
            status,
        }
    }

    pub fn reset(&mut self, bank: &WordBank) -> Result<(), WordBankError> {
        self.reset_with(bank, &mut rand::thread_rng())
    }

    /// Draws the new word before touching anything, so a failed draw keeps
    /// the current round.
    pub fn reset_with<R: Rng + ?Sized>(
        &mut self,
        bank: &WordBank,
        rng: &mut R,
    ) -> Result<(), WordBankError> {
        *self = Self::new_round_with(bank, rng)?;
        Ok(())
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if !letter.is_ascii_lowercase() {
            debug_log!("GameState::guess() - ignoring non-letter {:?}", letter);
            return GuessOutcome::NotALetter;
        }
        if self.status != Status::InProgress {
            debug_log!("GameState::guess() - round is over, ignoring '{}'", letter);
            return GuessOutcome::RoundOver;
        }
        if self.correct.contains(&letter) || self.incorrect.contains(&letter) {
            return GuessOutcome::AlreadyGuessed;
        }

        let outcome = if self.secret_word.contains(letter) {
            self.correct.insert(letter);
            GuessOutcome::Correct
        } else {
            self.incorrect.insert(letter);
            self.guess_count += 1;
            GuessOutcome::Incorrect
        };
        self.status = derive_status(&self.secret_word, &self.correct, self.guess_count);
        debug_log!(
            "GameState::guess() - '{}' {:?}, {} incorrect, status {:?}",
            letter,
            outcome,
            self.guess_count,
            self.status
        );
        outcome
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn correct_letters(&self) -> &BTreeSet<char> {
        &self.correct
    }

    pub fn incorrect_letters(&self) -> &BTreeSet<char> {
        &self.incorrect
    }

    pub fn guess_count(&self) -> usize {
        self.guess_count
    }

    pub fn guesses_left(&self) -> usize {
        GUESS_LIMIT.saturating_sub(self.guess_count)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }
}

/// Status implied by the guessed letters. Win is checked first.
pub(crate) fn derive_status(secret_word: &str, correct: &BTreeSet<char>, guess_count: usize) -> Status {
    if secret_word.chars().all(|c| correct.contains(&c)) {
        Status::Won
    } else if guess_count >= GUESS_LIMIT {
        Status::Lost
    } else {
        Status::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::{MAX_WORD_LEN, MIN_WORD_LEN};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn guess_all(state: &mut GameState, letters: &str) {
        for c in letters.chars() {
            state.guess(c);
        }
    }

    fn assert_invariants(state: &GameState) {
        assert!(state.correct_letters().is_disjoint(state.incorrect_letters()));
        assert_eq!(state.guess_count(), state.incorrect_letters().len());
        assert!(state.guess_count() <= GUESS_LIMIT);
    }

    #[test]
    fn test_new_round_starts_clean() {
        let bank = WordBank::new(["apple", "grape"], MIN_WORD_LEN, MAX_WORD_LEN).unwrap();
        let state = GameState::new_round(&bank).unwrap();
        assert!(bank.contains(state.secret_word()));
        assert!(state.correct_letters().is_empty());
        assert!(state.incorrect_letters().is_empty());
        assert_eq!(state.guess_count(), 0);
        assert_eq!(state.guesses_left(), GUESS_LIMIT);
        assert_eq!(state.status(), Status::InProgress);
    }

    #[test]
    fn test_with_secret_word_rejects_non_lowercase() {
        for word in ["Apple", "", "co-op", "r2d2", "café"] {
            assert!(matches!(
                GameState::with_secret_word(word),
                Err(WordBankError::InvalidWord(w)) if w == word
            ));
        }
    }

    #[test]
    fn test_correct_guess() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        assert_eq!(state.guess('p'), GuessOutcome::Correct);
        assert!(state.correct_letters().contains(&'p'));
        assert_eq!(state.guess_count(), 0);
        assert_eq!(state.status(), Status::InProgress);
    }

    #[test]
    fn test_incorrect_guess() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        assert_eq!(state.guess('z'), GuessOutcome::Incorrect);
        assert!(state.incorrect_letters().contains(&'z'));
        assert_eq!(state.guess_count(), 1);
        assert_eq!(state.guesses_left(), 5);
    }

    #[test]
    fn test_repeated_guess_is_idempotent() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        for letter in ['a', 'z'] {
            state.guess(letter);
            let after_first = state.clone();
            assert_eq!(state.guess(letter), GuessOutcome::AlreadyGuessed);
            assert_eq!(state, after_first);
        }
        assert_eq!(state.guess_count(), 1);
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        let before = state.clone();
        for c in ['A', '1', ' ', 'é', '\n'] {
            assert_eq!(state.guess(c), GuessOutcome::NotALetter);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_win_scenario() {
        let mut state = GameState::with_secret_word("cat").unwrap();
        state.guess('c');
        assert_eq!(state.status(), Status::InProgress);
        state.guess('a');
        assert_eq!(state.status(), Status::InProgress);
        state.guess('t');
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.guess_count(), 0);
        assert!(state.is_over());
    }

    #[test]
    fn test_repeated_letters_in_word_need_one_guess() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        guess_all(&mut state, "aple");
        assert_eq!(state.status(), Status::Won);
    }

    #[test]
    fn test_loss_boundary() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        guess_all(&mut state, "bcdfg");
        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.guess_count(), 5);
        state.guess('h');
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.guess_count(), GUESS_LIMIT);
        assert_eq!(state.guesses_left(), 0);
    }

    #[test]
    fn test_win_takes_precedence_at_five_misses() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        guess_all(&mut state, "bcdfg");
        guess_all(&mut state, "apl");
        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.guess_count(), 5);
        assert_eq!(state.guess('e'), GuessOutcome::Correct);
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.guess_count(), 5);
    }

    #[test]
    fn test_win_checked_before_loss() {
        let correct: BTreeSet<char> = "cat".chars().collect();
        assert_eq!(derive_status("cat", &correct, GUESS_LIMIT), Status::Won);
        assert_eq!(derive_status("cat", &BTreeSet::new(), GUESS_LIMIT), Status::Lost);
        assert_eq!(derive_status("cat", &BTreeSet::new(), 0), Status::InProgress);
    }

    #[test]
    fn test_guesses_after_win_are_noops() {
        let mut state = GameState::with_secret_word("cat").unwrap();
        guess_all(&mut state, "cat");
        let finished = state.clone();
        for c in 'a'..='z' {
            assert_eq!(state.guess(c), GuessOutcome::RoundOver);
        }
        assert_eq!(state, finished);
    }

    #[test]
    fn test_guesses_after_loss_are_noops() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        guess_all(&mut state, "bcdfgh");
        let finished = state.clone();
        assert_eq!(state.guess('a'), GuessOutcome::RoundOver);
        assert_eq!(state.guess('z'), GuessOutcome::RoundOver);
        assert_eq!(state, finished);
    }

    #[test]
    fn test_invariants_hold_through_whole_alphabet() {
        for word in ["apple", "cat", "abcdefghijkl", "zzzzz"] {
            let mut state = GameState::with_secret_word(word).unwrap();
            for c in ('a'..='z').rev() {
                state.guess(c);
                state.guess(c);
                assert_invariants(&state);
            }
            assert!(state.is_over());
        }
    }

    #[test]
    fn test_reset_after_terminal_state() {
        let bank = WordBank::new(["apple"], MIN_WORD_LEN, MAX_WORD_LEN).unwrap();
        let mut state = GameState::with_secret_word("apple").unwrap();
        guess_all(&mut state, "bcdfgh");
        assert_eq!(state.status(), Status::Lost);

        state.reset(&bank).unwrap();
        assert_eq!(state, GameState::with_secret_word("apple").unwrap());
    }

    #[test]
    fn test_reset_mid_round() {
        let bank = WordBank::new(["melon", "grape"], MIN_WORD_LEN, MAX_WORD_LEN).unwrap();
        let mut state = GameState::with_secret_word("apple").unwrap();
        guess_all(&mut state, "axe");
        state.reset_with(&bank, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(bank.contains(state.secret_word()));
        assert!(state.correct_letters().is_empty());
        assert!(state.incorrect_letters().is_empty());
        assert_eq!(state.guess_count(), 0);
        assert_eq!(state.status(), Status::InProgress);
    }
}
