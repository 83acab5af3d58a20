use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The result of a given letter at a specific location.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LetterResult {
    /// Green: the letter is in the objective word at this location.
    Correct,
    /// Yellow: the letter is in the objective word, but somewhere else.
    PresentNotHere,
    /// Grey: the letter is not in the objective word.
    NotPresent,
}

impl LetterResult {
    /// Every possible letter result, in the order used when enumerating feedback patterns.
    pub const ALL: [LetterResult; 3] = [
        LetterResult::NotPresent,
        LetterResult::PresentNotHere,
        LetterResult::Correct,
    ];

    /// Renders the result as `'g'`, `'y'` or `'.'`.
    pub fn to_char(self) -> char {
        match self {
            LetterResult::Correct => 'g',
            LetterResult::PresentNotHere => 'y',
            LetterResult::NotPresent => '.',
        }
    }

    /// Parses a result from `'g'`, `'y'`, or one of `'.'`, `'-'`, `'x'` for grey.
    pub fn from_char(letter: char) -> Option<LetterResult> {
        match letter.to_ascii_lowercase() {
            'g' => Some(LetterResult::Correct),
            'y' => Some(LetterResult::PresentNotHere),
            '.' | '-' | 'x' => Some(LetterResult::NotPresent),
            _ => None,
        }
    }
}

/// Indicates that an error occurred while playing or solving a game.
#[derive(Debug, Error)]
pub enum WordleError {
    /// Indicates that a word or feedback pattern did not have the expected length. Holds the
    /// expected length.
    #[error("words must have length {0}")]
    WordLength(usize),
    /// Indicates that a word has no entry in the word statistics table.
    #[error("the word '{0}' is not in the word statistics table")]
    NotFound(String),
    /// Indicates that a word is not in the dictionary.
    #[error("the word '{0}' is not in the dictionary")]
    UnknownWord(String),
    /// Indicates that one or more given characters are not in the supported set.
    #[error("unsupported character '{0}', only ASCII letters are allowed")]
    UnsupportedCharacter(char),
    /// Indicates that a feedback string could not be parsed.
    #[error("invalid feedback '{0}', use only 'g', 'y' or '.'")]
    InvalidFeedback(String),
    /// Indicates that a line of the word statistics table could not be parsed.
    #[error("malformed word statistics line '{0}'")]
    MalformedStats(String),
    /// Indicates that a strategy or evaluator name was not recognised.
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    /// Indicates that a word list had no words in it.
    #[error("the word list is empty")]
    EmptyWordList,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The feedback pattern for a single guess: one [`LetterResult`] per letter, in the same order as
/// the letters of the guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feedback {
    results: Box<[LetterResult]>,
}

impl Feedback {
    /// Constructs feedback from the given per-letter results.
    pub fn from_results(results: &[LetterResult]) -> Feedback {
        Feedback {
            results: results.into(),
        }
    }

    /// Constructs feedback where every letter has the same result.
    pub fn uniform(result: LetterResult, word_length: usize) -> Feedback {
        Feedback {
            results: vec![result; word_length].into_boxed_slice(),
        }
    }

    /// The per-letter results.
    pub fn results(&self) -> &[LetterResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns `true` iff every letter was [`LetterResult::Correct`].
    pub fn is_solved(&self) -> bool {
        self.results
            .iter()
            .all(|result| *result == LetterResult::Correct)
    }
}

impl From<Vec<LetterResult>> for Feedback {
    fn from(results: Vec<LetterResult>) -> Self {
        Feedback {
            results: results.into_boxed_slice(),
        }
    }
}

impl FromStr for Feedback {
    type Err = WordleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .trim()
            .chars()
            .map(|letter| {
                LetterResult::from_char(letter)
                    .ok_or_else(|| WordleError::InvalidFeedback(input.to_string()))
            })
            .collect::<Result<Vec<LetterResult>, WordleError>>()
            .map(Feedback::from)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in self.results.iter() {
            write!(f, "{}", result.to_char())?;
        }
        Ok(())
    }
}

/// Selects how guesses are scored against the objective word.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScoringMode {
    /// A letter is yellow whenever it appears anywhere in the objective, even if all its
    /// occurrences are already accounted for. This is the scoring the word statistics table is
    /// computed with.
    #[default]
    Legacy,
    /// Standard Wordle scoring, where repeated letters are only yellow as many times as they
    /// appear unmatched in the objective.
    Exact,
}

impl ScoringMode {
    /// Determines the feedback for the given `guess` against the given `objective`.
    pub fn score(self, objective: &str, guess: &str) -> Result<Feedback, WordleError> {
        match self {
            ScoringMode::Legacy => get_result_for_guess(objective, guess),
            ScoringMode::Exact => get_exact_result_for_guess(objective, guess),
        }
    }

    /// Returns `true` iff `word` could be the objective, given that `guess` produced `feedback`.
    pub fn is_consistent(self, word: &str, guess: &str, feedback: &Feedback) -> bool {
        match self {
            ScoringMode::Legacy => is_consistent(word, guess, feedback),
            ScoringMode::Exact => get_exact_result_for_guess(word, guess)
                .map_or(false, |expected| expected == *feedback),
        }
    }
}

/// Determines the result of the given `guess` when applied to the given `objective`.
///
/// Each letter is green if it matches the objective at that location, yellow if it appears
/// anywhere else in the objective, and grey otherwise. Repeated letters are not counted, so a
/// letter guessed twice may be yellow twice even if it only appears once in the objective.
///
/// ```
/// use rs_wordle_search::*;
///
/// let feedback = get_result_for_guess("apple", "angle").unwrap();
///
/// assert_eq!(feedback.to_string(), "g..gg");
/// ```
pub fn get_result_for_guess(objective: &str, guess: &str) -> Result<Feedback, WordleError> {
    if objective.len() != guess.len() {
        return Err(WordleError::WordLength(objective.len()));
    }
    let objective = objective.as_bytes();
    Ok(guess
        .bytes()
        .enumerate()
        .map(|(index, letter)| {
            if objective[index] == letter {
                LetterResult::Correct
            } else if objective.contains(&letter) {
                LetterResult::PresentNotHere
            } else {
                LetterResult::NotPresent
            }
        })
        .collect::<Vec<LetterResult>>()
        .into())
}

/// Determines the result of the given `guess` against `objective` using standard Wordle rules,
/// where each letter in the objective can only mark one guessed letter.
pub fn get_exact_result_for_guess(objective: &str, guess: &str) -> Result<Feedback, WordleError> {
    if objective.len() != guess.len() {
        return Err(WordleError::WordLength(objective.len()));
    }
    let objective = objective.as_bytes();
    let guess = guess.as_bytes();
    let mut results = vec![LetterResult::NotPresent; guess.len()];
    let mut used = vec![false; objective.len()];
    for (index, (objective_letter, guess_letter)) in objective.iter().zip(guess).enumerate() {
        if objective_letter == guess_letter {
            results[index] = LetterResult::Correct;
            used[index] = true;
        }
    }
    for (index, guess_letter) in guess.iter().enumerate() {
        if results[index] == LetterResult::Correct {
            continue;
        }
        if let Some(position) = objective
            .iter()
            .enumerate()
            .position(|(other, letter)| letter == guess_letter && !used[other])
        {
            used[position] = true;
            results[index] = LetterResult::PresentNotHere;
        }
    }
    Ok(results.into())
}

/// Returns `true` iff `word` is consistent with `guess` having produced `feedback` under
/// [`ScoringMode::Legacy`]:
///
/// * green letters must match `word` at that location,
/// * yellow letters must appear in `word`, but not at that location,
/// * grey letters must not appear in `word` at all.
pub fn is_consistent(word: &str, guess: &str, feedback: &Feedback) -> bool {
    let word = word.as_bytes();
    let guess = guess.as_bytes();
    if word.len() != guess.len() || guess.len() != feedback.len() {
        return false;
    }
    feedback
        .results()
        .iter()
        .zip(guess)
        .enumerate()
        .all(|(index, (result, letter))| match result {
            LetterResult::Correct => word[index] == *letter,
            LetterResult::PresentNotHere => word[index] != *letter && word.contains(letter),
            LetterResult::NotPresent => !word.contains(letter),
        })
}

/// Enumerates every feedback pattern for words of the given length: the full Cartesian product of
/// [`LetterResult::ALL`], with the last letter varying fastest.
pub fn all_feedback_patterns(word_length: usize) -> Vec<Feedback> {
    let options = vec![LetterResult::ALL.to_vec(); word_length];
    feedback_product(&options)
}

/// Builds the Cartesian product of the allowed results at each location.
pub(crate) fn feedback_product(options: &[Vec<LetterResult>]) -> Vec<Feedback> {
    let mut patterns: Vec<Vec<LetterResult>> = vec![Vec::with_capacity(options.len())];
    for allowed in options {
        patterns = patterns
            .iter()
            .flat_map(|prefix| {
                allowed.iter().map(move |result| {
                    let mut pattern = prefix.clone();
                    pattern.push(*result);
                    pattern
                })
            })
            .collect();
    }
    patterns.into_iter().map(Feedback::from).collect()
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Arc<str>>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Arc<str>>),
    /// Indicates that the given word was not in the word bank.
    UnknownWord,
}
