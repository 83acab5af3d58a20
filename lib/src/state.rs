use crate::results::*;
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::sync::Arc;

/// The default number of letters in each word.
pub const DEFAULT_WORD_LENGTH: usize = 5;
/// The default number of guesses allowed per game.
pub const DEFAULT_MAX_GUESSES: u32 = 6;

/// Configures the shape of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// The number of letters in each word.
    pub word_length: usize,
    /// The number of guesses allowed before the game is lost.
    pub max_guesses: u32,
    /// How guesses are scored, and therefore how candidates are filtered.
    pub scoring_mode: ScoringMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            word_length: DEFAULT_WORD_LENGTH,
            max_guesses: DEFAULT_MAX_GUESSES,
            scoring_mode: ScoringMode::Legacy,
        }
    }
}

impl GameConfig {
    /// The default config with a different word length.
    pub fn with_word_length(word_length: usize) -> GameConfig {
        GameConfig {
            word_length,
            ..GameConfig::default()
        }
    }
}

/// The two roles in the game tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Chooses the next word to guess.
    Guesser,
    /// Chooses the feedback for the current guess.
    Indicator,
}

impl Player {
    /// The player who moves after this one.
    pub fn other(self) -> Player {
        match self {
            Player::Guesser => Player::Indicator,
            Player::Indicator => Player::Guesser,
        }
    }
}

/// An action taken by one of the [`Player`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// The guesser guesses this word.
    Guess(Arc<str>),
    /// The indicator answers the current guess with this feedback.
    Indicate(Feedback),
}

impl Move {
    /// The player who makes this move.
    pub fn player(&self) -> Player {
        match self {
            Move::Guess(_) => Player::Guesser,
            Move::Indicate(_) => Player::Indicator,
        }
    }
}

/// One node in the game tree: the current guess, its feedback if known, everything learned so far,
/// and the words that could still be the objective.
///
/// States are never modified once built. Each transition returns a new state with its own copies
/// of the letter constraints, candidate list and guessed words, so branches of a search tree stay
/// independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    config: GameConfig,
    word: Arc<str>,
    feedback: Option<Feedback>,
    green_letters: Vec<Option<u8>>,
    yellow_letters: BTreeSet<u8>,
    candidate_words: Vec<Arc<str>>,
    guessed_words: HashSet<Arc<str>>,
}

impl GameState {
    /// Creates the state at the start of a game: no word, no constraints, and every given word as
    /// a candidate. Duplicate candidates are dropped.
    pub fn new(config: GameConfig, candidate_words: &[Arc<str>]) -> GameState {
        let mut seen: HashSet<&str> = HashSet::with_capacity(candidate_words.len());
        let mut unique_words = Vec::with_capacity(candidate_words.len());
        for word in candidate_words {
            if word.len() == config.word_length && seen.insert(&**word) {
                unique_words.push(Arc::clone(word));
            }
        }
        GameState {
            config,
            word: Arc::from(""),
            feedback: None,
            green_letters: vec![None; config.word_length],
            yellow_letters: BTreeSet::new(),
            candidate_words: unique_words,
            guessed_words: HashSet::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The word currently being guessed, or `""` before the first guess.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The feedback for the current word, or `None` if it has not been given yet.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// The letter known to be at each location, if any.
    pub fn green_letters(&self) -> impl Iterator<Item = Option<char>> + '_ {
        self.green_letters
            .iter()
            .map(|letter| letter.map(char::from))
    }

    /// Letters known to be in the objective at an unknown location.
    pub fn yellow_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.yellow_letters.iter().map(|letter| char::from(*letter))
    }

    /// Returns `true` iff no feedback has been applied yet.
    pub fn is_unconstrained(&self) -> bool {
        self.yellow_letters.is_empty() && self.green_letters.iter().all(Option::is_none)
    }

    /// The words that could still be the objective, in their original order.
    pub fn candidate_words(&self) -> &[Arc<str>] {
        &self.candidate_words
    }

    /// The words guessed so far.
    pub fn guessed_words(&self) -> &HashSet<Arc<str>> {
        &self.guessed_words
    }

    /// The words the guesser may choose from.
    pub fn legal_guesses(&self) -> &[Arc<str>] {
        &self.candidate_words
    }

    /// The feedback patterns the indicator may choose from.
    ///
    /// Before any constraints are known this is every pattern. Afterwards it is pruned per
    /// location: a location whose green letter matches the current word can only be green, a
    /// letter already known to be yellow can be green or yellow, and anything else can be any
    /// result. The pruned set may still contain unrealizable patterns.
    pub fn legal_feedback_patterns(&self) -> Vec<Feedback> {
        if self.is_unconstrained() {
            return all_feedback_patterns(self.config.word_length);
        }
        let options: Vec<Vec<LetterResult>> = self
            .word
            .bytes()
            .enumerate()
            .map(|(index, letter)| {
                if self.green_letters.get(index).copied().flatten() == Some(letter) {
                    vec![LetterResult::Correct]
                } else if self.yellow_letters.contains(&letter) {
                    vec![LetterResult::Correct, LetterResult::PresentNotHere]
                } else {
                    vec![
                        LetterResult::Correct,
                        LetterResult::PresentNotHere,
                        LetterResult::NotPresent,
                    ]
                }
            })
            .collect();
        feedback_product(&options)
    }

    /// Lists the moves available to the given player.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        match player {
            Player::Guesser => self
                .legal_guesses()
                .iter()
                .map(|word| Move::Guess(Arc::clone(word)))
                .collect(),
            Player::Indicator => self
                .legal_feedback_patterns()
                .into_iter()
                .map(Move::Indicate)
                .collect(),
        }
    }

    /// Returns the state after the given move.
    pub fn generate_successor(&self, next_move: &Move) -> Result<GameState, WordleError> {
        match next_move {
            Move::Guess(word) => self.apply_guess(word),
            Move::Indicate(feedback) => self.apply_feedback(feedback),
        }
    }

    /// Returns a new state guessing the given word. The word is added to the guessed words, and
    /// any previous feedback is cleared.
    pub fn apply_guess(&self, word: &str) -> Result<GameState, WordleError> {
        if word.len() != self.config.word_length {
            return Err(WordleError::WordLength(self.config.word_length));
        }
        let word: Arc<str> = self
            .candidate_words
            .iter()
            .find(|candidate| candidate.as_ref() == word)
            .map_or_else(|| Arc::from(word), Arc::clone);
        let mut guessed_words = self.guessed_words.clone();
        guessed_words.insert(Arc::clone(&word));
        Ok(GameState {
            config: self.config,
            word,
            feedback: None,
            green_letters: self.green_letters.clone(),
            yellow_letters: self.yellow_letters.clone(),
            candidate_words: self.candidate_words.clone(),
            guessed_words,
        })
    }

    /// Returns a new state where the current word received the given feedback.
    ///
    /// Candidates inconsistent with the feedback, and words already guessed, are removed. Green
    /// and yellow letters from the feedback are added to the known letters. Contradictory
    /// feedback simply leaves no candidates.
    pub fn apply_feedback(&self, feedback: &Feedback) -> Result<GameState, WordleError> {
        if feedback.len() != self.config.word_length || self.word.len() != feedback.len() {
            return Err(WordleError::WordLength(self.config.word_length));
        }
        let candidate_words: Vec<Arc<str>> = self
            .candidate_words
            .iter()
            .filter(|word| self.is_still_candidate(word, feedback))
            .map(Arc::clone)
            .collect();
        log::trace!(
            "feedback {} for '{}' keeps {} of {} candidates",
            feedback,
            self.word,
            candidate_words.len(),
            self.candidate_words.len()
        );
        let mut green_letters = self.green_letters.clone();
        let mut yellow_letters = self.yellow_letters.clone();
        for ((index, letter), result) in self.word.bytes().enumerate().zip(feedback.results()) {
            match result {
                LetterResult::Correct => green_letters[index] = Some(letter),
                LetterResult::PresentNotHere => {
                    yellow_letters.insert(letter);
                }
                LetterResult::NotPresent => {}
            }
        }
        Ok(GameState {
            config: self.config,
            word: Arc::clone(&self.word),
            feedback: Some(feedback.clone()),
            green_letters,
            yellow_letters,
            candidate_words,
            guessed_words: self.guessed_words.clone(),
        })
    }

    /// Counts the candidates that could be the secret if the current word received the given
    /// feedback. The current word is one of them until its own feedback arrives.
    pub fn count_consistent(&self, feedback: &Feedback) -> usize {
        self.candidate_words
            .iter()
            .filter(|word| {
                self.config
                    .scoring_mode
                    .is_consistent(word, &self.word, feedback)
                    && (***word == *self.word || !self.guessed_words.contains(&***word))
            })
            .count()
    }

    /// The number of the turn in progress, starting from 1.
    pub fn num_turns(&self) -> usize {
        self.guessed_words.len() + 1
    }

    fn is_still_candidate(&self, word: &str, feedback: &Feedback) -> bool {
        self.config
            .scoring_mode
            .is_consistent(word, &self.word, feedback)
            && !self.guessed_words.contains(word)
    }
}
