use crate::agents::Agent;
use crate::data::*;
use crate::results::*;
use crate::state::*;
use std::sync::Arc;

/// The word agents open with when it is in the dictionary. It has the best constant score of the
/// standard five letter corpus.
pub const DEFAULT_OPENING_WORD: &str = "cares";

/// The outcome of submitting a guess to a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess was scored against the secret.
    Accepted { feedback: Feedback, won: bool },
    /// The guess did not have the game's word length. The game is unchanged.
    RejectedInvalidLength,
    /// The guess is not in the dictionary. The game is unchanged.
    RejectedNotInDictionary,
    /// The game was already won or out of guesses. The game is unchanged.
    GameOverExhausted,
}

/// A single game against a secret word.
///
/// ```
/// use rs_wordle_search::*;
///
/// let corpus = Corpus::from_bank(WordBank::from_iterator(&["apple", "angle", "amble"]).unwrap()).unwrap();
/// let mut game = Game::start(&corpus, GameConfig::default(), Some("apple")).unwrap();
///
/// assert_eq!(game.submit_guess("pear"), GuessOutcome::RejectedInvalidLength);
/// assert_eq!(game.submit_guess("zzzzz"), GuessOutcome::RejectedNotInDictionary);
/// assert_eq!(
///     game.submit_guess("apple"),
///     GuessOutcome::Accepted { feedback: "ggggg".parse().unwrap(), won: true }
/// );
/// assert!(game.is_over());
/// assert_eq!(game.secret(), Some("apple"));
/// ```
#[derive(Debug, Clone)]
pub struct Game<'a> {
    corpus: &'a Corpus,
    config: GameConfig,
    secret: Arc<str>,
    guesses: Vec<Arc<str>>,
    won: bool,
}

impl<'a> Game<'a> {
    /// Starts a game against the given secret, or against a random frequent word if no secret is
    /// given.
    ///
    /// Fails if the secret is not in the corpus, or if the corpus's word length differs from the
    /// config's.
    pub fn start(
        corpus: &'a Corpus,
        config: GameConfig,
        secret: Option<&str>,
    ) -> Result<Game<'a>, WordleError> {
        if corpus.word_length() != config.word_length {
            return Err(WordleError::WordLength(config.word_length));
        }
        let secret = match secret {
            Some(secret) => {
                let secret = secret.trim().to_lowercase();
                match corpus.get(&secret) {
                    Some(word) => Arc::clone(word),
                    None => return Err(WordleError::UnknownWord(secret)),
                }
            }
            None => corpus.random_secret(WordList::Frequent)?,
        };
        log::debug!("starting a game with {} guesses", config.max_guesses);
        Ok(Game {
            corpus,
            config,
            secret,
            guesses: Vec::new(),
            won: false,
        })
    }

    /// Scores the guess against the secret. Invalid guesses and guesses after the game is over
    /// leave the game unchanged.
    pub fn submit_guess(&mut self, guess: &str) -> GuessOutcome {
        if self.is_over() {
            return GuessOutcome::GameOverExhausted;
        }
        let guess = guess.trim().to_lowercase();
        if guess.len() != self.config.word_length {
            return GuessOutcome::RejectedInvalidLength;
        }
        let guess = match self.corpus.get(&guess) {
            Some(word) => Arc::clone(word),
            None => return GuessOutcome::RejectedNotInDictionary,
        };
        let feedback = match self.config.scoring_mode.score(&self.secret, &guess) {
            Ok(feedback) => feedback,
            Err(_) => return GuessOutcome::RejectedInvalidLength,
        };
        self.won = feedback.is_solved();
        self.guesses.push(guess);
        GuessOutcome::Accepted {
            feedback,
            won: self.won,
        }
    }

    /// Returns `true` once the game is won or every guess has been used.
    pub fn is_over(&self) -> bool {
        self.won || self.num_guesses() >= self.config.max_guesses as usize
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// The accepted guesses so far, in order.
    pub fn guesses(&self) -> &[Arc<str>] {
        &self.guesses
    }

    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    pub fn remaining_guesses(&self) -> usize {
        (self.config.max_guesses as usize).saturating_sub(self.num_guesses())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The secret word, revealed only once the game is over.
    pub fn secret(&self) -> Option<&str> {
        if self.is_over() {
            Some(&self.secret)
        } else {
            None
        }
    }
}

/// Configures [`play_game_with_agent`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchConfig {
    pub game: GameConfig,
    /// The word list the agent's candidates start from.
    pub candidates: WordList,
    /// The first guess, made without asking the agent. If `None`, the agent makes every guess.
    pub opening_word: Option<Arc<str>>,
}

/// Picks the opening word: [`DEFAULT_OPENING_WORD`] if the corpus contains it, otherwise the word
/// with the best constant score.
pub fn default_opening_word(corpus: &Corpus, stats: &WordStatsTable) -> Option<Arc<str>> {
    if let Some(word) = corpus.get(DEFAULT_OPENING_WORD) {
        return Some(Arc::clone(word));
    }
    stats
        .best_word()
        .and_then(|word| corpus.get(word))
        .map(Arc::clone)
}

/// Plays a whole game against the given secret, with the agent choosing every guess after the
/// opening word.
///
/// Returns [`GameResult::UnknownWord`] if the secret is not in the corpus. The game is lost if the
/// agent runs out of candidates before finding the secret.
///
/// ```
/// use std::sync::Arc;
/// use rs_wordle_search::*;
///
/// let bank = WordBank::from_iterator(&["apple", "angle", "amble"]).unwrap();
/// let stats = Arc::new(WordStatsTable::compute(&bank));
/// let corpus = Corpus::from_bank(bank).unwrap();
/// let mut agent = create_agent(&AgentConfig::default(), stats);
///
/// let result = play_game_with_agent("amble", &corpus, agent.as_mut(), &MatchConfig::default());
///
/// assert!(matches!(result, Ok(GameResult::Success(_))));
/// ```
pub fn play_game_with_agent(
    secret: &str,
    corpus: &Corpus,
    agent: &mut dyn Agent,
    config: &MatchConfig,
) -> Result<GameResult, WordleError> {
    if !corpus.contains(secret) {
        return Ok(GameResult::UnknownWord);
    }
    let mut game = Game::start(corpus, config.game, Some(secret))?;
    let mut state = GameState::new(config.game, corpus.word_list(config.candidates));
    let mut next_guess = config.opening_word.clone();
    while !game.is_over() {
        let guess = match next_guess.take() {
            Some(guess) => guess,
            None => match agent.choose_guess(&state)? {
                Some(guess) => guess,
                None => break,
            },
        };
        match game.submit_guess(&guess) {
            GuessOutcome::Accepted { won: true, .. } => break,
            GuessOutcome::Accepted { feedback, .. } => {
                state = state.apply_guess(&guess)?.apply_feedback(&feedback)?;
            }
            GuessOutcome::RejectedInvalidLength => {
                return Err(WordleError::WordLength(config.game.word_length))
            }
            GuessOutcome::RejectedNotInDictionary => {
                return Err(WordleError::UnknownWord(guess.to_string()))
            }
            GuessOutcome::GameOverExhausted => break,
        }
    }
    let guesses = game.guesses().to_vec();
    if game.is_won() {
        log::debug!("solved '{}' in {} guesses", secret, guesses.len());
        Ok(GameResult::Success(guesses))
    } else {
        log::debug!("failed to solve '{}'", secret);
        Ok(GameResult::Failure(guesses))
    }
}
