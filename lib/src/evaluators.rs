use crate::data::WordStatsTable;
use crate::results::WordleError;
use crate::state::GameState;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Weight of the scaled entropy in the heuristic score.
pub const ENTROPY_WEIGHT: f64 = 0.6;
/// Weight of the scaled average number of green letters in the heuristic score.
pub const GREEN_WEIGHT: f64 = 0.2;
/// Weight of the scaled average number of yellow letters in the heuristic score.
pub const YELLOW_WEIGHT: f64 = 0.15;
/// Weight of the scaled average number of grey letters in the heuristic score.
pub const GREY_WEIGHT: f64 = 0.05;
/// Entropy values are divided by this to scale them into roughly `[0, 1]`.
pub const MAX_ENTROPY: f64 = 7.0;

/// Gives game states a score, where the maximum score indicates the best guess.
///
/// Search agents call this on the leaves of their game trees. Implementations must not assume the
/// state has had feedback applied: most leaves are states where a guess has been chosen but not
/// yet answered.
pub trait StateEvaluator {
    /// Determines a score for the given state. The higher the score, the better the state's word
    /// is as a guess.
    fn evaluate(&self, state: &GameState) -> Result<f64, WordleError>;
}

/// Scores every state as `0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEvaluator;

impl StateEvaluator for NullEvaluator {
    fn evaluate(&self, _state: &GameState) -> Result<f64, WordleError> {
        Ok(0.0)
    }
}

/// Scores the state's word against the state's own candidate words.
///
/// The entropy is measured over the state's legal feedback patterns, by counting how many
/// candidates each pattern would keep. This costs *O*(*p* *n*) for *p* patterns and *n*
/// candidates, so it is only used once the pattern count has been pruned down.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalEvaluator;

impl StateEvaluator for LocalEvaluator {
    fn evaluate(&self, state: &GameState) -> Result<f64, WordleError> {
        let word_length = state.config().word_length as f64;
        let averages = compute_color_averages(state.word(), state.candidate_words());
        let entropy = compute_entropy(state);
        Ok(weighted_score(
            entropy / MAX_ENTROPY,
            averages.green / word_length,
            averages.yellow / word_length,
            averages.grey / word_length,
        ))
    }
}

/// Scores the state's word using the precomputed [`WordStatsTable`], which was measured against
/// the whole corpus rather than the current candidates.
#[derive(Debug, Clone)]
pub struct ConstEvaluator {
    stats: Arc<WordStatsTable>,
}

impl ConstEvaluator {
    pub fn new(stats: Arc<WordStatsTable>) -> ConstEvaluator {
        ConstEvaluator { stats }
    }
}

impl StateEvaluator for ConstEvaluator {
    fn evaluate(&self, state: &GameState) -> Result<f64, WordleError> {
        Ok(self.stats.lookup(state.word())?.score())
    }
}

/// Names one of the available evaluators.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluatorKind {
    /// [`LocalEvaluator`]
    Local,
    /// [`ConstEvaluator`]
    Const,
    /// [`NullEvaluator`]
    #[default]
    Null,
}

impl FromStr for EvaluatorKind {
    type Err = WordleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "local" => Ok(EvaluatorKind::Local),
            "const" => Ok(EvaluatorKind::Const),
            "null" | "none" => Ok(EvaluatorKind::Null),
            _ => Err(WordleError::UnknownOption(name.to_string())),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EvaluatorKind::Local => "local",
            EvaluatorKind::Const => "const",
            EvaluatorKind::Null => "null",
        })
    }
}

/// Combines the four scaled components into a single heuristic score.
pub fn weighted_score(
    entropy_scaled: f64,
    avg_green_scaled: f64,
    avg_yellow_scaled: f64,
    avg_grey_scaled: f64,
) -> f64 {
    ENTROPY_WEIGHT * entropy_scaled
        + GREEN_WEIGHT * avg_green_scaled
        + YELLOW_WEIGHT * avg_yellow_scaled
        + GREY_WEIGHT * avg_grey_scaled
}

/// The average number of letters per word falling in each colour.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ColorAverages {
    pub green: f64,
    pub yellow: f64,
    pub grey: f64,
}

/// Computes the average number of green, yellow and grey letters of each of `words` when
/// compared to `word`.
///
/// A letter of the other word counts as green if `word` has the same letter at that location,
/// yellow if `word` has that letter anywhere else, and grey otherwise.
pub fn compute_color_averages<S: AsRef<str>>(word: &str, words: &[S]) -> ColorAverages {
    if words.is_empty() {
        return ColorAverages::default();
    }
    let word = word.as_bytes();
    let mut totals = ColorAverages::default();
    for other in words {
        for (letter, word_letter) in other.as_ref().bytes().zip(word) {
            if letter == *word_letter {
                totals.green += 1.0;
            } else if word.contains(&letter) {
                totals.yellow += 1.0;
            } else {
                totals.grey += 1.0;
            }
        }
    }
    let num_words = words.len() as f64;
    ColorAverages {
        green: totals.green / num_words,
        yellow: totals.yellow / num_words,
        grey: totals.grey / num_words,
    }
}

/// Computes the entropy, in bits, of the feedback for the state's word, based on how many of the
/// state's candidates each legal feedback pattern keeps. Rounded to 5 decimal places.
pub fn compute_entropy(state: &GameState) -> f64 {
    let num_candidates = state.candidate_words().len();
    if num_candidates == 0 {
        return 0.0;
    }
    let patterns = state.legal_feedback_patterns();
    let counts = patterns
        .iter()
        .map(|pattern| state.count_consistent(pattern));
    round_to(entropy_from_counts(counts, num_candidates), 5)
}

/// Computes `sum(-p * log2(p))` where each `p` is a count divided by `total`. Zero counts are
/// skipped.
pub fn entropy_from_counts<I: IntoIterator<Item = usize>>(counts: I, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    counts
        .into_iter()
        .filter(|count| *count > 0)
        .map(|count| {
            let probability = count as f64 / total as f64;
            -probability * probability.log2()
        })
        .sum()
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
