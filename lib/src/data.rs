use crate::evaluators::compute_color_averages;
use crate::evaluators::entropy_from_counts;
use crate::evaluators::weighted_score;
use crate::evaluators::MAX_ENTROPY;
use crate::results::*;
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;
use std::io::BufRead;
use std::io::Write;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

/// Contains all the possible words for a Wordle game, in the order they were provided.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word will be trimmed and converted to
    /// lower case. Blank lines are skipped, and duplicate words are only kept once.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let words = word_reader
            .lines()
            .collect::<Result<Vec<String>, std::io::Error>>()?;
        WordBank::from_iterator(words)
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// Each word will be trimmed and converted to lower case. All words must have the same length
    /// and contain only ASCII letters.
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut word_length = 0;
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut all_words = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if let Some(letter) = word.chars().find(|letter| !letter.is_ascii_alphabetic()) {
                return Err(WordleError::UnsupportedCharacter(letter));
            }
            if word_length == 0 {
                word_length = word.len();
            } else if word.len() != word_length {
                return Err(WordleError::WordLength(word_length));
            }
            let word: Arc<str> = Arc::from(word.to_lowercase().as_str());
            if seen.insert(Arc::clone(&word)) {
                all_words.push(word);
            }
        }
        Ok(WordBank {
            all_words,
            word_length,
        })
    }

    /// Returns the number of words in the bank.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the length of each word in the bank, or 0 if the bank is empty.
    pub fn word_length(&self) -> usize {
        self.word_length
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

/// Selects one of the corpus's word lists.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordList {
    /// Every legal word.
    All,
    /// The ranked subset of frequent words, used as plausible secrets.
    #[default]
    Frequent,
}

impl FromStr for WordList {
    type Err = WordleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Ok(WordList::All),
            "frequent" | "freq" => Ok(WordList::Frequent),
            _ => Err(WordleError::UnknownOption(name.to_string())),
        }
    }
}

/// The dictionary of legal words along with the frequent words that secrets are drawn from.
#[derive(Debug, Clone)]
pub struct Corpus {
    all: WordBank,
    frequent: WordBank,
    dictionary: HashSet<Arc<str>>,
}

impl Corpus {
    /// Constructs a corpus. The frequent words must have the same length as the full dictionary;
    /// any frequent words missing from the dictionary are still accepted as legal guesses.
    pub fn new(all: WordBank, frequent: WordBank) -> Result<Corpus, WordleError> {
        if all.is_empty() {
            return Err(WordleError::EmptyWordList);
        }
        if !frequent.is_empty() && frequent.word_length() != all.word_length() {
            return Err(WordleError::WordLength(all.word_length()));
        }
        let dictionary = all.iter().chain(frequent.iter()).map(Arc::clone).collect();
        log::info!(
            "loaded corpus with {} words ({} frequent)",
            all.len(),
            frequent.len()
        );
        Ok(Corpus {
            all,
            frequent,
            dictionary,
        })
    }

    /// Constructs a corpus where every word is also a frequent word.
    pub fn from_bank(all: WordBank) -> Result<Corpus, WordleError> {
        let frequent = all.clone();
        Corpus::new(all, frequent)
    }

    pub fn all_words(&self) -> &WordBank {
        &self.all
    }

    pub fn frequent_words(&self) -> &WordBank {
        &self.frequent
    }

    /// Returns the requested word list.
    pub fn word_list(&self, list: WordList) -> &WordBank {
        match list {
            WordList::All => &self.all,
            WordList::Frequent => &self.frequent,
        }
    }

    pub fn word_length(&self) -> usize {
        self.all.word_length()
    }

    /// Returns `true` iff the word is a legal guess.
    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    /// Returns the dictionary's shared copy of the given word, if it is legal.
    pub fn get(&self, word: &str) -> Option<&Arc<str>> {
        self.dictionary.get(word)
    }

    /// Picks a secret word uniformly at random from the requested list.
    pub fn random_secret(&self, list: WordList) -> Result<Arc<str>, WordleError> {
        self.random_secret_with_rng(list, &mut rand::thread_rng())
    }

    /// Picks a secret word uniformly at random from the requested list using the given rng.
    pub fn random_secret_with_rng<R: Rng + ?Sized>(
        &self,
        list: WordList,
        rng: &mut R,
    ) -> Result<Arc<str>, WordleError> {
        self.word_list(list)
            .choose(rng)
            .map(Arc::clone)
            .ok_or(WordleError::EmptyWordList)
    }
}

/// Precomputed heuristic scores for a single word, measured against the full corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordStats {
    /// The entropy, in bits, of the feedback this word produces.
    pub entropy: f64,
    /// The entropy divided by [`MAX_ENTROPY`].
    pub entropy_scaled: f64,
    /// The average number of green letters, divided by the word length.
    pub avg_green_scaled: f64,
    /// The average number of yellow letters, divided by the word length.
    pub avg_yellow_scaled: f64,
    /// The average number of grey letters, divided by the word length.
    pub avg_grey_scaled: f64,
}

impl WordStats {
    /// The weighted heuristic score for this word.
    pub fn score(&self) -> f64 {
        weighted_score(
            self.entropy_scaled,
            self.avg_green_scaled,
            self.avg_yellow_scaled,
            self.avg_grey_scaled,
        )
    }
}

const STATS_HEADER: &str = "word,entropy,entropy_scaled,avg_green_scaled,avg_yellow_scaled,avg_grey_scaled";

/// A lookup table from word to its precomputed [`WordStats`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordStatsTable {
    stats: HashMap<Arc<str>, WordStats>,
}

impl WordStatsTable {
    /// Constructs a table from the given word and stats pairs.
    pub fn from_iterator<S, I>(entries: I) -> WordStatsTable
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, WordStats)>,
    {
        WordStatsTable {
            stats: entries
                .into_iter()
                .map(|(word, stats)| (Arc::from(word.as_ref().to_lowercase().as_str()), stats))
                .collect(),
        }
    }

    /// Computes the stats for every given word, measured against all the given words. **Be
    /// careful, this is expensive to compute!**
    ///
    /// The cost scales in approximately *O*(*n*<sup>2</sup>), where *n* is the number of words,
    /// so the result is meant to be saved and reloaded with [`WordStatsTable::from_reader`].
    pub fn compute(all_words: &[Arc<str>]) -> WordStatsTable {
        log::info!("computing word stats for {} words", all_words.len());
        let stats = all_words
            .par_iter()
            .map(|word| {
                (
                    Arc::clone(word),
                    compute_word_stats(word, all_words),
                )
            })
            .collect();
        WordStatsTable { stats }
    }

    /// Reads a table from comma-separated lines of
    /// `word,entropy,entropy_scaled,avg_green_scaled,avg_yellow_scaled,avg_grey_scaled`. A
    /// header line and blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<WordStatsTable, WordleError> {
        let mut stats = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with("word,") {
                continue;
            }
            let (word, word_stats) = parse_stats_line(line)?;
            stats.insert(word, word_stats);
        }
        log::info!("loaded word stats for {} words", stats.len());
        Ok(WordStatsTable { stats })
    }

    /// Writes the table in the format read by [`WordStatsTable::from_reader`], sorted by word.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), WordleError> {
        writeln!(writer, "{}", STATS_HEADER)?;
        for word in self.sorted_words() {
            let stats = &self.stats[word];
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                word,
                stats.entropy,
                stats.entropy_scaled,
                stats.avg_green_scaled,
                stats.avg_yellow_scaled,
                stats.avg_grey_scaled
            )?;
        }
        Ok(())
    }

    /// Looks up the stats for the given word.
    ///
    /// The table is expected to cover every word in use, so a miss indicates a mismatch between
    /// the corpus and the table.
    pub fn lookup(&self, word: &str) -> Result<&WordStats, WordleError> {
        self.stats
            .get(word)
            .ok_or_else(|| WordleError::NotFound(word.to_string()))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Returns `true` iff every word in the bank has an entry in this table.
    pub fn covers(&self, bank: &[Arc<str>]) -> bool {
        bank.iter().all(|word| self.stats.contains_key(word))
    }

    /// Returns the word with the highest weighted score. Ties go to the alphabetically first word.
    pub fn best_word(&self) -> Option<&Arc<str>> {
        let mut best: Option<(&Arc<str>, f64)> = None;
        for word in self.sorted_words() {
            let score = self.stats[word].score();
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((word, score));
            }
        }
        best.map(|(word, _)| word)
    }

    fn sorted_words(&self) -> Vec<&Arc<str>> {
        let mut words: Vec<&Arc<str>> = self.stats.keys().collect();
        words.sort_unstable();
        words
    }
}

/// Each word gets exactly one legacy feedback pattern for `word`, so counting the pattern each word
/// produces gives the same buckets as checking every pattern against every word.
fn compute_word_stats(word: &str, all_words: &[Arc<str>]) -> WordStats {
    let mut counts: HashMap<Feedback, usize> = HashMap::new();
    for other in all_words {
        if let Ok(feedback) = get_result_for_guess(other, word) {
            *counts.entry(feedback).or_insert(0) += 1;
        }
    }
    let entropy = entropy_from_counts(counts.into_values(), all_words.len());
    let averages = compute_color_averages(word, all_words);
    let word_length = word.len() as f64;
    WordStats {
        entropy,
        entropy_scaled: entropy / MAX_ENTROPY,
        avg_green_scaled: averages.green / word_length,
        avg_yellow_scaled: averages.yellow / word_length,
        avg_grey_scaled: averages.grey / word_length,
    }
}

fn parse_stats_line(line: &str) -> Result<(Arc<str>, WordStats), WordleError> {
    let malformed = || WordleError::MalformedStats(line.to_string());
    let mut fields = line.split(',').map(str::trim);
    let word = fields.next().filter(|word| !word.is_empty()).ok_or_else(malformed)?;
    let values = fields
        .map(|field| field.parse::<f64>().map_err(|_| malformed()))
        .collect::<Result<Vec<f64>, WordleError>>()?;
    if values.len() != 5 {
        return Err(malformed());
    }
    Ok((
        Arc::from(word.to_lowercase().as_str()),
        WordStats {
            entropy: values[0],
            entropy_scaled: values[1],
            avg_green_scaled: values[2],
            avg_yellow_scaled: values[3],
            avg_grey_scaled: values[4],
        },
    ))
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn word_bank_skips_duplicates() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(vec!["worda", "WORDA", "wordb"])?;

        assert_eq!(bank.len(), 2);
        Ok(())
    }

    #[test]
    fn word_bank_rejects_unsupported_characters() {
        assert!(matches!(
            WordBank::from_iterator(vec!["wörda"]),
            Err(WordleError::UnsupportedCharacter('ö'))
        ));
    }

    #[test]
    fn corpus_random_secret_comes_from_list() -> Result<(), WordleError> {
        let corpus = Corpus::new(
            WordBank::from_iterator(vec!["apple", "angle", "amble"])?,
            WordBank::from_iterator(vec!["angle"])?,
        )?;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            assert_eq!(
                corpus
                    .random_secret_with_rng(WordList::Frequent, &mut rng)?
                    .as_ref(),
                "angle"
            );
        }
        Ok(())
    }

    #[test]
    fn corpus_rejects_mismatched_frequent_words() -> Result<(), WordleError> {
        let result = Corpus::new(
            WordBank::from_iterator(vec!["apple"])?,
            WordBank::from_iterator(vec!["pear"])?,
        );

        assert!(matches!(result, Err(WordleError::WordLength(5))));
        Ok(())
    }

    #[test]
    fn stats_table_reads_and_writes_csv() -> Result<(), WordleError> {
        let cursor = Cursor::new(String::from(
            "word,entropy,entropy_scaled,avg_green_scaled,avg_yellow_scaled,avg_grey_scaled\n\
             cares,5.6,0.8,0.1,0.2,0.7\n\
             \n\
             about,4.2,0.6,0.05,0.15,0.8\n",
        ));

        let table = WordStatsTable::from_reader(cursor)?;

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("cares")?.entropy_scaled, 0.8);
        let mut written = Vec::new();
        table.to_writer(&mut written)?;
        let reread = WordStatsTable::from_reader(Cursor::new(written))?;
        assert_eq!(reread, table);
        Ok(())
    }

    #[test]
    fn stats_table_rejects_short_lines() {
        let cursor = Cursor::new(String::from("cares,5.6,0.8\n"));

        assert!(matches!(
            WordStatsTable::from_reader(cursor),
            Err(WordleError::MalformedStats(_))
        ));
    }

    #[test]
    fn stats_table_lookup_miss_is_not_found() {
        let table = WordStatsTable::default();

        assert!(matches!(
            table.lookup("cares"),
            Err(WordleError::NotFound(word)) if word == "cares"
        ));
    }

    #[test]
    fn compute_stats_for_disjoint_words() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(vec!["abc", "def"])?;

        let table = WordStatsTable::compute(&bank);

        let stats = table.lookup("abc")?;
        // Each word lands in its own feedback pattern: one bit of entropy.
        assert!((stats.entropy - 1.0).abs() < 1e-9);
        assert!((stats.entropy_scaled - 1.0 / MAX_ENTROPY).abs() < 1e-9);
        // Against itself: 3 greens. Against "def": 3 greys.
        assert!((stats.avg_green_scaled - 0.5).abs() < 1e-9);
        assert_eq!(stats.avg_yellow_scaled, 0.0);
        assert!((stats.avg_grey_scaled - 0.5).abs() < 1e-9);
        assert!(table.covers(&bank));
        Ok(())
    }

    #[test]
    fn best_word_has_max_score() {
        let low = WordStats {
            entropy: 1.0,
            entropy_scaled: 0.1,
            avg_green_scaled: 0.1,
            avg_yellow_scaled: 0.1,
            avg_grey_scaled: 0.1,
        };
        let high = WordStats {
            entropy_scaled: 0.9,
            ..low
        };
        let table = WordStatsTable::from_iterator(vec![("about", low), ("cares", high)]);

        assert_eq!(table.best_word().map(|word| word.as_ref()), Some("cares"));
    }
}
