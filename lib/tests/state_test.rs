#[macro_use]
extern crate assert_matches;

use rs_wordle_search::*;

use std::sync::Arc;

fn words(words: &[&str]) -> Vec<Arc<str>> {
    words.iter().map(|word| Arc::from(*word)).collect()
}

fn candidates(state: &GameState) -> Vec<&str> {
    state
        .candidate_words()
        .iter()
        .map(|word| word.as_ref())
        .collect()
}

const CORPUS: [&str; 10] = [
    "apple", "angle", "amble", "ample", "eagle", "ladle", "table", "cable", "maple", "pearl",
];

#[test]
fn apply_feedback_filters_candidates() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::default(), &words(&["apple", "angle", "amble"]));
    let feedback = get_result_for_guess("apple", "angle")?;

    let next = state.apply_guess("angle")?.apply_feedback(&feedback)?;

    assert_eq!(feedback.to_string(), "g..gg");
    assert_eq!(candidates(&next), vec!["apple", "amble"]);
    assert_eq!(next.feedback(), Some(&feedback));
    assert_eq!(next.word(), "angle");
    Ok(())
}

#[test]
fn apply_feedback_never_grows_and_keeps_secret() -> Result<(), WordleError> {
    let all_words = words(&CORPUS);
    for secret in CORPUS {
        for guess in CORPUS.iter().filter(|guess| **guess != secret) {
            let state = GameState::new(GameConfig::default(), &all_words);
            let guessed = state.apply_guess(guess)?;

            let next = guessed.apply_feedback(&get_result_for_guess(secret, guess)?)?;

            assert!(next.candidate_words().len() <= guessed.candidate_words().len());
            assert!(candidates(&next).contains(&secret));
            assert!(!candidates(&next).contains(guess));
        }
    }
    Ok(())
}

#[test]
fn apply_feedback_twice_changes_nothing() -> Result<(), WordleError> {
    let feedback = get_result_for_guess("maple", "table")?;
    let once = GameState::new(GameConfig::default(), &words(&CORPUS))
        .apply_guess("table")?
        .apply_feedback(&feedback)?;

    let twice = once.apply_feedback(&feedback)?;

    assert_eq!(twice, once);
    Ok(())
}

#[test]
fn contradictory_feedback_leaves_no_candidates() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::default(), &words(&["apple", "angle", "amble"]))
        .apply_guess("apple")?;

    let next = state.apply_feedback(&"ggggy".parse::<Feedback>()?)?;

    assert!(next.candidate_words().is_empty());
    assert!(next.legal_guesses().is_empty());
    assert!(next.legal_moves(Player::Guesser).is_empty());
    Ok(())
}

#[test]
fn guessed_words_are_never_candidates() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::default(), &words(&["apple", "angle", "amble"]))
        .apply_guess("apple")?;

    // Only "apple" itself is consistent, and it has already been guessed.
    let next = state.apply_feedback(&get_result_for_guess("apple", "apple")?)?;

    assert!(candidates(&next).is_empty());
    assert_eq!(next.guessed_words().len(), 1);
    Ok(())
}

#[test]
fn unconstrained_state_has_every_pattern() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::default(), &words(&CORPUS)).apply_guess("pearl")?;

    assert!(state.is_unconstrained());
    assert_eq!(state.legal_feedback_patterns().len(), 243);
    assert_eq!(
        GameState::new(GameConfig::with_word_length(3), &words(&["abc"]))
            .apply_guess("abc")?
            .legal_feedback_patterns()
            .len(),
        27
    );
    Ok(())
}

#[test]
fn legal_feedback_patterns_are_pruned_by_known_letters() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::default(), &words(&["bafgh", "bapqm"]))
        .apply_guess("abcde")?
        .apply_feedback(&"yy...".parse::<Feedback>()?)?;

    // "a" and "b" are yellow, so only allow green or yellow.
    assert_eq!(state.legal_feedback_patterns().len(), 2 * 2 * 3 * 3 * 3);
    Ok(())
}

#[test]
fn generate_successor_dispatches_on_move() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::default(), &words(&["apple", "angle", "amble"]));
    let feedback: Feedback = "g..gg".parse()?;

    let guessed = state.generate_successor(&Move::Guess(Arc::from("angle")))?;
    let indicated = guessed.generate_successor(&Move::Indicate(feedback.clone()))?;

    assert_eq!(guessed, state.apply_guess("angle")?);
    assert_eq!(indicated, guessed.apply_feedback(&feedback)?);
    assert_eq!(indicated.num_turns(), 2);
    assert_matches!(
        state.generate_successor(&Move::Guess(Arc::from("ape"))),
        Err(WordleError::WordLength(5))
    );
    Ok(())
}

#[test]
fn exact_scoring_mode_filters_by_rescoring() -> Result<(), WordleError> {
    let config = GameConfig {
        scoring_mode: ScoringMode::Exact,
        ..GameConfig::default()
    };
    let state = GameState::new(config, &words(&["abcde", "bacde", "aaxyz"])).apply_guess("aaxyz")?;

    let next = state.apply_feedback(&get_exact_result_for_guess("abcde", "aaxyz")?)?;

    // Exact scoring gives "g....", which only "abcde" reproduces.
    assert_eq!(candidates(&next), vec!["abcde"]);
    Ok(())
}
