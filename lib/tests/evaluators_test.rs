#[macro_use]
extern crate assert_matches;

use rs_wordle_search::evaluators::*;
use rs_wordle_search::*;

use std::sync::Arc;

fn words(words: &[&str]) -> Vec<Arc<str>> {
    words.iter().map(|word| Arc::from(*word)).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but was {}",
        expected,
        actual
    );
}

#[test]
fn null_evaluator_is_zero() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::default(), &words(&["apple"])).apply_guess("apple")?;

    assert_eq!(NullEvaluator.evaluate(&state)?, 0.0);
    Ok(())
}

#[test]
fn local_evaluator_scores_against_candidates() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::with_word_length(3), &words(&["abc", "def"]))
        .apply_guess("abc")?;

    // "abc" and "def" each land in their own pattern, so one bit.
    assert_close(compute_entropy(&state), 1.0);
    // Against "abc": 3 green. Against "def": 3 grey.
    assert_eq!(
        compute_color_averages(state.word(), state.candidate_words()),
        ColorAverages {
            green: 1.5,
            yellow: 0.0,
            grey: 1.5
        }
    );
    assert_close(
        LocalEvaluator.evaluate(&state)?,
        0.6 * (1.0 / 7.0) + 0.2 * 0.5 + 0.05 * 0.5,
    );
    Ok(())
}

#[test]
fn local_evaluator_without_candidates() -> Result<(), WordleError> {
    let state = GameState::new(GameConfig::with_word_length(3), &words(&["abc"]))
        .apply_guess("abc")?
        .apply_feedback(&Feedback::uniform(LetterResult::NotPresent, 3))?;

    assert!(state.candidate_words().is_empty());
    assert_eq!(LocalEvaluator.evaluate(&state)?, 0.0);
    Ok(())
}

#[test]
fn const_evaluator_looks_up_word() -> Result<(), WordleError> {
    let stats = WordStats {
        entropy: 3.5,
        entropy_scaled: 0.5,
        avg_green_scaled: 0.2,
        avg_yellow_scaled: 0.4,
        avg_grey_scaled: 0.4,
    };
    let table = Arc::new(WordStatsTable::from_iterator(vec![("apple", stats)]));
    let evaluator = ConstEvaluator::new(table);
    let state = GameState::new(GameConfig::default(), &words(&["apple", "angle"]));

    assert_close(
        evaluator.evaluate(&state.apply_guess("apple")?)?,
        0.6 * 0.5 + 0.2 * 0.2 + 0.15 * 0.4 + 0.05 * 0.4,
    );
    assert_matches!(
        evaluator.evaluate(&state.apply_guess("angle")?),
        Err(WordleError::NotFound(word)) if word == "angle"
    );
    Ok(())
}

#[test]
fn const_evaluator_matches_computed_stats() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["apple", "angle", "amble", "pearl"])?;
    let table = WordStatsTable::compute(&bank);
    let expected = table.lookup("angle")?.score();
    let evaluator = ConstEvaluator::new(Arc::new(table));

    let state = GameState::new(GameConfig::default(), &bank).apply_guess("angle")?;

    assert_close(evaluator.evaluate(&state)?, expected);
    Ok(())
}
