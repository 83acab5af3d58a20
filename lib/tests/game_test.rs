#[macro_use]
extern crate assert_matches;

use rs_wordle_search::*;

use std::sync::Arc;

const WORDS: [&str; 6] = ["apple", "angle", "amble", "ample", "maple", "cares"];

fn create_corpus(words: &[&str]) -> Corpus {
    Corpus::from_bank(WordBank::from_iterator(words).unwrap()).unwrap()
}

fn guesses(result: &GameResult) -> Vec<&str> {
    match result {
        GameResult::Success(guesses) | GameResult::Failure(guesses) => {
            guesses.iter().map(|guess| guess.as_ref()).collect()
        }
        GameResult::UnknownWord => Vec::new(),
    }
}

#[test]
fn submit_guess_scores_against_secret() {
    let corpus = create_corpus(&WORDS);
    let mut game = Game::start(&corpus, GameConfig::default(), Some("apple")).unwrap();

    assert_eq!(
        game.submit_guess("angle"),
        GuessOutcome::Accepted {
            feedback: "g..gg".parse().unwrap(),
            won: false
        }
    );
    assert!(!game.is_over());
    assert_eq!(game.secret(), None);
    assert_eq!(game.num_guesses(), 1);
}

#[test]
fn invalid_guesses_leave_game_unchanged() {
    let corpus = create_corpus(&WORDS);
    let mut game = Game::start(&corpus, GameConfig::default(), Some("apple")).unwrap();

    assert_eq!(game.submit_guess("appl"), GuessOutcome::RejectedInvalidLength);
    assert_eq!(
        game.submit_guess("zebra"),
        GuessOutcome::RejectedNotInDictionary
    );

    assert_eq!(game.num_guesses(), 0);
    assert_eq!(game.remaining_guesses(), 6);
}

#[test]
fn winning_ends_the_game() {
    let corpus = create_corpus(&WORDS);
    let mut game = Game::start(&corpus, GameConfig::default(), Some("maple")).unwrap();

    assert_matches!(
        game.submit_guess("Maple"),
        GuessOutcome::Accepted { won: true, .. }
    );
    assert!(game.is_won());
    assert_eq!(game.submit_guess("apple"), GuessOutcome::GameOverExhausted);
    assert_eq!(game.guesses(), &[Arc::<str>::from("maple")]);
}

#[test]
fn play_game_unknown_word() -> Result<(), WordleError> {
    let corpus = create_corpus(&WORDS);
    let mut agent = create_agent(&AgentConfig::default(), Arc::new(WordStatsTable::default()));

    let result = play_game_with_agent("zebra", &corpus, agent.as_mut(), &MatchConfig::default())?;

    assert_eq!(result, GameResult::UnknownWord);
    Ok(())
}

#[test]
fn play_game_with_opening_word() -> Result<(), WordleError> {
    let corpus = create_corpus(&WORDS);
    let stats = Arc::new(WordStatsTable::compute(corpus.all_words()));
    let config = MatchConfig {
        opening_word: default_opening_word(&corpus, &stats),
        ..MatchConfig::default()
    };
    let mut agent = create_agent(&AgentConfig::default(), stats);

    let result = play_game_with_agent("cares", &corpus, agent.as_mut(), &config)?;

    assert_eq!(guesses(&result), vec!["cares"]);
    assert_matches!(result, GameResult::Success(_));
    Ok(())
}

#[test]
fn every_agent_solves_every_word() -> Result<(), WordleError> {
    let corpus = create_corpus(&WORDS);
    let stats = Arc::new(WordStatsTable::compute(corpus.all_words()));
    for strategy in [
        Strategy::DecisionTree,
        Strategy::Minimax,
        Strategy::AlphaBeta,
        Strategy::Expectimax,
    ] {
        for evaluator in [EvaluatorKind::Null, EvaluatorKind::Local, EvaluatorKind::Const] {
            let config = AgentConfig {
                strategy,
                evaluator,
                ..AgentConfig::default()
            };
            let agent = create_agent(&config, Arc::clone(&stats));
            for secret in WORDS {
                let result = play_game_with_agent(
                    secret,
                    &corpus,
                    agent.clone().as_mut(),
                    &MatchConfig::default(),
                )?;

                assert_matches!(result, GameResult::Success(_), "{} {}", strategy, evaluator);
                assert_eq!(guesses(&result).last(), Some(&secret));
            }
        }
    }
    Ok(())
}

#[test]
fn running_out_of_guesses_fails() -> Result<(), WordleError> {
    let corpus = create_corpus(&WORDS);
    let stats = Arc::new(WordStatsTable::compute(corpus.all_words()));
    let config = MatchConfig {
        game: GameConfig {
            max_guesses: 1,
            ..GameConfig::default()
        },
        opening_word: Some(Arc::from("cares")),
        ..MatchConfig::default()
    };
    let mut agent = create_agent(&AgentConfig::default(), stats);

    let result = play_game_with_agent("apple", &corpus, agent.as_mut(), &config)?;

    assert_eq!(result, GameResult::Failure(vec![Arc::from("cares")]));
    Ok(())
}

#[test]
fn opening_word_outside_dictionary_is_an_error() {
    let corpus = create_corpus(&WORDS);
    let config = MatchConfig {
        opening_word: Some(Arc::from("zebra")),
        ..MatchConfig::default()
    };
    let mut agent = create_agent(&AgentConfig::default(), Arc::new(WordStatsTable::default()));

    assert_matches!(
        play_game_with_agent("apple", &corpus, agent.as_mut(), &config),
        Err(WordleError::UnknownWord(word)) if word == "zebra"
    );
}

#[test]
fn exact_scoring_game() -> Result<(), WordleError> {
    let corpus = create_corpus(&["abcde", "bacde", "aaxyz"]);
    let mut game = Game::start(
        &corpus,
        GameConfig {
            scoring_mode: ScoringMode::Exact,
            ..GameConfig::default()
        },
        Some("abcde"),
    )?;

    assert_eq!(
        game.submit_guess("aaxyz"),
        GuessOutcome::Accepted {
            feedback: "g....".parse::<Feedback>()?,
            won: false
        }
    );
    Ok(())
}
