//! Plays and solves Wordle games with adversarial search.
//!
//! A game is modelled as two alternating players: the guesser picks a word from the remaining
//! candidates, and the indicator picks the feedback for it. [`GameState`] tracks the candidates
//! and what is known about the secret, and the [`agents`] search its game tree to choose guesses.
//!
//! ```
//! use std::sync::Arc;
//! use rs_wordle_search::*;
//!
//! let bank = WordBank::from_iterator(&["apple", "angle", "amble"]).unwrap();
//! let stats = Arc::new(WordStatsTable::compute(&bank));
//! let corpus = Corpus::from_bank(bank).unwrap();
//! let config = AgentConfig {
//!     strategy: Strategy::AlphaBeta,
//!     evaluator: EvaluatorKind::Local,
//!     ..AgentConfig::default()
//! };
//! let mut agent = create_agent(&config, stats);
//!
//! let result = play_game_with_agent("apple", &corpus, agent.as_mut(), &MatchConfig::default());
//!
//! assert!(matches!(result, Ok(GameResult::Success(_))));
//! ```

pub mod agents;
mod data;
pub mod evaluators;
mod game;
mod results;
mod state;

pub use agents::create_agent;
pub use agents::Agent;
pub use agents::AgentConfig;
pub use agents::Strategy;
pub use data::*;
pub use evaluators::EvaluatorKind;
pub use evaluators::StateEvaluator;
pub use game::*;
pub use results::*;
pub use state::*;
