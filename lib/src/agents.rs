use crate::data::WordStatsTable;
use crate::evaluators::*;
use crate::results::WordleError;
use crate::state::GameState;
use crate::state::Player;
use dyn_clone::DynClone;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// When a state has more legal feedback patterns than this, agents score leaves with the
/// [`ConstEvaluator`] regardless of the configured evaluator.
pub const DEFAULT_EVAL_THRESHOLD: usize = 100;

/// Chooses the next word to guess.
///
/// Agents are cheap to clone, so a configured agent can be cloned for each new game.
pub trait Agent: DynClone {
    /// Chooses the next guess for the given state, or returns `None` if there are no words left
    /// to guess.
    ///
    /// Fails with [`WordleError::NotFound`] if a word needed by the evaluator is missing from the
    /// word statistics table.
    fn choose_guess(&mut self, state: &GameState) -> Result<Option<Arc<str>>, WordleError>;

    /// The number of leaf evaluations performed by the most recent call to
    /// [`Agent::choose_guess`].
    fn num_evaluations(&self) -> usize;
}

dyn_clone::clone_trait_object!(Agent);

/// Names one of the available search strategies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// [`DecisionTreeAgent`]
    #[default]
    DecisionTree,
    /// [`MinimaxAgent`]
    Minimax,
    /// [`AlphaBetaAgent`]
    AlphaBeta,
    /// [`ExpectimaxAgent`]
    Expectimax,
}

impl FromStr for Strategy {
    type Err = WordleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "decisiontree" | "tree" | "greedy" => Ok(Strategy::DecisionTree),
            "minimax" | "minmax" => Ok(Strategy::Minimax),
            "alphabeta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(WordleError::UnknownOption(name.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::DecisionTree => "DecisionTree",
            Strategy::Minimax => "Minimax",
            Strategy::AlphaBeta => "AlphaBeta",
            Strategy::Expectimax => "Expectimax",
        })
    }
}

/// Describes an agent to build with [`create_agent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    pub strategy: Strategy,
    /// The number of guess turns to look ahead. A depth of `d` searches `2d - 1` plies. Values
    /// below 1 are treated as 1, and the decision tree agent ignores it.
    pub depth: u32,
    pub evaluator: EvaluatorKind,
    /// See [`DEFAULT_EVAL_THRESHOLD`].
    pub eval_threshold: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            strategy: Strategy::DecisionTree,
            depth: 1,
            evaluator: EvaluatorKind::Null,
            eval_threshold: DEFAULT_EVAL_THRESHOLD,
        }
    }
}

/// Builds the agent described by the config.
///
/// ```
/// use std::sync::Arc;
/// use rs_wordle_search::*;
///
/// let bank = WordBank::from_iterator(&["apple", "angle", "amble"]).unwrap();
/// let stats = Arc::new(WordStatsTable::compute(&bank));
/// let config = AgentConfig {
///     strategy: Strategy::Minimax,
///     evaluator: EvaluatorKind::Const,
///     ..AgentConfig::default()
/// };
/// let mut agent = create_agent(&config, stats);
/// let state = GameState::new(GameConfig::default(), &bank);
///
/// assert!(agent.choose_guess(&state).unwrap().is_some());
/// ```
pub fn create_agent(config: &AgentConfig, stats: Arc<WordStatsTable>) -> Box<dyn Agent> {
    match config.strategy {
        Strategy::DecisionTree => Box::new(
            DecisionTreeAgent::new(config.evaluator, stats)
                .with_eval_threshold(config.eval_threshold),
        ),
        Strategy::Minimax => Box::new(
            MinimaxAgent::new(config.depth, config.evaluator, stats)
                .with_eval_threshold(config.eval_threshold),
        ),
        Strategy::AlphaBeta => Box::new(
            AlphaBetaAgent::new(config.depth, config.evaluator, stats)
                .with_eval_threshold(config.eval_threshold),
        ),
        Strategy::Expectimax => Box::new(
            ExpectimaxAgent::new(config.depth, config.evaluator, stats)
                .with_eval_threshold(config.eval_threshold),
        ),
    }
}

/// Chooses the evaluator for each decision.
#[derive(Debug, Clone)]
struct EvaluatorSelector {
    configured: EvaluatorKind,
    threshold: usize,
    local: LocalEvaluator,
    constant: ConstEvaluator,
}

impl EvaluatorSelector {
    fn new(configured: EvaluatorKind, depth: u32, stats: Arc<WordStatsTable>) -> Self {
        // The local evaluator only measures the state's own candidates, so it says nothing
        // useful about states more than one ply away.
        let configured = if depth > 1 {
            EvaluatorKind::Const
        } else {
            configured
        };
        EvaluatorSelector {
            configured,
            threshold: DEFAULT_EVAL_THRESHOLD,
            local: LocalEvaluator,
            constant: ConstEvaluator::new(stats),
        }
    }

    fn select(&self, state: &GameState) -> EvaluatorKind {
        let num_patterns = state.legal_feedback_patterns().len();
        if num_patterns > self.threshold && self.configured != EvaluatorKind::Const {
            log::debug!(
                "{} feedback patterns exceed the threshold of {}, using the const evaluator instead of {}",
                num_patterns,
                self.threshold,
                self.configured
            );
            return EvaluatorKind::Const;
        }
        self.configured
    }

    fn evaluator(&self, kind: EvaluatorKind) -> &dyn StateEvaluator {
        match kind {
            EvaluatorKind::Null => &NullEvaluator,
            EvaluatorKind::Local => &self.local,
            EvaluatorKind::Const => &self.constant,
        }
    }
}

/// State shared by a single decision's tree search.
struct TreeSearch<'a> {
    evaluator: &'a dyn StateEvaluator,
    num_evaluations: usize,
}

impl<'a> TreeSearch<'a> {
    fn new(evaluator: &'a dyn StateEvaluator) -> Self {
        TreeSearch {
            evaluator,
            num_evaluations: 0,
        }
    }

    fn evaluate(&mut self, state: &GameState) -> Result<f64, WordleError> {
        self.num_evaluations += 1;
        self.evaluator.evaluate(state)
    }

    fn minimax(&mut self, state: &GameState, plies: u32, player: Player) -> Result<f64, WordleError> {
        if plies == 0 {
            return self.evaluate(state);
        }
        let moves = state.legal_moves(player);
        if moves.is_empty() {
            return self.evaluate(state);
        }
        let mut best = match player {
            Player::Guesser => f64::NEG_INFINITY,
            Player::Indicator => f64::INFINITY,
        };
        for next_move in &moves {
            let successor = state.generate_successor(next_move)?;
            let value = self.minimax(&successor, plies - 1, player.other())?;
            best = match player {
                Player::Guesser => best.max(value),
                Player::Indicator => best.min(value),
            };
        }
        Ok(best)
    }

    fn alpha_beta(
        &mut self,
        state: &GameState,
        plies: u32,
        player: Player,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64, WordleError> {
        if plies == 0 {
            return self.evaluate(state);
        }
        let moves = state.legal_moves(player);
        if moves.is_empty() {
            return self.evaluate(state);
        }
        match player {
            Player::Guesser => {
                let mut best = f64::NEG_INFINITY;
                for next_move in &moves {
                    let successor = state.generate_successor(next_move)?;
                    best = best.max(self.alpha_beta(
                        &successor,
                        plies - 1,
                        Player::Indicator,
                        alpha,
                        beta,
                    )?);
                    alpha = alpha.max(best);
                    if beta <= alpha {
                        break;
                    }
                }
                Ok(best)
            }
            Player::Indicator => {
                let mut best = f64::INFINITY;
                for next_move in &moves {
                    let successor = state.generate_successor(next_move)?;
                    best = best.min(self.alpha_beta(
                        &successor,
                        plies - 1,
                        Player::Guesser,
                        alpha,
                        beta,
                    )?);
                    beta = beta.min(best);
                    if beta <= alpha {
                        break;
                    }
                }
                Ok(best)
            }
        }
    }

    fn expectimax(
        &mut self,
        state: &GameState,
        plies: u32,
        player: Player,
    ) -> Result<f64, WordleError> {
        if plies == 0 {
            return self.evaluate(state);
        }
        let moves = state.legal_moves(player);
        if moves.is_empty() {
            return self.evaluate(state);
        }
        match player {
            Player::Guesser => {
                let mut best = f64::NEG_INFINITY;
                for next_move in &moves {
                    let successor = state.generate_successor(next_move)?;
                    best = best.max(self.expectimax(&successor, plies - 1, Player::Indicator)?);
                }
                Ok(best)
            }
            Player::Indicator => {
                let mut sum = 0.0;
                for next_move in &moves {
                    let successor = state.generate_successor(next_move)?;
                    sum += self.expectimax(&successor, plies - 1, Player::Guesser)?;
                }
                Ok(sum / moves.len() as f64)
            }
        }
    }
}

/// The parts of a decision shared by every agent: evaluator selection, the guess ply at the root,
/// and picking the best guess.
#[derive(Debug, Clone)]
struct SearchCore {
    name: &'static str,
    selector: EvaluatorSelector,
    plies: u32,
    num_evaluations: usize,
}

impl SearchCore {
    fn new(
        name: &'static str,
        depth: u32,
        evaluator: EvaluatorKind,
        stats: Arc<WordStatsTable>,
    ) -> Self {
        SearchCore {
            name,
            selector: EvaluatorSelector::new(evaluator, depth, stats),
            plies: depth.max(1).saturating_mul(2) - 1,
            num_evaluations: 0,
        }
    }

    /// Scores the successor of each legal guess with `score_successor`, and returns the first
    /// guess with the highest score.
    ///
    /// `score_successor` is given the search, the successor, the plies left below it, and the best
    /// score found so far among its siblings.
    fn decide<F>(
        &mut self,
        state: &GameState,
        mut score_successor: F,
    ) -> Result<Option<Arc<str>>, WordleError>
    where
        F: FnMut(&mut TreeSearch<'_>, &GameState, u32, f64) -> Result<f64, WordleError>,
    {
        let kind = self.selector.select(state);
        let mut search = TreeSearch::new(self.selector.evaluator(kind));
        let mut best: Option<(&Arc<str>, f64)> = None;
        for word in state.legal_guesses() {
            let successor = state.apply_guess(word)?;
            let best_score = best.map_or(f64::NEG_INFINITY, |(_, score)| score);
            let score = score_successor(&mut search, &successor, self.plies - 1, best_score)?;
            if best.is_none() || score > best_score {
                best = Some((word, score));
            }
        }
        self.num_evaluations = search.num_evaluations;
        match best {
            Some((word, score)) => {
                log::debug!(
                    "{} chose '{}' (score {:.5}) from {} candidates with the {} evaluator after {} evaluations",
                    self.name,
                    word,
                    score,
                    state.legal_guesses().len(),
                    kind,
                    self.num_evaluations
                );
                Ok(Some(Arc::clone(word)))
            }
            None => {
                log::debug!("{} has no candidates left to guess", self.name);
                Ok(None)
            }
        }
    }
}

/// Scores each candidate word directly with the evaluator and guesses the best one. With the null
/// evaluator, guesses a candidate uniformly at random instead.
#[derive(Clone)]
pub struct DecisionTreeAgent {
    core: SearchCore,
    rng: StdRng,
}

impl DecisionTreeAgent {
    pub fn new(evaluator: EvaluatorKind, stats: Arc<WordStatsTable>) -> DecisionTreeAgent {
        DecisionTreeAgent::with_rng(evaluator, stats, StdRng::from_entropy())
    }

    /// Constructs the agent with the given source of randomness, for reproducible random guesses.
    pub fn with_rng(
        evaluator: EvaluatorKind,
        stats: Arc<WordStatsTable>,
        rng: StdRng,
    ) -> DecisionTreeAgent {
        DecisionTreeAgent {
            core: SearchCore::new("DecisionTree", 1, evaluator, stats),
            rng,
        }
    }

    /// Overrides [`DEFAULT_EVAL_THRESHOLD`].
    pub fn with_eval_threshold(mut self, threshold: usize) -> DecisionTreeAgent {
        self.core.selector.threshold = threshold;
        self
    }
}

impl Agent for DecisionTreeAgent {
    fn choose_guess(&mut self, state: &GameState) -> Result<Option<Arc<str>>, WordleError> {
        if self.core.selector.configured == EvaluatorKind::Null {
            self.core.num_evaluations = 0;
            return Ok(state.legal_guesses().choose(&mut self.rng).map(Arc::clone));
        }
        self.core
            .decide(state, |search, successor, _plies, _best| search.evaluate(successor))
    }

    fn num_evaluations(&self) -> usize {
        self.core.num_evaluations
    }
}

/// Searches the game tree assuming the indicator always gives the worst feedback for the guesser.
#[derive(Clone)]
pub struct MinimaxAgent {
    core: SearchCore,
}

impl MinimaxAgent {
    pub fn new(depth: u32, evaluator: EvaluatorKind, stats: Arc<WordStatsTable>) -> MinimaxAgent {
        MinimaxAgent {
            core: SearchCore::new("Minimax", depth, evaluator, stats),
        }
    }

    /// Overrides [`DEFAULT_EVAL_THRESHOLD`].
    pub fn with_eval_threshold(mut self, threshold: usize) -> MinimaxAgent {
        self.core.selector.threshold = threshold;
        self
    }
}

impl Agent for MinimaxAgent {
    fn choose_guess(&mut self, state: &GameState) -> Result<Option<Arc<str>>, WordleError> {
        self.core.decide(state, |search, successor, plies, _best| {
            search.minimax(successor, plies, Player::Indicator)
        })
    }

    fn num_evaluations(&self) -> usize {
        self.core.num_evaluations
    }
}

/// Finds the same guess as [`MinimaxAgent`], but skips branches that cannot change the result.
///
/// The alpha and beta bounds start fresh for every decision.
#[derive(Clone)]
pub struct AlphaBetaAgent {
    core: SearchCore,
}

impl AlphaBetaAgent {
    pub fn new(depth: u32, evaluator: EvaluatorKind, stats: Arc<WordStatsTable>) -> AlphaBetaAgent {
        AlphaBetaAgent {
            core: SearchCore::new("AlphaBeta", depth, evaluator, stats),
        }
    }

    /// Overrides [`DEFAULT_EVAL_THRESHOLD`].
    pub fn with_eval_threshold(mut self, threshold: usize) -> AlphaBetaAgent {
        self.core.selector.threshold = threshold;
        self
    }
}

impl Agent for AlphaBetaAgent {
    fn choose_guess(&mut self, state: &GameState) -> Result<Option<Arc<str>>, WordleError> {
        self.core.decide(state, |search, successor, plies, best| {
            search.alpha_beta(successor, plies, Player::Indicator, best, f64::INFINITY)
        })
    }

    fn num_evaluations(&self) -> usize {
        self.core.num_evaluations
    }
}

/// Searches the game tree assuming every legal feedback pattern is equally likely.
#[derive(Clone)]
pub struct ExpectimaxAgent {
    core: SearchCore,
}

impl ExpectimaxAgent {
    pub fn new(
        depth: u32,
        evaluator: EvaluatorKind,
        stats: Arc<WordStatsTable>,
    ) -> ExpectimaxAgent {
        ExpectimaxAgent {
            core: SearchCore::new("Expectimax", depth, evaluator, stats),
        }
    }

    /// Overrides [`DEFAULT_EVAL_THRESHOLD`].
    pub fn with_eval_threshold(mut self, threshold: usize) -> ExpectimaxAgent {
        self.core.selector.threshold = threshold;
        self
    }
}

impl Agent for ExpectimaxAgent {
    fn choose_guess(&mut self, state: &GameState) -> Result<Option<Arc<str>>, WordleError> {
        self.core.decide(state, |search, successor, plies, _best| {
            search.expectimax(successor, plies, Player::Indicator)
        })
    }

    fn num_evaluations(&self) -> usize {
        self.core.num_evaluations
    }
}
