use clap::{Parser, Subcommand};
use rs_wordle_search::*;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Plays Wordle with adversarial search agents, or lets you play against the computer.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains every legal word, with one word on each line.
    #[clap(short = 'f', long)]
    words_file: String,

    /// Path to a file of frequent words that secrets are drawn from, one word per line. Defaults
    /// to the words file.
    #[clap(short = 'q', long)]
    frequent_words_file: Option<String>,

    /// Path to the precomputed word statistics, as CSV or as RON if it ends in ".ron". If not
    /// given, the statistics are computed at startup, which is slow for large word lists.
    #[clap(short = 's', long)]
    stats_file: Option<String>,

    /// The search strategy: decision-tree, minimax, alpha-beta or expectimax.
    #[clap(long, default_value = "decision-tree")]
    strategy: Strategy,

    /// The number of guess turns to look ahead.
    #[clap(short, long, default_value_t = 1)]
    depth: u32,

    /// The evaluator for the search leaves: local, const or null.
    #[clap(short, long, default_value = "const")]
    evaluator: EvaluatorKind,

    /// States with more feedback patterns than this are always scored with the const evaluator.
    #[clap(long, default_value_t = agents::DEFAULT_EVAL_THRESHOLD)]
    eval_threshold: usize,

    /// The first word to guess. Defaults to "cares" if it is a legal word, otherwise the word with
    /// the best precomputed score.
    #[clap(long)]
    opening_word: Option<String>,

    /// Score repeated letters as standard Wordle does, instead of marking every repeat yellow.
    #[clap(long)]
    exact: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the agent play a single game against the given word, or a random frequent word.
    Play { word: Option<String> },
    /// Benchmark the agent against every frequent word.
    Benchmark {
        /// Only play against this many words.
        #[clap(short, long)]
        limit: Option<usize>,
    },
    /// Guess a random frequent word yourself.
    Interactive,
    /// Let the agent guess a word you have chosen, entering the feedback for each guess.
    Solve,
    /// Compute the word statistics for the words file, and write them to the given path.
    Precompute { output: String },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let start_time = Instant::now();
    let args = Args::parse();

    let all_words = WordBank::from_reader(io::BufReader::new(File::open(&args.words_file)?))?;
    let frequent_words = match &args.frequent_words_file {
        Some(path) => WordBank::from_reader(io::BufReader::new(File::open(path)?))?,
        None => all_words.clone(),
    };
    let corpus = Corpus::new(all_words, frequent_words)?;

    if let Command::Precompute { output } = &args.command {
        let stats = WordStatsTable::compute(corpus.all_words());
        write_stats(&stats, Path::new(output))?;
        println!("Wrote statistics for {} words to {}.", stats.len(), output);
        return Ok(());
    }

    let stats = Arc::new(match &args.stats_file {
        Some(path) => read_stats(Path::new(path))?,
        None => WordStatsTable::compute(corpus.all_words()),
    });
    if !stats.covers(corpus.all_words()) {
        log::warn!("the word statistics do not cover every word, searches may fail");
    }

    let match_config = MatchConfig {
        game: GameConfig {
            word_length: corpus.word_length(),
            scoring_mode: if args.exact {
                ScoringMode::Exact
            } else {
                ScoringMode::Legacy
            },
            ..GameConfig::default()
        },
        candidates: WordList::Frequent,
        opening_word: match &args.opening_word {
            Some(word) => Some(Arc::from(word.trim().to_lowercase().as_str())),
            None => default_opening_word(&corpus, &stats),
        },
    };
    let agent_config = AgentConfig {
        strategy: args.strategy,
        depth: args.depth,
        evaluator: args.evaluator,
        eval_threshold: args.eval_threshold,
    };
    let agent = create_agent(&agent_config, Arc::clone(&stats));

    match args.command {
        Command::Play { word } => play_single_game(word.as_deref(), &corpus, agent, &match_config)?,
        Command::Benchmark { limit } => run_benchmark(&corpus, agent, &match_config, limit)?,
        Command::Interactive => play_interactive_game(&corpus, &match_config)?,
        Command::Solve => solve_interactive_game(&corpus, agent, &match_config)?,
        Command::Precompute { .. } => {}
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn is_ron(path: &Path) -> bool {
    path.extension().map_or(false, |extension| extension == "ron")
}

fn read_stats(path: &Path) -> Result<WordStatsTable, Box<dyn Error>> {
    if is_ron(path) {
        let stats: WordStatsTable = ron::from_str(&fs::read_to_string(path)?)?;
        log::info!("loaded word stats for {} words", stats.len());
        return Ok(stats);
    }
    Ok(WordStatsTable::from_reader(io::BufReader::new(
        File::open(path)?,
    ))?)
}

fn write_stats(stats: &WordStatsTable, path: &Path) -> Result<(), Box<dyn Error>> {
    if is_ron(path) {
        fs::write(path, ron::to_string(stats)?)?;
        return Ok(());
    }
    stats.to_writer(io::BufWriter::new(File::create(path)?))?;
    Ok(())
}

fn run_benchmark(
    corpus: &Corpus,
    agent: Box<dyn Agent>,
    config: &MatchConfig,
    limit: Option<usize>,
) -> Result<(), WordleError> {
    let secrets = corpus.frequent_words();
    let limit = limit.unwrap_or(secrets.len());
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let mut num_failures = 0;
    for word in secrets.iter().take(limit) {
        let mut game_agent = agent.clone();
        match play_game_with_agent(word, corpus, game_agent.as_mut(), config)? {
            GameResult::Success(guesses) => num_guesses_per_game.push(guesses.len() as u32),
            GameResult::Failure(_) => num_failures += 1,
            GameResult::UnknownWord => log::warn!("skipping unknown word '{}'", word),
        }
    }
    println!(
        "Solved {} of {} words. Results:",
        num_guesses_per_game.len(),
        num_guesses_per_game.len() + num_failures
    );

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds = num_games_per_round.keys().copied().collect::<Vec<u32>>();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!("|{}|{}|", num_round, num_games_per_round[num_round]);
    }
    if num_failures > 0 {
        println!("|failed|{}|", num_failures);
    }
    if num_guesses_per_game.is_empty() {
        return Ok(());
    }

    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of guesses:** {:.2} +/- {:.2}",
        average, std_dev
    );
    Ok(())
}

fn play_single_game(
    word: Option<&str>,
    corpus: &Corpus,
    mut agent: Box<dyn Agent>,
    config: &MatchConfig,
) -> Result<(), WordleError> {
    let secret: Arc<str> = match word {
        Some(word) => Arc::from(word.trim().to_lowercase().as_str()),
        None => corpus.random_secret(WordList::Frequent)?,
    };
    let result = play_game_with_agent(&secret, corpus, agent.as_mut(), config)?;
    match result {
        GameResult::Success(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            print_guesses(&secret, &guesses, config)?;
        }
        GameResult::Failure(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :( The word was {}.",
                guesses.len(),
                secret
            );
            print_guesses(&secret, &guesses, config)?;
        }
        GameResult::UnknownWord => {
            eprintln!("Error: given word not in the word list.");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_guesses(
    secret: &str,
    guesses: &[Arc<str>],
    config: &MatchConfig,
) -> Result<(), WordleError> {
    for guess in guesses.iter() {
        println!(
            "\t{} {}",
            guess,
            config.game.scoring_mode.score(secret, guess)?
        );
    }
    Ok(())
}

fn play_interactive_game(corpus: &Corpus, config: &MatchConfig) -> Result<(), WordleError> {
    let mut game = Game::start(corpus, config.game, None)?;
    println!(
        "I've chosen a {} letter word. You have {} guesses.\n\n\
         After each guess I'll show the correctness of each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location.\n",
        config.game.word_length, config.game.max_guesses
    );

    while !game.is_over() {
        print!("Guess {}: ", game.num_guesses() + 1);
        io::stdout().flush()?;
        let guess = read_line()?;
        match game.submit_guess(&guess) {
            GuessOutcome::Accepted { feedback, won } => {
                println!("         {}", feedback);
                if won {
                    println!("You got it in {} guesses!", game.num_guesses());
                }
            }
            GuessOutcome::RejectedInvalidLength => println!(
                "Please use a {} letter word. Try again.",
                config.game.word_length
            ),
            GuessOutcome::RejectedNotInDictionary => {
                println!("That word isn't in my word list. Try again.")
            }
            GuessOutcome::GameOverExhausted => break,
        }
    }

    if let (false, Some(secret)) = (game.is_won(), game.secret()) {
        println!("Out of guesses. The word was {}.", secret);
    }
    Ok(())
}

fn solve_interactive_game(
    corpus: &Corpus,
    mut agent: Box<dyn Agent>,
    config: &MatchConfig,
) -> Result<(), WordleError> {
    println!("Choose a word from the word-list. Press enter once you've chosen.");
    read_line()?;

    println!(
        "I will now try to guess your word.\n\n\
         For each guess, enter the correctness of each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"g.gy.\"");

    let mut state = GameState::new(config.game, corpus.word_list(config.candidates));
    let mut next_guess = config.opening_word.clone();
    for round in 1..=config.game.max_guesses {
        let guess = match next_guess.take() {
            Some(guess) => guess,
            None => match agent.choose_guess(&state)? {
                Some(guess) => guess,
                None => {
                    println!("I've run out of words. Was the feedback right?");
                    return Ok(());
                }
            },
        };
        println!("I'm guessing: {}. How did I do?", guess);

        let feedback = read_feedback(config.game.word_length)?;
        if feedback.is_solved() {
            println!("I did it! It took me {} guesses.", round);
            return Ok(());
        }

        state = state.apply_guess(&guess)?.apply_feedback(&feedback)?;
    }

    println!("I couldn't guess it :(");

    Ok(())
}

fn read_line() -> io::Result<String> {
    read_line_from(&mut io::stdin().lock())
}

fn read_line_from<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut buffer = String::new();
    if reader.read_line(&mut buffer)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(buffer.trim().to_string())
}

fn read_feedback(word_length: usize) -> Result<Feedback, WordleError> {
    loop {
        let input = read_line()?;
        match input.parse::<Feedback>() {
            Ok(feedback) if feedback.len() == word_length => return Ok(feedback),
            Ok(_) => println!(
                "Input {} didn't match the length of my guess. Try again.",
                input
            ),
            Err(error) => println!("{} Try again.", error),
        }
    }
}
