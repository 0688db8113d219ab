use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use letterboxed::{rank_solutions, read_word_list, BoxConfiguration, CoverageTarget, FingerprintMode, Limits, SolverBuilder, SpellingBee, Strategy, WordOrder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Solve Letter Boxed and Spelling Bee puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find word chains using every letter of a box
    LetterBoxed {
        /// Box letters, edge by edge, e.g. TIAUWLDBYRMO
        #[arg(long)]
        letters: String,
        /// Word list, one word per line
        #[arg(long)]
        words: PathBuf,
        #[arg(long, default_value_t = 3)]
        max_chain: usize,
        #[arg(long, default_value_t = Strategy::BreadthFirst)]
        strategy: Strategy,
        /// Letters per edge
        #[arg(long, default_value_t = 3)]
        edge_len: usize,
        /// Shuffle the word list with this seed before searching
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = FingerprintMode::WordSet)]
        fingerprint: FingerprintMode,
        #[arg(long, default_value_t = CoverageTarget::ValidWords)]
        coverage: CoverageTarget,
        /// Print at most this many solutions
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Stop the session after this many seconds
        #[arg(long)]
        session_secs: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Print the word graph in Graphviz DOT instead of solving
        #[arg(long)]
        dot: bool,
    },
    /// Score the words of a Spelling Bee; the first letter is the center letter
    SpellingBee {
        #[arg(long)]
        letters: String,
        #[arg(long)]
        words: PathBuf,
    },
    /// Generate random boxes until one has a solution
    Random {
        #[arg(long)]
        words: PathBuf,
        #[arg(long, default_value_t = 100)]
        max_iters: usize,
        #[arg(long, default_value_t = 2)]
        max_chain: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::LetterBoxed { letters, words, max_chain, strategy, edge_len, seed, fingerprint, coverage, limit, session_secs, json, dot } => {
            if edge_len == 0 {
                bail!("edges need at least one letter");
            }

            let vocabulary = read_word_list(&words).with_context(|| format!("reading {}", words.display()))?;
            let mut limits = Limits::default();
            if let Some(secs) = session_secs {
                limits.session_time_limit = Duration::from_secs(secs);
            }

            let solver = SolverBuilder::new(BoxConfiguration::from_letters(&letters, edge_len))
                .add_words(vocabulary)
                .max_chain_length(max_chain)
                .fingerprint(fingerprint)
                .coverage(coverage)
                .order(seed.map_or(WordOrder::Vocabulary, |seed| WordOrder::Shuffled { seed }))
                .limits(limits)
                .build()
                .map_err(|reasons| anyhow!("invalid box {letters}: {reasons:?}"))?;

            if dot {
                println!("{}", solver.graph().to_dot());
                return Ok(());
            }

            let report = solver.solve_with(strategy, &mut letterboxed::TracingObserver)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let found = report.solutions.len();
            for chain in rank_solutions(report.solutions).into_iter().take(limit) {
                println!("{chain}");
            }
            println!("{found} solutions, {} iterations, {:.2?}", report.diagnostics.iterations, report.diagnostics.elapsed);
            if report.diagnostics.truncated() {
                println!("search was cut short by a resource ceiling; results may be incomplete");
            }
        }
        Command::SpellingBee { letters, words } => {
            let bee = SpellingBee::new(&letters).ok_or_else(|| anyhow!("no letters given"))?;
            let vocabulary = read_word_list(&words).with_context(|| format!("reading {}", words.display()))?;
            for (word, score) in bee.solve(&vocabulary) {
                let marker = if bee.is_pangram(&word) { " *" } else { "" };
                println!("{score:>3} {word}{marker}");
            }
        }
        Command::Random { words, max_iters, max_chain, seed } => {
            let vocabulary = read_word_list(&words).with_context(|| format!("reading {}", words.display()))?;
            let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

            for attempt in 1..=max_iters {
                let config = BoxConfiguration::random(&mut rng);
                let solver = SolverBuilder::new(config.clone())
                    .add_words(&vocabulary)
                    .max_chain_length(max_chain)
                    .coverage(CoverageTarget::BoxLetters)
                    .build()
                    .map_err(|reasons| anyhow!("invalid box {config}: {reasons:?}"))?;

                let report = solver.solve_with(Strategy::BreadthFirst, &mut letterboxed::NullObserver)?;
                if let Some(best) = rank_solutions(report.solutions).into_iter().next() {
                    println!("{config} (attempt {attempt}): {best}");
                    return Ok(());
                }
                tracing::debug!(attempt, %config, "no solution");
            }

            bail!("no solvable box in {max_iters} attempts");
        }
    }

    Ok(())
}
