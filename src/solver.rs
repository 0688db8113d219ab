use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::aggregate::{FingerprintMode, Offer, SolutionAggregator};
use crate::chain::Chain;
use crate::error::SolverError;
use crate::graph::{WordGraph, WordId};
use crate::letters::LetterSet;
use crate::observer::{SearchEvent, SearchObserver, TracingObserver};
use crate::search::{explore, Ceiling, GlobalVisited, Limits, PathVisited, SearchContext, SearchOutcome, Strategy};

/// Chain length substituted when a zero maximum is requested.
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 10;

/// Which letters a solution has to use.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CoverageTarget {
    /// Every letter that appears in some valid word.
    #[default]
    ValidWords,
    /// Every letter on the box, as in the published puzzle. Boxes with letters no valid word uses have no solutions.
    BoxLetters,
}

/// The order of the valid word list, which fixes both the order start words are tried in and successor order.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordOrder {
    /// Vocabulary order.
    #[default]
    Vocabulary,
    /// A reproducible shuffle.
    Shuffled {
        /// Seed of the [`StdRng`](rand::rngs::StdRng) used for the shuffle.
        seed: u64,
    },
}

/// Session settings. Build a [`Solver`] with [`SolverBuilder`](crate::builder::SolverBuilder) to apply them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Longest chain accepted as a solution.
    pub max_chain_length: usize,
    /// Resource ceilings.
    pub limits: Limits,
    /// How solutions are deduplicated.
    pub fingerprint: FingerprintMode,
    /// Which letters a solution has to use.
    pub coverage: CoverageTarget,
    /// The order of the valid word list.
    pub order: WordOrder,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_chain_length: 3,
            limits: Limits::default(),
            fingerprint: FingerprintMode::default(),
            coverage: CoverageTarget::default(),
            order: WordOrder::default(),
        }
    }
}

/// Counters describing how a solve went.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// The strategy used.
    pub strategy: Strategy,
    /// Number of valid words, each a potential start word.
    pub start_words_total: usize,
    /// Start words actually searched from before the session ended.
    pub start_words_processed: usize,
    /// Unique solutions kept.
    pub solutions_found: usize,
    /// Frontier pops across all start words.
    pub iterations: u64,
    /// Branches and start words dropped after a fault.
    pub faults: usize,
    /// Wall-clock time of the session.
    pub elapsed: Duration,
    ceiling_hits: [u64; Ceiling::COUNT],
}

impl Diagnostics {
    fn record(&mut self, ceiling: Ceiling) {
        self.ceiling_hits[ceiling as usize] += 1;
    }

    /// How many times `ceiling` cut a search short.
    pub fn ceiling_hits(&self, ceiling: Ceiling) -> u64 {
        self.ceiling_hits[ceiling as usize]
    }

    /// Whether any ceiling was hit, i.e. the solutions may be incomplete.
    pub fn truncated(&self) -> bool {
        self.ceiling_hits.iter().any(|hits| *hits > 0)
    }
}

/// The solutions of a session and how they were found.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Unique solutions in discovery order. See [`rank_solutions`](crate::chain::rank_solutions) for display order.
    pub solutions: Vec<Chain>,
    /// How the solutions were found.
    pub diagnostics: Diagnostics,
}

/// A prepared puzzle: the transition graph over the valid words and the letters a solution must cover.
///
/// Create one with a [`SolverBuilder`](crate::builder::SolverBuilder). A solver is immutable, so any number of
/// solves may be run against it.
#[derive(Clone, Debug)]
pub struct Solver {
    pub(crate) graph: WordGraph,
    pub(crate) target: LetterSet,
    pub(crate) config: SolverConfig,
}

impl Solver {
    /// The transition graph over the valid words.
    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    /// The settings this solver was built with.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The letters every solution covers.
    pub fn letter_universe(&self) -> LetterSet {
        self.target
    }

    /// The letters every solution covers, as characters.
    pub fn universe_letters(&self) -> Vec<char> {
        self.graph.alphabet().letters_of(self.target)
    }

    /// The valid words, in search order.
    pub fn valid_words(&self) -> impl Iterator<Item=&str> + '_ {
        self.graph.word_ids().filter_map(|id| self.graph.text(id))
    }

    /// Resolve word handles to a [`Chain`].
    pub fn chain(&self, ids: &[WordId]) -> Chain {
        ids.iter()
            .filter_map(|id| self.graph.text(*id))
            .collect()
    }

    /// Breadth-first search from `start_word`, logging through `tracing`.
    pub fn bfs(&self, start_word: &str) -> Result<Vec<Chain>, SolverError> {
        self.chains_from(Strategy::BreadthFirst, start_word)
    }

    /// Depth-first search from `start_word`, logging through `tracing`.
    pub fn dfs(&self, start_word: &str) -> Result<Vec<Chain>, SolverError> {
        self.chains_from(Strategy::DepthFirst, start_word)
    }

    fn chains_from(&self, strategy: Strategy, start_word: &str) -> Result<Vec<Chain>, SolverError> {
        let outcome = self.search_from(strategy, start_word, &mut TracingObserver)?;
        Ok(outcome.solutions.iter().map(|ids| self.chain(ids)).collect_vec())
    }

    /// Search from a single start word with `strategy`.
    ///
    /// A word that is not a valid word of this puzzle yields an empty outcome and an
    /// [`InvalidStartWord`](SearchEvent::InvalidStartWord) event.
    pub fn search_from(
        &self,
        strategy: Strategy,
        start_word: &str,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome, SolverError> {
        match self.graph.id_of(start_word) {
            Some(start) => self.explore(strategy, start, observer),
            None => {
                observer.on_event(&SearchEvent::InvalidStartWord { start_word });
                Ok(SearchOutcome::default())
            }
        }
    }

    fn explore(&self, strategy: Strategy, start: WordId, observer: &mut dyn SearchObserver) -> Result<SearchOutcome, SolverError> {
        let ctx = SearchContext {
            graph: &self.graph,
            target: self.target,
            max_chain_length: self.config.max_chain_length,
            limits: &self.config.limits,
            fingerprint: self.config.fingerprint,
            branch_solution_cap: match strategy {
                Strategy::BreadthFirst => None,
                Strategy::DepthFirst => Some(self.config.limits.branch_solution_cap),
            },
        };

        match strategy {
            Strategy::BreadthFirst => explore(&ctx, start, VecDeque::new(), GlobalVisited::default(), observer),
            Strategy::DepthFirst => explore(&ctx, start, Vec::new(), PathVisited, observer),
        }
    }

    /// Breadth-first search from every valid word, logging through `tracing`.
    pub fn solve_bfs(&self) -> Result<SolveReport, SolverError> {
        self.solve_with(Strategy::BreadthFirst, &mut TracingObserver)
    }

    /// Depth-first search from every valid word, logging through `tracing`.
    pub fn solve(&self) -> Result<SolveReport, SolverError> {
        self.solve_with(Strategy::DepthFirst, &mut TracingObserver)
    }

    /// Search from every valid word in turn and merge the results.
    ///
    /// Stops early once [`Limits::max_solutions`] unique solutions are held or [`Limits::session_time_limit`] has
    /// passed. Finding nothing is not an error: the report is empty and a [`NoSolutions`](SearchEvent::NoSolutions)
    /// event is raised. A panic while searching from one start word is reported and that start word skipped.
    pub fn solve_with(&self, strategy: Strategy, observer: &mut dyn SearchObserver) -> Result<SolveReport, SolverError> {
        let limits = &self.config.limits;
        let total = self.graph.word_count();
        let mut aggregator = SolutionAggregator::new(self.config.fingerprint, limits.max_solutions)
            .with_time_budget(limits.session_time_limit);
        let mut diagnostics = Diagnostics {
            strategy,
            start_words_total: total,
            ..Diagnostics::default()
        };

        observer.on_event(&SearchEvent::SessionStarted { strategy, words: total });
        if total == 0 {
            observer.on_event(&SearchEvent::EmptyVocabulary);
        }

        let progress_interval = (total / 10).max(1);

        for (index, start) in self.graph.word_ids().enumerate() {
            let start_word = self.graph.text(start).unwrap_or_default();

            if index % progress_interval == 0 {
                observer.on_event(&SearchEvent::Progress {
                    processed: index,
                    total,
                    solutions: aggregator.len(),
                    elapsed: aggregator.elapsed(),
                });
            }

            if aggregator.budget_exhausted() {
                diagnostics.record(Ceiling::SessionTime);
                observer.on_event(&SearchEvent::CeilingHit { start_word, ceiling: Ceiling::SessionTime });
                break;
            }

            diagnostics.start_words_processed += 1;
            let outcome = match catch_unwind(AssertUnwindSafe(|| self.explore(strategy, start, &mut *observer))) {
                Ok(outcome) => outcome?,
                Err(panic) => {
                    let reason = panic.downcast_ref::<&str>().map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_owned());
                    diagnostics.faults += 1;
                    observer.on_event(&SearchEvent::StartWordFailed { start_word, reason });
                    continue;
                }
            };

            diagnostics.iterations += outcome.iterations;
            diagnostics.faults += outcome.faults;
            if let Some(ceiling) = outcome.ceiling {
                diagnostics.record(ceiling);
            }

            for ids in outcome.solutions {
                let chain = self.chain(&ids);
                match aggregator.offer(ids) {
                    Offer::Accepted => observer.on_event(&SearchEvent::SolutionFound { chain: &chain, total: aggregator.len() }),
                    Offer::Duplicate => {}
                    Offer::Full => break,
                }
            }

            if aggregator.is_full() {
                diagnostics.record(Ceiling::Solutions);
                observer.on_event(&SearchEvent::CeilingHit { start_word, ceiling: Ceiling::Solutions });
                break;
            }
        }

        if aggregator.is_empty() {
            observer.on_event(&SearchEvent::NoSolutions { max_chain_length: self.config.max_chain_length });
        }

        diagnostics.solutions_found = aggregator.len();
        diagnostics.elapsed = aggregator.elapsed();
        observer.on_event(&SearchEvent::SessionFinished { solutions: aggregator.len(), elapsed: diagnostics.elapsed });

        Ok(SolveReport {
            solutions: aggregator.solutions().iter().map(|ids| self.chain(ids)).collect_vec(),
            diagnostics,
        })
    }
}
