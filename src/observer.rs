use std::time::Duration;

use crate::chain::Chain;
use crate::error::BranchFault;
use crate::search::{Ceiling, Strategy};

/// Structured progress reported by a solve.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent<'a> {
    /// A session is about to search from each valid word.
    SessionStarted {
        /// The strategy every start word is searched with.
        strategy: Strategy,
        /// Number of start words.
        words: usize,
    },
    /// Periodic progress, roughly every tenth of the start words.
    Progress {
        /// Start words searched so far.
        processed: usize,
        /// Number of start words.
        total: usize,
        /// Unique solutions held so far.
        solutions: usize,
        /// Session time so far.
        elapsed: Duration,
    },
    /// The aggregator accepted a new unique solution.
    SolutionFound {
        /// The new solution.
        chain: &'a Chain,
        /// Unique solutions held, including this one.
        total: usize,
    },
    /// A resource ceiling cut a search short; results so far are kept.
    CeilingHit {
        /// The start word being searched from when the ceiling was hit.
        start_word: &'a str,
        /// The ceiling hit.
        ceiling: Ceiling,
    },
    /// A branch was dropped after a structural inconsistency.
    BranchFault {
        /// The start word of the search the branch belonged to.
        start_word: &'a str,
        /// What went wrong.
        fault: BranchFault,
    },
    /// The search from one start word panicked; its contribution was dropped.
    StartWordFailed {
        /// The start word whose search panicked.
        start_word: &'a str,
        /// The panic message, if it had one.
        reason: String,
    },
    /// A search was requested from a word that is not in the graph.
    InvalidStartWord {
        /// The word requested.
        start_word: &'a str,
    },
    /// There are no valid words to search from.
    EmptyVocabulary,
    /// The session ended without a single solution.
    NoSolutions {
        /// The chain length used; a larger one may find solutions.
        max_chain_length: usize,
    },
    /// The session is over.
    SessionFinished {
        /// Unique solutions kept.
        solutions: usize,
        /// Session time.
        elapsed: Duration,
    },
}

/// Receives [`SearchEvent`]s from a running solve.
///
/// Any `FnMut(&SearchEvent)` closure is an observer, which is convenient for collecting events in tests.
pub trait SearchObserver {
    /// Called for every event, in the order they happen.
    fn on_event(&mut self, event: &SearchEvent<'_>);
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchEvent<'_>),
{
    fn on_event(&mut self, event: &SearchEvent<'_>) {
        self(event)
    }
}

/// Discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn on_event(&mut self, _event: &SearchEvent<'_>) {}
}

/// Logs events through `tracing`; the observer used when none is given.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&mut self, event: &SearchEvent<'_>) {
        match event {
            SearchEvent::SessionStarted { strategy, words } => {
                tracing::info!(%strategy, words, "starting search")
            }
            SearchEvent::Progress { processed, total, solutions, elapsed } => {
                tracing::info!(solutions, "progress: {}/{} words processed, {:.2?} elapsed", processed, total, elapsed)
            }
            SearchEvent::SolutionFound { chain, total } => tracing::debug!(%chain, total, "solution found"),
            SearchEvent::CeilingHit { start_word, ceiling } => {
                tracing::warn!(start_word, %ceiling, "search ceiling reached, keeping partial results")
            }
            SearchEvent::BranchFault { start_word, fault } => {
                tracing::error!(start_word, %fault, "dropping branch")
            }
            SearchEvent::StartWordFailed { start_word, reason } => {
                tracing::error!(start_word, reason = reason.as_str(), "search from start word failed")
            }
            SearchEvent::InvalidStartWord { start_word } => tracing::warn!(start_word, "invalid start word"),
            SearchEvent::EmptyVocabulary => tracing::error!("no valid words available"),
            SearchEvent::NoSolutions { max_chain_length } => {
                tracing::warn!(max_chain_length, "no solutions found, try a larger max chain length")
            }
            SearchEvent::SessionFinished { solutions, elapsed } => {
                tracing::info!(solutions, "search finished in {:.2?}", elapsed)
            }
        }
    }
}
