use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How two solutions are judged to be the same.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FingerprintMode {
    /// Chains using the same words are one solution, whatever the order.
    #[default]
    WordSet,
    /// Chains are one solution only if they list the same words in the same order.
    OrderedChain,
}

/// The deduplication key of a solution under some [`FingerprintMode`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Fingerprint<W: Ord + Hash> {
    /// The words of the chain, unordered.
    WordSet(BTreeSet<W>),
    /// The words of the chain, in order.
    OrderedChain(Vec<W>),
}

impl<W: Clone + Ord + Hash> Fingerprint<W> {
    /// The fingerprint of `chain` under `mode`.
    pub fn of(mode: FingerprintMode, chain: &[W]) -> Self {
        match mode {
            FingerprintMode::WordSet => Self::WordSet(chain.iter().cloned().collect()),
            FingerprintMode::OrderedChain => Self::OrderedChain(chain.to_vec()),
        }
    }
}

/// What happened to a chain handed to [`SolutionAggregator::offer`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Offer {
    /// The chain is new and was kept.
    Accepted,
    /// A chain with the same fingerprint was already kept.
    Duplicate,
    /// The cap was already reached; the chain was not considered.
    Full,
}

/// Merges chains from many searches into one deduplicated, capped solution set.
///
/// Solutions keep the order in which they were first offered. The aggregator also owns the session clock:
/// [`Self::budget_exhausted`] reports when the overall time budget, if any, has run out.
#[derive(Clone, Debug)]
pub struct SolutionAggregator<W: Ord + Hash> {
    mode: FingerprintMode,
    cap: usize,
    seen: HashSet<Fingerprint<W>>,
    solutions: Vec<Vec<W>>,
    started: Instant,
    time_budget: Option<Duration>,
}

impl<W: Clone + Ord + Hash> SolutionAggregator<W> {
    /// An empty aggregator keeping at most `cap` solutions, without a time budget.
    pub fn new(mode: FingerprintMode, cap: usize) -> Self {
        Self {
            mode,
            cap,
            seen: HashSet::new(),
            solutions: Vec::new(),
            started: Instant::now(),
            time_budget: None,
        }
    }

    /// Limit the session to `budget` of wall-clock time, counted from now.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.started = Instant::now();
        self.time_budget = Some(budget);
        self
    }

    /// Keep `chain` unless its fingerprint has been seen or the cap is reached.
    pub fn offer(&mut self, chain: Vec<W>) -> Offer {
        if self.is_full() {
            return Offer::Full;
        }

        if !self.seen.insert(Fingerprint::of(self.mode, &chain)) {
            return Offer::Duplicate;
        }

        self.solutions.push(chain);
        Offer::Accepted
    }

    /// Whether the cap has been reached.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.solutions.len() >= self.cap
    }

    /// Whether the time budget has run out. Always `false` without a budget.
    pub fn budget_exhausted(&self) -> bool {
        self.time_budget.is_some_and(|budget| self.started.elapsed() >= budget)
    }

    /// Time since the aggregator, or its time budget, was started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Number of solutions kept.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether no solution has been kept.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Solutions kept so far, in first-offered order.
    pub fn solutions(&self) -> &[Vec<W>] {
        &self.solutions
    }

    /// Consume the aggregator, yielding its solutions.
    pub fn into_solutions(self) -> Vec<Vec<W>> {
        self.solutions
    }
}

/// Deduplicate `chains` by fingerprint and keep at most `cap` of them, in first-seen order.
///
/// An empty input is a normal outcome and yields an empty result.
pub fn aggregate<W, I>(chains: I, mode: FingerprintMode, cap: usize) -> Vec<Vec<W>>
where
    W: Clone + Ord + Hash,
    I: IntoIterator<Item=Vec<W>>,
{
    let mut aggregator = SolutionAggregator::new(mode, cap);
    for chain in chains {
        if aggregator.offer(chain) == Offer::Full {
            break;
        }
    }

    aggregator.into_solutions()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::{aggregate, Fingerprint, FingerprintMode, Offer, SolutionAggregator};

    fn chains() -> Vec<Vec<&'static str>> {
        vec![
            vec!["ACE", "EGA"],
            vec!["EGA", "ACE"],
            vec!["ACE", "EGB", "BDFH"],
            vec!["ACE", "EGA"],
        ]
    }

    #[test]
    fn word_set_ignores_order() {
        let merged = aggregate(chains(), FingerprintMode::WordSet, 1000);
        assert_eq!(merged, vec![vec!["ACE", "EGA"], vec!["ACE", "EGB", "BDFH"]]);
    }

    #[test]
    fn ordered_chain_keeps_reorderings() {
        let merged = aggregate(chains(), FingerprintMode::OrderedChain, 1000);
        assert_eq!(merged.len(), 3);
        assert!(merged.contains(&vec!["EGA", "ACE"]));
    }

    #[test]
    fn aggregation_is_idempotent() {
        for mode in [FingerprintMode::WordSet, FingerprintMode::OrderedChain] {
            let once = aggregate(chains(), mode, 1000);
            let twice = aggregate(once.clone(), mode, 1000);
            let fingerprints = |chains: &Vec<Vec<&'static str>>| chains.iter()
                .map(|chain| Fingerprint::of(mode, chain))
                .collect::<HashSet<_>>();
            assert_eq!(fingerprints(&once), fingerprints(&twice));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn cap_is_enforced() {
        let mut aggregator = SolutionAggregator::new(FingerprintMode::OrderedChain, 2);
        assert_eq!(aggregator.offer(vec!["A"]), Offer::Accepted);
        assert_eq!(aggregator.offer(vec!["A"]), Offer::Duplicate);
        assert_eq!(aggregator.offer(vec!["B"]), Offer::Accepted);
        assert!(aggregator.is_full());
        assert_eq!(aggregator.offer(vec!["C"]), Offer::Full);
        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(aggregate(Vec::<Vec<&str>>::new(), FingerprintMode::WordSet, 1000).is_empty());
    }

    #[test]
    fn time_budget() {
        let aggregator = SolutionAggregator::<&str>::new(FingerprintMode::WordSet, 10);
        assert!(!aggregator.budget_exhausted());
        assert!(aggregator.clone().with_time_budget(Duration::ZERO).budget_exhausted());
        assert!(!aggregator.with_time_budget(Duration::from_secs(3600)).budget_exhausted());
    }
}
