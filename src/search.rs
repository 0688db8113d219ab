use std::collections::{HashSet, TryReserveError, VecDeque};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::aggregate::{Fingerprint, FingerprintMode};
use crate::error::{BranchFault, SolverError};
use crate::graph::{WordGraph, WordId};
use crate::letters::LetterSet;
use crate::observer::{SearchEvent, SearchObserver};

/// The order in which the word graph is explored from each start word.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
pub enum Strategy {
    /// Level by level, with one visited set for the whole search from a start word.
    /// The first chain reaching any state is a shortest one, but other chains through that state are never tried.
    #[default]
    #[strum(serialize = "bfs")]
    #[serde(rename = "bfs")]
    BreadthFirst,
    /// Branch by branch, each branch remembering only the states on its own path.
    /// Explores more chains than [`Self::BreadthFirst`] at a higher cost.
    #[strum(serialize = "dfs")]
    #[serde(rename = "dfs")]
    DepthFirst,
}

/// A resource ceiling that can cut a search short.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Display, EnumCount, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Ceiling {
    /// [`Limits::max_iterations`] for one start word.
    Iterations,
    /// [`Limits::time_limit`] for one start word.
    Time,
    /// [`Limits::max_frontier`] for one start word.
    FrontierSize,
    /// [`Limits::branch_solution_cap`] for one depth-first start word.
    BranchSolutions,
    /// [`Limits::max_solutions`] for the session.
    Solutions,
    /// [`Limits::session_time_limit`] for the session.
    SessionTime,
}

/// Resource ceilings for a solve. The defaults suit a full dictionary and a chain length of three or so.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Frontier pops allowed per start word.
    pub max_iterations: u64,
    /// Wall-clock time allowed per start word.
    pub time_limit: Duration,
    /// The clock is only read every this many iterations, so a search can overshoot [`Self::time_limit`] slightly.
    pub time_check_interval: u64,
    /// Pending states allowed in the frontier of one start word.
    pub max_frontier: usize,
    /// A depth-first search from one start word stops once it holds more than this many solutions.
    pub branch_solution_cap: usize,
    /// Unique solutions kept per session.
    pub max_solutions: usize,
    /// Wall-clock time allowed for the whole session, checked between start words.
    pub session_time_limit: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_iterations: 1_000_000,
            time_limit: Duration::from_secs(30),
            time_check_interval: 1_000,
            max_frontier: 100_000,
            branch_solution_cap: 1_000,
            max_solutions: 1_000,
            session_time_limit: Duration::from_secs(600),
        }
    }
}

/// A word together with the letters used to reach it. Letter sets compare as sets.
pub(crate) type SearchState = (WordId, LetterSet);

/// A pending chain in the frontier.
#[derive(Clone, Debug)]
pub(crate) struct SearchNode<B> {
    word: WordId,
    used: LetterSet,
    chain: Vec<WordId>,
    branch: B,
}

/// Pending work, in the order a strategy wants it.
pub(crate) trait Frontier<T> {
    /// Queue the children of one node so that they come out in the order given.
    fn push_children(&mut self, children: Vec<T>) -> Result<(), TryReserveError>;
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out: breadth-first order.
impl<T> Frontier<T> for VecDeque<T> {
    fn push_children(&mut self, children: Vec<T>) -> Result<(), TryReserveError> {
        self.try_reserve(children.len())?;
        self.extend(children);
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// Last in, first out: depth-first order.
impl<T> Frontier<T> for Vec<T> {
    fn push_children(&mut self, children: Vec<T>) -> Result<(), TryReserveError> {
        self.try_reserve(children.len())?;
        // reversed, so the first child is popped first, as in a recursive descent
        self.extend(children.into_iter().rev());
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Decides whether a state has been seen before.
///
/// `Branch` is the per-node share of that memory; children receive a clone of their parent's.
pub(crate) trait VisitedPolicy {
    type Branch: Clone + Default;

    /// Record `state`, returning `false` if it had already been recorded.
    fn first_visit(&mut self, branch: &mut Self::Branch, state: SearchState) -> bool;
}

/// One set for the whole search from a start word: a state is processed at most once, whichever path reaches it.
#[derive(Clone, Debug, Default)]
pub(crate) struct GlobalVisited(HashSet<SearchState>);

impl VisitedPolicy for GlobalVisited {
    type Branch = ();

    fn first_visit(&mut self, _branch: &mut (), state: SearchState) -> bool {
        self.0.insert(state)
    }
}

/// Each branch carries its own copy of the states on its path, so siblings never see each other's states.
/// Copies share structure, which keeps them cheap.
#[derive(Clone, Debug, Default)]
pub(crate) struct PathVisited;

impl VisitedPolicy for PathVisited {
    type Branch = im::HashSet<SearchState>;

    fn first_visit(&mut self, branch: &mut Self::Branch, state: SearchState) -> bool {
        branch.insert(state).is_none()
    }
}

/// Everything one search needs to know about the session it runs in.
pub(crate) struct SearchContext<'a> {
    pub(crate) graph: &'a WordGraph,
    pub(crate) target: LetterSet,
    pub(crate) max_chain_length: usize,
    pub(crate) limits: &'a Limits,
    pub(crate) fingerprint: FingerprintMode,
    /// Stop once more than this many solutions are held. Only depth-first search sets one.
    pub(crate) branch_solution_cap: Option<usize>,
}

/// The result of searching from a single start word.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchOutcome {
    /// Solutions found, deduplicated within this search, in discovery order.
    pub solutions: Vec<Vec<WordId>>,
    /// Frontier pops performed.
    pub iterations: u64,
    /// The ceiling that stopped the search early, if any.
    pub ceiling: Option<Ceiling>,
    /// Branches dropped after a [`BranchFault`].
    pub faults: usize,
}

/// Explore the graph from `start`, collecting chains that cover `ctx.target`.
///
/// The order of exploration comes from `frontier` and the handling of repeated states from `visited`; a FIFO
/// queue with [`GlobalVisited`] is breadth-first search and a LIFO stack with [`PathVisited`] is depth-first search.
///
/// A successor is only followed if it adds at least one unused letter, which also rules out cycles.
/// Chains longer than `ctx.max_chain_length` are abandoned.
/// Only a frontier allocation failure is returned as an error; every other problem ends or prunes the search.
pub(crate) fn explore<F, V>(
    ctx: &SearchContext,
    start: WordId,
    mut frontier: F,
    mut visited: V,
    observer: &mut dyn SearchObserver,
) -> Result<SearchOutcome, SolverError>
where
    F: Frontier<SearchNode<V::Branch>>,
    V: VisitedPolicy,
{
    let started = Instant::now();
    let start_word = ctx.graph.text(start).unwrap_or_default();
    let mut outcome = SearchOutcome::default();
    let mut fingerprints = HashSet::new();

    let Some(start_letters) = ctx.graph.letters(start) else {
        outcome.faults += 1;
        observer.on_event(&SearchEvent::BranchFault { start_word, fault: BranchFault::UnknownWord(start) });
        return Ok(outcome);
    };

    frontier.push_children(vec![SearchNode {
        word: start,
        used: start_letters,
        chain: vec![start],
        branch: V::Branch::default(),
    }])?;

    while !frontier.is_empty() {
        if outcome.iterations >= ctx.limits.max_iterations {
            outcome.ceiling = Some(Ceiling::Iterations);
            break;
        }
        outcome.iterations += 1;

        if outcome.iterations % ctx.limits.time_check_interval.max(1) == 0 && started.elapsed() >= ctx.limits.time_limit {
            outcome.ceiling = Some(Ceiling::Time);
            break;
        }

        if frontier.len() > ctx.limits.max_frontier {
            outcome.ceiling = Some(Ceiling::FrontierSize);
            break;
        }

        let Some(mut node) = frontier.pop() else {
            break;
        };

        if !visited.first_visit(&mut node.branch, (node.word, node.used)) {
            continue;
        }

        if node.chain.len() > ctx.max_chain_length {
            continue;
        }

        if node.used == ctx.target {
            if fingerprints.insert(Fingerprint::of(ctx.fingerprint, &node.chain)) {
                outcome.solutions.push(node.chain);
            }

            if ctx.branch_solution_cap.is_some_and(|cap| outcome.solutions.len() > cap) {
                outcome.ceiling = Some(Ceiling::BranchSolutions);
                break;
            }
            continue;
        }

        // every child would be too long
        if node.chain.len() >= ctx.max_chain_length {
            continue;
        }

        match expand(ctx.graph, &node) {
            Ok(children) => frontier.push_children(children)?,
            Err(fault) => {
                outcome.faults += 1;
                observer.on_event(&SearchEvent::BranchFault { start_word, fault });
            }
        }
    }

    if let Some(ceiling) = outcome.ceiling {
        observer.on_event(&SearchEvent::CeilingHit { start_word, ceiling });
    }

    Ok(outcome)
}

/// The admissible children of `node`, in successor order.
fn expand<B: Clone>(graph: &WordGraph, node: &SearchNode<B>) -> Result<Vec<SearchNode<B>>, BranchFault> {
    let mut children = Vec::new();

    for next in graph.successors(node.word)? {
        let letters = graph.letters(next).ok_or(BranchFault::UnknownWord(next))?;
        if letters.difference(node.used).is_empty() {
            continue;
        }

        let mut chain = Vec::with_capacity(node.chain.len() + 1);
        chain.extend_from_slice(&node.chain);
        chain.push(next);

        children.push(SearchNode {
            word: next,
            used: node.used.union(letters),
            chain,
            branch: node.branch.clone(),
        });
    }

    Ok(children)
}
