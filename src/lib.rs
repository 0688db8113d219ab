#![warn(missing_docs)]

//! # `letterboxed`
//!
//! A solver for [Letter Boxed](https://www.nytimes.com/puzzles/letter-boxed), the New York Times word puzzle.
//! Letters sit on the edges of a square; words are spelled without using two letters of the same edge in a row, and
//! each word must begin with the last letter of the word before it. The goal is a short chain of words using every
//! letter.
//!
//! Begin by describing the box with a [`BoxConfiguration`] and handing it, along with a vocabulary, to a
//! [`SolverBuilder`]. Build a [`Solver`], then call [`solve_bfs()`](Solver::solve_bfs) or [`solve()`](Solver::solve)
//! for a [`SolveReport`] holding every unique chain found.
//!
//! # Internals
//! The vocabulary is first filtered down to the words playable on the box (see [`validator`]).
//! Each valid word becomes a vertex of a directed graph G, with an edge from A to B whenever B begins with the last
//! letter of A.
//! Letters are interned into a per-puzzle [`Alphabet`] so that the letters used by a chain fit in one machine word,
//! a [`LetterSet`].
//!
//! Searching from each start word in turn, a state is a word paired with the letters used to reach it.
//! A successor is only followed if it contributes a letter not yet used; this bounds every chain by the number of
//! letters and rules out cycles.
//! A state whose letters equal the target set ends a solution.
//!
//! Both strategies are one engine (see [`search`]) parameterised by a frontier and a visited policy:
//! 1. Breadth-first search uses a FIFO queue and one visited set for the whole search from a start word, so the first
//! chain reaching any state is a shortest one.
//! 2. Depth-first search uses a LIFO stack and a visited set per branch, so sibling branches may revisit a state and
//! more distinct chains are found.
//!
//! Solutions from every start word are merged by a [`SolutionAggregator`], which discards chains whose fingerprint
//! has been seen before. Resource [`Limits`] bound each search and the session as a whole, and anything that cuts a
//! search short is reported to a [`SearchObserver`] rather than failing the solve.

pub use aggregate::{aggregate, Fingerprint, FingerprintMode, Offer, SolutionAggregator};
pub use board::{BoxConfiguration, BoxEdge};
pub use builder::{BuilderInvalidReason, SolverBuilder};
pub use chain::{rank_solutions, Chain};
pub use error::{BranchFault, SolverError};
pub use graph::{WordGraph, WordId};
pub use letters::{Alphabet, LetterSet};
pub use observer::{NullObserver, SearchEvent, SearchObserver, TracingObserver};
pub use search::{Ceiling, Limits, SearchOutcome, Strategy};
pub use solver::{CoverageTarget, Diagnostics, SolveReport, Solver, SolverConfig, WordOrder};
pub use spelling_bee::SpellingBee;
pub use validator::{clean_word, filter_valid_words, is_valid};
pub use vocabulary::{parse_word_list, read_word_list};

/// Merging and deduplicating solutions.
pub mod aggregate;
/// Box edges and configurations.
pub mod board;
/// Builders to create [`Solver`]s.
pub mod builder;
pub(crate) mod chain;
pub(crate) mod error;
/// The transition graph over valid words.
pub mod graph;
/// Per-puzzle letter interning and letter sets.
pub mod letters;
/// Progress events raised while solving.
pub mod observer;
/// The search engine shared by both strategies, and its resource limits.
pub mod search;
pub(crate) mod solver;
/// A scorer for the Spelling Bee puzzle, played with the same word lists.
pub mod spelling_bee;
mod tests;
/// Which words may be played on a box.
pub mod validator;
/// Word list loading.
pub mod vocabulary;
