use std::collections::TryReserveError;

use crate::graph::WordId;

/// Failures surfaced to the caller of a solve.
///
/// Resource ceilings and an absence of solutions are not failures; they are reported through
/// [`Diagnostics`](crate::solver::Diagnostics). Only conditions the solver cannot recover from end up here.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Reading a word list failed.
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    /// The search frontier could not grow; the process is out of memory.
    #[error("out of memory while growing the search frontier: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// A structural inconsistency found while expanding one search branch.
///
/// The branch is abandoned and the search carries on with its siblings.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BranchFault {
    /// A chain refers to a word the transition graph does not contain.
    #[error("{0:?} is not a node of the transition graph")]
    UnknownWord(WordId),
}
