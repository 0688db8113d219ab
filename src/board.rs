use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::letters::Alphabet;

/// Index of an edge within a [`BoxConfiguration`].
pub type EdgeIndex = usize;

/// One side of the box: a group of letters, no two of which may appear consecutively within a word.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BoxEdge(pub Vec<char>);

impl BoxEdge {
    /// The letters on this edge, in order.
    pub fn letters(&self) -> &[char] {
        &self.0
    }
}

impl From<&str> for BoxEdge {
    fn from(value: &str) -> Self {
        Self(value.chars().flat_map(char::to_uppercase).collect_vec())
    }
}

impl From<String> for BoxEdge {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Vec<char>> for BoxEdge {
    fn from(value: Vec<char>) -> Self {
        Self(value.into_iter().flat_map(char::to_uppercase).collect_vec())
    }
}

/// The ordered edges of a Letter Boxed puzzle; canonically four edges of three letters each.
///
/// Edges are taken as given. A letter placed on more than one edge is not rejected here; lookups resolve it to
/// the last edge containing it. Use [`SolverBuilder::strict_edges`](crate::builder::SolverBuilder::strict_edges)
/// to reject such configurations instead.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BoxConfiguration {
    edges: Vec<BoxEdge>,
}

impl BoxConfiguration {
    /// Construct a configuration from anything convertible to [`BoxEdge`]s, e.g. `["ABC", "DEF", "GHI", "JKL"]`.
    pub fn new<E: Into<BoxEdge>>(edges: impl IntoIterator<Item=E>) -> Self {
        Self { edges: edges.into_iter().map(Into::into).collect_vec() }
    }

    /// Split a run of letters into consecutive edges of `edge_len` letters, so `"TIAUWLDBYRMO"` with `3` yields
    /// the edges `TIA`, `UWL`, `DBY`, `RMO`. A short final chunk becomes a short final edge.
    pub fn from_letters(letters: &str, edge_len: usize) -> Self {
        let letters = letters.chars().flat_map(char::to_uppercase).collect_vec();
        Self {
            edges: letters.chunks(edge_len.max(1))
                .map(|chunk| BoxEdge(chunk.to_vec()))
                .collect_vec(),
        }
    }

    /// A random standard puzzle: twelve distinct uppercase letters arranged on four edges of three.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let letters = ('A'..='Z').collect_vec()
            .choose_multiple(rng, 12)
            .copied()
            .collect::<String>();
        Self::from_letters(&letters, 3)
    }

    /// The edges, in order.
    pub fn edges(&self) -> &[BoxEdge] {
        &self.edges
    }

    /// Every letter on the box, edge by edge, including repeats.
    pub fn letters(&self) -> impl Iterator<Item=char> + '_ {
        self.edges.iter().flat_map(|edge| edge.0.iter().copied())
    }

    /// The distinct letters of the box, or `None` if there are too many to index.
    pub fn alphabet(&self) -> Option<Alphabet> {
        Alphabet::new(self.letters())
    }

    /// Map each letter to the edge it sits on. A repeated letter maps to the last edge containing it.
    pub fn edge_map(&self) -> HashMap<char, EdgeIndex> {
        self.edges.iter()
            .enumerate()
            .flat_map(|(index, edge)| edge.0.iter().map(move |letter| (*letter, index)))
            .collect()
    }

    /// Letters appearing more than once across all edges.
    pub fn duplicate_letters(&self) -> Vec<char> {
        self.letters().duplicates().collect_vec()
    }
}

impl Display for BoxConfiguration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.edges.iter().map(|edge| edge.0.iter().collect::<String>()).join("-"))
    }
}
