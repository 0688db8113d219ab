use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An ordered sequence of words, each starting with the letter the previous one ends with.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain(Vec<String>);

impl Chain {
    /// Wrap `words` as a chain without checking that it is linked.
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    /// The words, in order.
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain has no words.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The distinct letters used across all words.
    pub fn letters(&self) -> BTreeSet<char> {
        self.0.iter().flat_map(|word| word.chars()).collect()
    }

    /// Number of distinct letters used across all words.
    pub fn distinct_letters(&self) -> usize {
        self.letters().len()
    }

    /// Whether every word starts with the last letter of the word before it.
    pub fn is_linked(&self) -> bool {
        self.0.iter()
            .tuple_windows()
            .all(|(a, b)| a.chars().last().is_some() && a.chars().last() == b.chars().next())
    }
}

impl<S: Into<String>> FromIterator<S> for Chain {
    fn from_iter<T: IntoIterator<Item=S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect_vec())
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" -> "))
    }
}

/// Order solutions for display: fewest words first, then most distinct letters, then alphabetically.
pub fn rank_solutions(solutions: impl IntoIterator<Item=Chain>) -> Vec<Chain> {
    solutions.into_iter()
        .sorted_by_cached_key(|chain| (chain.len(), Reverse(chain.distinct_letters()), chain.clone()))
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::{rank_solutions, Chain};

    #[test]
    fn linked_chains() {
        assert!(Chain::from_iter(["ACE", "EGB", "BDFH"]).is_linked());
        assert!(Chain::from_iter(["ACE"]).is_linked());
        assert!(!Chain::from_iter(["ACE", "BDFH"]).is_linked());
    }

    #[test]
    fn letters_are_distinct() {
        let chain = Chain::from_iter(["ACE", "EGA"]);
        assert_eq!(chain.distinct_letters(), 4);
        assert_eq!(chain.to_string(), "ACE -> EGA");
    }

    #[test]
    fn ranking_prefers_short_then_rich() {
        let ranked = rank_solutions([
            Chain::from_iter(["ACE", "EGB", "BDFH"]),
            Chain::from_iter(["AB", "BC"]),
            Chain::from_iter(["ACEG", "GBDFH"]),
            Chain::from_iter(["ABCDEFGH"]),
        ]);

        assert_eq!(ranked.iter().map(Chain::to_string).collect::<Vec<_>>(), vec![
            "ABCDEFGH",
            "ACEG -> GBDFH",
            "AB -> BC",
            "ACE -> EGB -> BDFH",
        ]);
    }
}
