use std::collections::HashMap;

use itertools::Itertools;
use petgraph::dot::{Config, Dot};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use crate::error::BranchFault;
use crate::letters::{Alphabet, LetterSet};

/// Handle to a word in a [`WordGraph`], assigned in vocabulary order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct WordId(pub(crate) u32);

impl WordId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A valid word together with the facts the search needs about it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Word {
    pub(crate) text: String,
    pub(crate) letters: LetterSet,
    first: char,
    last: char,
}

/// The directed transition graph over valid words.
///
/// There is an edge from `a` to `b` exactly when `a` and `b` are different words and `a` ends with the letter `b`
/// starts with. Successors of a word are ordered by their position in the word list the graph was built from.
#[derive(Clone, Debug)]
pub struct WordGraph {
    words: Vec<Word>,
    graph: DiGraphMap<WordId, ()>,
    alphabet: Alphabet,
    universe: LetterSet,
}

impl WordGraph {
    /// Build the graph over `valid_words`, which must already have passed [`is_valid`](crate::validator::is_valid).
    ///
    /// Words that are empty or use letters outside `alphabet` cannot take part in a chain and are skipped.
    pub fn build(valid_words: &[String], alphabet: Alphabet) -> Self {
        let words = valid_words.iter()
            .filter_map(|text| {
                let letters = alphabet.set_of(text)?;
                let first = text.chars().next()?;
                let last = text.chars().last()?;
                Some(Word { text: text.clone(), letters, first, last })
            })
            .collect_vec();

        let universe = words.iter().fold(LetterSet::EMPTY, |acc, word| acc.union(word.letters));

        // bucket by first letter; buckets keep word list order, so successor order is word list order
        let mut by_first: HashMap<char, Vec<WordId>> = HashMap::new();
        for (index, word) in words.iter().enumerate() {
            by_first.entry(word.first).or_default().push(WordId(index as u32));
        }

        let mut graph = DiGraphMap::with_capacity(words.len(), words.len());
        for (index, word) in words.iter().enumerate() {
            let from = WordId(index as u32);
            graph.add_node(from);

            for to in by_first.get(&word.last).into_iter().flatten() {
                // no self loops, even for words like "AREA"
                if *to != from {
                    graph.add_edge(from, *to, ());
                }
            }
        }

        Self { words, graph, alphabet, universe }
    }

    /// Every letter used by some word in the graph; the coverage target of a solve by default.
    pub fn letter_universe(&self) -> LetterSet {
        self.universe
    }

    /// The alphabet word letter sets are indexed by.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of words, i.e. nodes.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of transitions.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All word handles, in word list order.
    pub fn word_ids(&self) -> impl Iterator<Item=WordId> + '_ {
        (0..self.words.len()).map(|index| WordId(index as u32))
    }

    /// Look up the handle for `text`.
    pub fn id_of(&self, text: &str) -> Option<WordId> {
        self.words.iter()
            .position(|word| word.text == text)
            .map(|index| WordId(index as u32))
    }

    /// The text of word `id`, if it is in the graph.
    pub fn text(&self, id: WordId) -> Option<&str> {
        self.words.get(id.index()).map(|word| word.text.as_str())
    }

    /// The letters of word `id`, if it is in the graph.
    pub fn letters(&self, id: WordId) -> Option<LetterSet> {
        self.words.get(id.index()).map(|word| word.letters)
    }

    /// Ordered successors of `id`.
    ///
    /// Fails with [`BranchFault::UnknownWord`] if `id` does not belong to this graph.
    pub fn successors(&self, id: WordId) -> Result<impl Iterator<Item=WordId> + '_, BranchFault> {
        if !self.graph.contains_node(id) {
            return Err(BranchFault::UnknownWord(id));
        }

        Ok(self.graph.neighbors_directed(id, Direction::Outgoing))
    }

    /// Successors of `text` as text, for inspection. Empty if `text` is not a node.
    pub fn successor_words(&self, text: &str) -> Vec<&str> {
        self.id_of(text)
            .and_then(|id| self.successors(id).ok())
            .into_iter()
            .flatten()
            .filter_map(|id| self.text(id))
            .collect_vec()
    }

    /// Whether `from` has an edge to `to`.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.id_of(from), self.id_of(to)) {
            (Some(from), Some(to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Render the graph in Graphviz DOT, labelling each node with its word.
    pub fn to_dot(&self) -> String {
        let node_attrs = |_, (id, _)| format!("label = {:?}", self.text(id).unwrap_or_default());
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &|_, _| String::new(),
            &node_attrs,
        );

        format!("{:?}", dot)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::board::BoxConfiguration;
    use crate::validator::filter_valid_words;

    use super::WordGraph;

    fn graph_of(words: &[&str]) -> WordGraph {
        let config = BoxConfiguration::new(["AB", "CD", "EF", "GH"]);
        let valid = filter_valid_words(words, &config);
        WordGraph::build(&valid, config.alphabet().unwrap())
    }

    #[test]
    fn edges_follow_last_to_first_rule() {
        let words = ["ACE", "EGB", "EHA", "BDFH", "HAC", "CEG"];
        let graph = graph_of(&words);

        for (a, b) in words.iter().cartesian_product(words.iter()) {
            let expected = a != b && a.chars().last() == b.chars().next();
            assert_eq!(graph.has_edge(a, b), expected, "{a} -> {b}");
        }
    }

    #[test]
    fn successors_keep_word_list_order() {
        let graph = graph_of(&["ACE", "EHA", "EGB", "EDA"]);
        assert_eq!(graph.successor_words("ACE"), vec!["EHA", "EGB", "EDA"]);
        assert_eq!(graph.successor_words("EHA"), vec!["ACE"]);
    }

    #[test]
    fn no_self_loops() {
        let graph = graph_of(&["ACA", "AEA"]);
        assert!(!graph.has_edge("ACA", "ACA"));
        assert!(graph.has_edge("ACA", "AEA"));
        assert!(graph.has_edge("AEA", "ACA"));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn universe_is_union_of_valid_words() {
        let graph = graph_of(&["ACE", "ACD", "EGB"]);
        let universe = graph.alphabet().letters_of(graph.letter_universe());
        assert_eq!(universe.into_iter().sorted().collect::<String>(), "ABCEG");
    }

    #[test]
    fn empty_graph() {
        let graph = graph_of(&[]);
        assert!(graph.is_empty());
        assert!(graph.letter_universe().is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn dot_lists_every_edge() {
        let graph = graph_of(&["ACE", "EGB", "EHA"]);
        let dot = graph.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("\"EGB\""));
        assert_eq!(dot.matches("->").count(), graph.edge_count());
    }
}
