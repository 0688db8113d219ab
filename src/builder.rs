use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::aggregate::FingerprintMode;
use crate::board::{BoxConfiguration, EdgeIndex};
use crate::graph::WordGraph;
use crate::letters::Alphabet;
use crate::search::Limits;
use crate::solver::{CoverageTarget, Solver, SolverConfig, WordOrder, DEFAULT_MAX_CHAIN_LENGTH};
use crate::validator::{clean_word, is_valid};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// The box uses more distinct letters than a [`LetterSet`](crate::letters::LetterSet) can hold.
    TooManyLetters,
    /// Under [`SolverBuilder::strict_edges`], a letter appears more than once on the box.
    DuplicateLetter(char),
    /// Under [`SolverBuilder::strict_edges`], an edge has no letters.
    EmptyEdge(EdgeIndex),
}

/// Assembles a [`Solver`] from a box, a vocabulary and session settings.
///
/// Setters mutate the builder and return it for chaining; builders can be [`Clone`]d to save their state at some
/// point. Vocabulary entries are cleaned as they are added (see [`clean_word`]), and invalid words are filtered
/// out when the solver is built.
///
/// ```
/// use letterboxed::{BoxConfiguration, SolverBuilder};
///
/// let solver = SolverBuilder::new(BoxConfiguration::new(["AB", "CD", "EF", "GH"]))
///     .add_words(["ACE", "EGB", "BDFH", "BAD"])
///     .max_chain_length(3)
///     .build()
///     .unwrap();
///
/// let report = solver.solve_bfs().unwrap();
/// assert_eq!(report.solutions[0].to_string(), "ACE -> EGB -> BDFH");
/// ```
#[derive(Clone, Debug)]
pub struct SolverBuilder {
    config: BoxConfiguration,
    alphabet: Alphabet,
    words: Vec<String>,
    settings: SolverConfig,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl SolverBuilder {
    /// Start building a solver for the box `config`.
    ///
    /// The builder enters a [`TooManyLetters`](BuilderInvalidReason::TooManyLetters) invalid state if the box has
    /// more than [`MAX_LETTERS`](crate::letters::MAX_LETTERS) distinct letters.
    pub fn new(config: BoxConfiguration) -> Self {
        let mut invalid_reasons = Vec::new();
        let alphabet = config.alphabet().unwrap_or_else(|| {
            invalid_reasons.push(BuilderInvalidReason::TooManyLetters);
            Alphabet::default()
        });

        Self {
            config,
            alphabet,
            words: Vec::new(),
            settings: SolverConfig::default(),
            invalid_reasons,
        }
    }

    /// Add vocabulary entries, cleaning each one.
    pub fn add_words<S: AsRef<str>>(&mut self, words: impl IntoIterator<Item=S>) -> &mut Self {
        self.words.extend(words.into_iter().map(|word| clean_word(word.as_ref())));
        self
    }

    /// Longest chain accepted as a solution. Zero is replaced by [`DEFAULT_MAX_CHAIN_LENGTH`] with a warning at build.
    pub fn max_chain_length(&mut self, max_chain_length: usize) -> &mut Self {
        self.settings.max_chain_length = max_chain_length;
        self
    }

    /// Resource ceilings for each search and for the session.
    pub fn limits(&mut self, limits: Limits) -> &mut Self {
        self.settings.limits = limits;
        self
    }

    /// How solutions are deduplicated.
    pub fn fingerprint(&mut self, fingerprint: FingerprintMode) -> &mut Self {
        self.settings.fingerprint = fingerprint;
        self
    }

    /// Which letters a solution has to use.
    pub fn coverage(&mut self, coverage: CoverageTarget) -> &mut Self {
        self.settings.coverage = coverage;
        self
    }

    /// The order start words and successors are tried in.
    pub fn order(&mut self, order: WordOrder) -> &mut Self {
        self.settings.order = order;
        self
    }

    /// Replace every setting at once.
    pub fn settings(&mut self, settings: SolverConfig) -> &mut Self {
        self.settings = settings;
        self
    }

    /// Reject boxes with repeated letters or empty edges instead of accepting them as given.
    ///
    /// May cause the builder to enter [`DuplicateLetter`](BuilderInvalidReason::DuplicateLetter) or
    /// [`EmptyEdge`](BuilderInvalidReason::EmptyEdge) invalid states.
    pub fn strict_edges(&mut self) -> &mut Self {
        self.invalid_reasons.extend(self.config.edges().iter()
            .positions(|edge| edge.letters().is_empty())
            .map(BuilderInvalidReason::EmptyEdge));
        self.invalid_reasons.extend(self.config.duplicate_letters().into_iter()
            .map(BuilderInvalidReason::DuplicateLetter));
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Filter the vocabulary, order it and build the transition graph.
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Solver, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut settings = self.settings;
        if settings.max_chain_length == 0 {
            tracing::warn!("invalid max chain length 0, using default of {}", DEFAULT_MAX_CHAIN_LENGTH);
            settings.max_chain_length = DEFAULT_MAX_CHAIN_LENGTH;
        }

        // the graph is keyed by word, so repeats collapse onto the first occurrence
        let mut valid_words = self.words.iter()
            .filter(|word| !word.is_empty())
            .unique()
            .filter(|word| is_valid(word, &self.config))
            .cloned()
            .collect_vec();

        if let WordOrder::Shuffled { seed } = settings.order {
            valid_words.shuffle(&mut StdRng::seed_from_u64(seed));
        }

        let graph = WordGraph::build(&valid_words, self.alphabet.clone());
        let target = match settings.coverage {
            CoverageTarget::ValidWords => graph.letter_universe(),
            CoverageTarget::BoxLetters => self.alphabet.full_set(),
        };

        tracing::info!(
            words = self.words.len(),
            valid_words = graph.word_count(),
            transitions = graph.edge_count(),
            box_config = %self.config,
            "built word graph"
        );

        Ok(Solver { graph, target, config: settings })
    }
}
