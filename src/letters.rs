use std::fmt::{Debug, Formatter};

use itertools::Itertools;

/// Index of a letter within an [`Alphabet`].
pub type LetterIndex = usize;

/// The most distinct letters an [`Alphabet`] can index, bounded by the width of [`LetterSet`].
pub const MAX_LETTERS: usize = u64::BITS as usize;

/// A set of letters drawn from one [`Alphabet`], stored as a bitmask over letter indices.
///
/// Equality is set equality, so two sets built from the same letters in a different order compare equal.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LetterSet(u64);

impl LetterSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub(crate) fn with(self, index: LetterIndex) -> Self {
        Self(self.0 | (1 << index))
    }

    /// Whether the letter with the given index is present.
    #[inline]
    pub fn contains(self, index: LetterIndex) -> bool {
        index < MAX_LETTERS && self.0 & (1 << index) != 0
    }

    /// Set union.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Letters in `self` that are not in `other`.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether `self` contains every letter of `other`.
    #[inline]
    pub fn is_superset(self, other: Self) -> bool {
        other.difference(self).is_empty()
    }

    /// Whether the set has no letters.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of letters in the set.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Indices of the letters in this set, ascending.
    pub fn indices(self) -> impl Iterator<Item=LetterIndex> {
        (0..MAX_LETTERS).filter(move |index| self.contains(*index))
    }
}

impl Debug for LetterSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LetterSet({:#b})", self.0)
    }
}

/// The ordered, distinct letters of a puzzle, each assigned a [`LetterIndex`] by first appearance.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Collect the distinct letters of `letters` in first-appearance order.
    ///
    /// Returns `None` if there are more than [`MAX_LETTERS`] distinct letters.
    pub fn new(letters: impl IntoIterator<Item=char>) -> Option<Self> {
        let letters = letters.into_iter().unique().collect_vec();
        if letters.len() > MAX_LETTERS {
            return None;
        }

        Some(Self { letters })
    }

    /// The index of `letter`, if it is part of this alphabet.
    #[inline]
    pub fn index_of(&self, letter: char) -> Option<LetterIndex> {
        self.letters.iter().position(|l| *l == letter)
    }

    /// The letter at `index`, if any.
    #[inline]
    pub fn letter_at(&self, index: LetterIndex) -> Option<char> {
        self.letters.get(index).copied()
    }

    /// Number of distinct letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether the alphabet has no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Every letter of this alphabet as a [`LetterSet`].
    pub fn full_set(&self) -> LetterSet {
        (0..self.letters.len()).fold(LetterSet::EMPTY, LetterSet::with)
    }

    /// The set of letters in `word`, or `None` if `word` uses a letter outside this alphabet.
    pub fn set_of(&self, word: &str) -> Option<LetterSet> {
        word.chars().try_fold(LetterSet::EMPTY, |set, letter| Some(set.with(self.index_of(letter)?)))
    }

    /// Resolve the letters of `set` back to characters, in alphabet order.
    pub fn letters_of(&self, set: LetterSet) -> Vec<char> {
        set.indices()
            .filter_map(|index| self.letter_at(index))
            .collect_vec()
    }
}
