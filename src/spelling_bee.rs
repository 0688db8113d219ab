use std::collections::BTreeSet;

use itertools::Itertools;

use crate::validator::clean_word;

/// Bonus added to the score of a word using every puzzle letter.
pub const PANGRAM_BONUS: u32 = 7;

/// A Spelling Bee puzzle: a center letter that every word must use, plus the other letters allowed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpellingBee {
    center: char,
    letters: BTreeSet<char>,
}

impl SpellingBee {
    /// The first letter of `letters` is the center letter. Returns `None` if `letters` is empty.
    pub fn new(letters: &str) -> Option<Self> {
        let letters = letters.chars().flat_map(char::to_uppercase).collect_vec();
        let center = *letters.first()?;
        Some(Self { center, letters: letters.into_iter().collect() })
    }

    /// The letter every word must use.
    pub fn center(&self) -> char {
        self.center
    }

    /// Whether `word` uses the center letter and no letter outside the puzzle.
    pub fn is_valid_word(&self, word: &str) -> bool {
        word.contains(self.center) && word.chars().all(|c| self.letters.contains(&c))
    }

    /// Whether `word` uses every puzzle letter and nothing else.
    pub fn is_pangram(&self, word: &str) -> bool {
        word.chars().collect::<BTreeSet<_>>() == self.letters
    }

    /// Words under four letters score nothing and four-letter words score one. Longer words score their length,
    /// plus [`PANGRAM_BONUS`] for a pangram.
    pub fn score(&self, word: &str) -> u32 {
        match word.chars().count() {
            0..=3 => 0,
            4 => 1,
            len => len as u32 + if self.is_pangram(word) { PANGRAM_BONUS } else { 0 },
        }
    }

    /// Score every valid word of `words`, best first. Words scoring nothing are left out.
    pub fn solve<S: AsRef<str>>(&self, words: &[S]) -> Vec<(String, u32)> {
        let scored = words.iter()
            .map(|word| clean_word(word.as_ref()))
            .filter(|word| self.is_valid_word(word))
            .unique()
            .map(|word| {
                let score = self.score(&word);
                (word, score)
            })
            .filter(|(_, score)| *score > 0)
            .sorted_by(|(a_word, a_score), (b_word, b_score)| b_score.cmp(a_score).then_with(|| a_word.cmp(b_word)))
            .collect_vec();

        for (word, _) in scored.iter().filter(|(word, _)| self.is_pangram(word)) {
            tracing::info!(word = word.as_str(), "pangram");
        }

        scored
    }
}
