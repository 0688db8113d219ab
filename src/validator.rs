use itertools::Itertools;

use crate::board::BoxConfiguration;

/// Characters removed from vocabulary entries on ingestion, so compounds like `"CAT-NAP"` become one word.
pub(crate) const STRIPPED_CHARS: [char; 3] = ['-', '\'', ' '];

/// Strip hyphens, apostrophes and spaces from `raw` and upper-case the rest.
pub fn clean_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Whether `word` may be played on the box described by `config`.
///
/// A word is valid when every letter sits on some edge and no two consecutive letters sit on the same edge.
/// The empty word and single letters are vacuously valid.
pub fn is_valid(word: &str, config: &BoxConfiguration) -> bool {
    let edge_of = config.edge_map();

    let Some(edges) = word.chars().map(|letter| edge_of.get(&letter)).collect::<Option<Vec<_>>>() else {
        return false;
    };

    edges.into_iter().tuple_windows().all(|(a, b)| a != b)
}

/// Keep the words of `words` valid under `config`, preserving order.
pub fn filter_valid_words<S: AsRef<str>>(words: &[S], config: &BoxConfiguration) -> Vec<String> {
    words.iter()
        .map(AsRef::as_ref)
        .filter(|word| is_valid(word, config))
        .map(str::to_owned)
        .collect_vec()
}
