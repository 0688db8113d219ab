use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::SolverError;

/// Read a word list with one word per line, such as the `2of12` lists from 12dicts.
pub fn read_word_list(path: impl AsRef<Path>) -> Result<Vec<String>, SolverError> {
    let file = File::open(path.as_ref())?;
    let words = parse_word_list(BufReader::new(file))?;
    tracing::debug!(path = %path.as_ref().display(), words = words.len(), "read word list");
    Ok(words)
}

/// Parse one word per line, trimmed and upper-cased. Blank lines are skipped.
pub fn parse_word_list(reader: impl BufRead) -> Result<Vec<String>, SolverError> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_uppercase());
        }
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::error::SolverError;

    use super::{parse_word_list, read_word_list};

    #[test]
    fn parses_lines() {
        let words = parse_word_list(Cursor::new("apple\n  banana \n\ncherry\n")).unwrap();
        assert_eq!(words, vec!["APPLE", "BANANA", "CHERRY"]);
    }

    #[test]
    fn reads_files() {
        let path = std::env::temp_dir().join(format!("letterboxed-words-{}.txt", std::process::id()));
        std::fs::write(&path, "ace\negb\n").unwrap();
        let words = read_word_list(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(words.unwrap(), vec!["ACE", "EGB"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = read_word_list("/definitely/not/a/word/list.txt");
        assert!(matches!(result, Err(SolverError::Io(_))));
    }
}
