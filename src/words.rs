use std::fmt;
use std::path::Path;

/// Number of maximal non-whitespace runs in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub file_name: String,
    pub words: usize,
}

impl WordCount {
    pub fn new(path: &Path, text: &str) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            file_name,
            words: count_words(text),
        }
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word count for '{}': {}", self.file_name, self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_input_has_no_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \t\n\r\n  "), 0);
    }

    #[test]
    fn runs_of_mixed_whitespace_separate_words() {
        assert_eq!(count_words("The quick  brown\tfox\n"), 4);
        assert_eq!(count_words("  leading and trailing  "), 3);
        assert_eq!(count_words("Hello world\n\nFoo"), 3);
    }

    #[test]
    fn unicode_whitespace_splits_words() {
        assert_eq!(count_words("one\u{00A0}two\u{2003}three\u{3000}four"), 4);
        assert_eq!(count_words("naïve café façade"), 3);
    }

    #[test]
    fn punctuation_stays_attached() {
        assert_eq!(count_words("well-known, e.g. it's -- fine."), 5);
    }

    #[test]
    fn counting_twice_gives_the_same_answer() {
        let text = "A\nB C\nD";
        assert_eq!(count_words(text), count_words(text));
    }

    #[test]
    fn report_uses_the_base_name() {
        let report = WordCount::new(Path::new("some/dir/notes.md"), "a b c");
        assert_eq!(report.file_name, "notes.md");
        assert_eq!(report.to_string(), "Word count for 'notes.md': 3");
    }
}
