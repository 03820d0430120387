use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Live counters shown under the string utilities input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextStats {
    /// Unicode scalar values.
    pub chars: usize,
    /// Whitespace-separated runs.
    pub words: usize,
    /// `\n`-separated lines; zero for empty input.
    pub lines: usize,
    /// Non-blank pieces between runs of `.`, `!`, `?`.
    pub sentences: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let blank = text.trim().is_empty();
        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: if text.is_empty() {
                0
            } else {
                text.split('\n').count()
            },
            sentences: if blank {
                0
            } else {
                SENTENCE_END
                    .split(text)
                    .filter(|piece| !piece.trim().is_empty())
                    .count()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_all_zero() {
        assert_eq!(TextStats::of(""), TextStats::default());
    }

    #[test]
    fn whitespace_only_still_counts_chars_and_lines() {
        let stats = TextStats::of("  \n ");
        assert_eq!(
            stats,
            TextStats {
                chars: 4,
                words: 0,
                lines: 2,
                sentences: 0
            }
        );
    }

    #[test]
    fn counts_a_short_paragraph() {
        let stats = TextStats::of("Hello there. How are you?\nFine... thanks!");
        assert_eq!(stats.words, 7);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.sentences, 4);
        assert_eq!(stats.chars, 41);
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(TextStats::of("no punctuation here").sentences, 1);
    }

    #[test]
    fn chars_are_scalar_values() {
        assert_eq!(TextStats::of("café ✓").chars, 6);
    }
}
