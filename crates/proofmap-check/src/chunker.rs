// Chunker: splits canonical text into bounded pieces for backend calls.
//
// Short texts go out whole. Long texts are cut after sentence terminators,
// and sentences that are still too long are cut after newlines and commas.
// Pieces that are blank, too short or have too few words are dropped.

use proofmap_core::character::{count_words, is_blank, is_part_separator, is_sentence_terminator};
use proofmap_core::range::TextRange;
use tracing::debug;

use crate::config::ChunkLimits;

/// A contiguous piece of canonical text sent to the backend in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the (trimmed) canonical text.
    pub range: TextRange,
    pub text: String,
}

impl Chunk {
    fn new(text: &[char], range: TextRange) -> Self {
        Self {
            range,
            text: text[range.start..range.end].iter().collect(),
        }
    }
}

/// Splits canonical text according to [`ChunkLimits`].
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    limits: ChunkLimits,
}

impl Chunker {
    pub fn new(limits: ChunkLimits) -> Self {
        Self { limits }
    }

    /// True if `text` is not worth a backend call.
    pub fn is_useless(&self, text: &[char]) -> bool {
        is_blank(text)
            || text.len() > self.limits.too_big_chars
            || text.len() < self.limits.min_chars
            || count_words(text) < self.limits.min_words
    }

    /// Split `text` into chunks, in text order.
    pub fn chunks(&self, text: &[char]) -> Vec<Chunk> {
        let whole = TextRange::new(0, text.len());
        if self.is_useless(text) {
            debug!(len = text.len(), "canonical text not worth checking");
            return Vec::new();
        }
        if text.len() < self.limits.max_chars {
            return vec![Chunk::new(text, whole)];
        }

        let mut chunks = Vec::new();
        for sentence in split_after(text, whole, is_sentence_terminator) {
            let sentence_text = &text[sentence.start..sentence.end];
            if self.is_useless(sentence_text) {
                continue;
            }
            if sentence.len() < self.limits.max_chars {
                chunks.push(Chunk::new(text, sentence));
                continue;
            }
            for part in split_after(text, sentence, is_part_separator) {
                if part.len() >= self.limits.max_chars {
                    debug!(
                        part_start = part.start,
                        part_end = part.end,
                        "skipping oversized part"
                    );
                    continue;
                }
                if !self.is_useless(&text[part.start..part.end]) {
                    chunks.push(Chunk::new(text, part));
                }
            }
        }
        debug!(len = text.len(), chunks = chunks.len(), "split long text");
        chunks
    }
}

/// Cut `range` of `text` after every character matching `is_separator`.
/// The separator stays with the piece before it; a trailing remainder is kept.
fn split_after(
    text: &[char],
    range: TextRange,
    is_separator: impl Fn(char) -> bool,
) -> Vec<TextRange> {
    let mut pieces = Vec::new();
    let mut start = range.start;
    for pos in range.start..range.end {
        if is_separator(text[pos]) {
            pieces.push(TextRange::new(start, pos + 1));
            start = pos + 1;
        }
    }
    if start < range.end {
        pieces.push(TextRange::new(start, range.end));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn small_limits() -> ChunkLimits {
        ChunkLimits {
            too_big_chars: 500,
            max_chars: 40,
            min_chars: 2,
            min_words: 3,
        }
    }

    #[test]
    fn short_text_is_one_chunk() {
        let text = chars("This is a test.");
        let chunks = Chunker::new(ChunkLimits::default()).chunks(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].range, TextRange::new(0, 15));
        assert_eq!(chunks[0].text, "This is a test.");
    }

    #[test]
    fn blank_text_has_no_chunks() {
        let chunker = Chunker::new(ChunkLimits::default());
        assert!(chunker.chunks(&chars("   \n ")).is_empty());
        assert!(chunker.chunks(&[]).is_empty());
    }

    #[test]
    fn too_few_words_has_no_chunks() {
        let chunker = Chunker::new(ChunkLimits::default());
        assert!(chunker.chunks(&chars("Two words")).is_empty());
        assert_eq!(chunker.chunks(&chars("Three words here")).len(), 1);
    }

    #[test]
    fn too_big_text_is_rejected() {
        let limits = small_limits();
        let text: Vec<char> = "word ".repeat(101).chars().collect();
        assert!(text.len() > limits.too_big_chars);
        assert!(Chunker::new(limits).chunks(&text).is_empty());
    }

    #[test]
    fn long_text_splits_on_sentences() {
        let text = chars("First sentence is here. Second one is here! Third is a question?");
        let chunks = Chunker::new(small_limits()).chunks(&text);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "First sentence is here.",
                " Second one is here!",
                " Third is a question?"
            ]
        );
        for chunk in &chunks {
            let expected: String = text[chunk.range.start..chunk.range.end].iter().collect();
            assert_eq!(chunk.text, expected);
        }
    }

    #[test]
    fn useless_sentences_are_skipped() {
        let text = chars("This sentence has enough words. Yes. And this one does too, surely.");
        let chunks = Chunker::new(small_limits()).chunks(&text);
        assert!(chunks.iter().all(|c| c.text != " Yes."));
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn long_sentence_splits_on_commas_and_newlines() {
        let text = chars(
            "alpha beta gamma delta, epsilon zeta eta theta\niota kappa lambda mu, nu xi omicron pi.",
        );
        let chunks = Chunker::new(small_limits()).chunks(&text);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "alpha beta gamma delta,",
                " epsilon zeta eta theta\n",
                "iota kappa lambda mu,",
                " nu xi omicron pi.",
            ]
        );
    }

    #[test]
    fn oversized_parts_are_skipped() {
        let long_part = "word ".repeat(10);
        let text: Vec<char> = format!("{long_part}, short part is fine here.")
            .chars()
            .collect();
        let chunks = Chunker::new(small_limits()).chunks(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, " short part is fine here.");
        assert_eq!(chunks[0].range.start, long_part.len() + 1);
    }

    #[test]
    fn chunks_are_ordered_and_disjoint() {
        let sentence = "The quick brown fox jumps over it. ";
        let text: Vec<char> = sentence.repeat(8).chars().collect();
        let chunks = Chunker::new(small_limits()).chunks(&text);
        assert_eq!(chunks.len(), 8);
        for pair in chunks.windows(2) {
            assert!(pair[0].range.end <= pair[1].range.start);
        }
    }

    #[test]
    fn split_after_keeps_separator_and_remainder() {
        let text = chars("a,b,c");
        let pieces = split_after(&text, TextRange::new(0, 5), is_part_separator);
        assert_eq!(
            pieces,
            vec![
                TextRange::new(0, 2),
                TextRange::new(2, 4),
                TextRange::new(4, 5)
            ]
        );
    }
}
