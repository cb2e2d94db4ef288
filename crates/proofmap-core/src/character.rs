// Character classification used by the canonical text builder and chunker.

// ---------------------------------------------------------------------------
// Whitespace and quotes
// ---------------------------------------------------------------------------

/// Check whether a character is whitespace.
///
/// Covers ASCII control whitespace, the Unicode space separators, and the
/// line/paragraph separators. No-break spaces count as whitespace.
pub fn is_whitespace(c: char) -> bool {
    let cp = c as u32;
    (0x09..=0x0D).contains(&cp)
        || cp == 0x20
        || cp == 0x85
        || cp == 0xA0
        || cp == 0x1680
        || (0x2000..=0x200A).contains(&cp)
        || cp == 0x2028
        || cp == 0x2029
        || cp == 0x202F
        || cp == 0x205F
        || cp == 0x3000
}

/// Check whether a character is a quotation mark that may wrap a whole text
/// fragment (string literals, quoted attribute values, quoted prose).
pub fn is_quote_mark(c: char) -> bool {
    matches!(
        c,
        '"' | '\''
            | '`'
            | '\u{00AB}' // « LEFT-POINTING DOUBLE ANGLE QUOTATION MARK
            | '\u{00BB}' // » RIGHT-POINTING DOUBLE ANGLE QUOTATION MARK
            | '\u{2018}' // LEFT SINGLE QUOTATION MARK
            | '\u{2019}' // RIGHT SINGLE QUOTATION MARK
            | '\u{201C}' // LEFT DOUBLE QUOTATION MARK
            | '\u{201D}' // RIGHT DOUBLE QUOTATION MARK
            | '\u{201E}' // DOUBLE LOW-9 QUOTATION MARK
    )
}

/// True if every character is whitespace (or there are none).
pub fn is_blank(text: &[char]) -> bool {
    text.iter().all(|&c| is_whitespace(c))
}

// ---------------------------------------------------------------------------
// Trimming
// ---------------------------------------------------------------------------

/// Number of characters to strip from the start of `text`: leading whitespace,
/// an opening quote mark, and the whitespace after it.
pub fn leading_trim_len(text: &[char]) -> usize {
    let mut pos = skip_whitespace(text.iter().copied());
    if text.get(pos).is_some_and(|&c| is_quote_mark(c)) {
        pos += 1;
        pos += skip_whitespace(text[pos..].iter().copied());
    }
    pos
}

/// Number of characters to strip from the end of `text`: trailing whitespace,
/// a closing quote mark, and the whitespace before it.
pub fn trailing_trim_len(text: &[char]) -> usize {
    let mut len = skip_whitespace(text.iter().rev().copied());
    let rest = text.len() - len;
    if rest > 0 && is_quote_mark(text[rest - 1]) {
        len += 1;
        len += skip_whitespace(text[..rest - 1].iter().rev().copied());
    }
    len
}

fn skip_whitespace(chars: impl Iterator<Item = char>) -> usize {
    chars.take_while(|&c| is_whitespace(c)).count()
}

// ---------------------------------------------------------------------------
// Sentences and words
// ---------------------------------------------------------------------------

/// Characters that end a sentence for chunking purposes.
pub fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | ';')
}

/// Characters that separate parts of an overlong sentence.
pub fn is_part_separator(c: char) -> bool {
    matches!(c, '\n' | ',')
}

/// Characters that make up word-like tokens.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Number of maximal runs of word characters in `text`.
pub fn count_words(text: &[char]) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for &c in text {
        let word = is_word_char(c);
        if word && !in_word {
            count += 1;
        }
        in_word = word;
    }
    count
}
