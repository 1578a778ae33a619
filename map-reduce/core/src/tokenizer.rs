//! Line normalization and tokenization.
//!
//! A line is lower-cased, stripped of ASCII punctuation by deletion and split
//! on whitespace. Deleting punctuation joins its neighbours, so `don't`
//! becomes `dont` while `a , b` still yields two tokens.

/// ASCII punctuation removed from every line
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A lower-cased, punctuation-free line ready to be split into tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    text: String,
}

impl NormalizedLine {
    pub fn new(line: &str) -> Self {
        let text = line
            .to_lowercase()
            .chars()
            .filter(|c| !is_punctuation(*c))
            .collect();
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lazily yields the tokens of this line; may be called repeatedly
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.text.split(is_separator).filter(|token| !token.is_empty())
    }
}

/// Normalizes `line` and collects its tokens
pub fn tokenize(line: &str) -> Vec<String> {
    NormalizedLine::new(line)
        .tokens()
        .map(str::to_owned)
        .collect()
}

/// Decodes bytes as Latin-1: every byte maps to the code point of equal value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii() && PUNCTUATION.contains(c)
}

// Unicode whitespace plus the ASCII information separators 0x1C..=0x1F
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
