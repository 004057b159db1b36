//! Text cleaning, normalization and word tokenization

use regex::Regex;

/// Characters that separate words in addition to whitespace.
const WORD_SEPARATORS: &[char] = &[',', ';', '/', '|', '(', ')', '[', ']', '{', '}', '"', '<', '>'];

pub struct TextNormalizer {
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        Self { whitespace_regex }
    }

    /// Collapse whitespace, drop non-printable characters and fold
    /// typographic punctuation to ASCII. Case is preserved.
    pub fn clean_text(&self, text: &str) -> String {
        let collapsed = self.whitespace_regex.replace_all(text, " ");

        collapsed
            .chars()
            .filter(|c| is_printable(*c))
            .map(fold_punctuation)
            .collect::<String>()
            .trim()
            .to_string()
    }
}

/// Lowercased word tokens in document order.
pub fn tokenize(text: &str) -> Vec<String> {
    split_words(text).map(|w| w.to_lowercase()).collect()
}

/// Split text into word tokens, keeping their original casing.
///
/// Tokens keep inner punctuation (`node.js`, `b.tech`) and the `+`/`#`
/// suffixes of language names (`c++`, `c#`); surrounding punctuation is
/// trimmed.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || WORD_SEPARATORS.contains(&c))
        .map(trim_token)
        .filter(|t| !t.is_empty())
}

fn trim_token(token: &str) -> &str {
    token
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
}

fn is_printable(c: char) -> bool {
    !c.is_control() && !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}' | '\u{00AD}')
}

fn fold_punctuation(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2013}' | '\u{2014}' => '-',
        '\u{00A0}' => ' ',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let normalizer = TextNormalizer::new();
        let cleaned = normalizer.clean_text("  John   Doe\n\n\tSoftware\u{200B} Engineer  ");
        assert_eq!(cleaned, "John Doe Software Engineer");
    }

    #[test]
    fn test_clean_text_folds_smart_quotes() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.clean_text("\u{201C}Rust\u{201D} \u{2013} it\u{2019}s fast"), "\"Rust\" - it's fast");
    }

    #[test]
    fn test_tokenize_keeps_language_suffixes() {
        let tokens = tokenize("Skills: C++, C#, Node.js (backend), Python/Docker.");

        assert_eq!(
            tokens,
            vec!["skills", "c++", "c#", "node.js", "backend", "python", "docker"]
        );
    }

    #[test]
    fn test_split_words_drops_pure_punctuation() {
        let words: Vec<&str> = split_words("Required: -- 5 years ...").collect();
        assert_eq!(words, vec!["Required", "5", "years"]);
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.clean_text(""), "");
        assert!(tokenize("").is_empty());
    }
}
