//! Text normalization and tokenization

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Tokenizer shared by skill extraction and vectorization.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    term_regex: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        // Two or more word characters, the usual TF-IDF term pattern.
        let term_regex = Regex::new(r"\b\w\w+\b").expect("Invalid term regex");
        Self { term_regex }
    }

    /// Lower-cased word tokens following Unicode word boundaries.
    ///
    /// Words joined by `.` or `'` stay together ("node.js"), hyphenated words
    /// split ("scikit", "learn").
    pub fn words(&self, text: &str) -> Vec<String> {
        normalize_unicode(text)
            .unicode_words()
            .map(str::to_lowercase)
            .collect()
    }

    /// Lower-cased vectorization terms.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let lowered = normalize_unicode(text).to_lowercase();
        self.term_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Map typographic punctuation onto its ASCII counterpart.
pub fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect()
}
