//! Vocabulary-driven skill extraction from free text

use crate::processing::skill_set::{Skill, SkillSet};
use crate::processing::tokenizer::{normalize_unicode, Tokenizer};
use crate::processing::vocabulary::{MatchMode, Vocabulary};
use log::{debug, info};

/// Extracts canonical skills from text using a borrowed vocabulary.
pub struct SkillExtractor<'a> {
    vocabulary: &'a Vocabulary,
    tokenizer: Tokenizer,
}

#[derive(Debug, Clone, Copy)]
struct PhraseHit {
    start: usize,
    end: usize,
    term: usize,
}

impl<'a> SkillExtractor<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Skills found in `text`, in order of first occurrence.
    ///
    /// Unknown words are discarded; there is no fuzzy matching.
    pub fn extract(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            info!("No text provided for skill extraction.");
            return SkillSet::new();
        }

        let skills = match self.vocabulary.match_mode() {
            MatchMode::Phrases => self.extract_phrases(text),
            MatchMode::SingleTokens => self.extract_tokens(text),
        };

        debug!("Extracted skills: [{}]", skills);
        skills
    }

    fn extract_tokens(&self, text: &str) -> SkillSet {
        let words = self.tokenizer.words(text);
        debug!("Tokens in text: {:?}", words);

        words
            .iter()
            .filter(|word| self.vocabulary.contains(word))
            .filter_map(|word| Skill::new(word))
            .collect()
    }

    fn extract_phrases(&self, text: &str) -> SkillSet {
        // Vocabulary terms are lower-case with single spaces; match the text in the same shape.
        let normalized = normalize_unicode(text)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let mut hits: Vec<PhraseHit> = self
            .vocabulary
            .matcher()
            .find_overlapping_iter(&normalized)
            .map(|m| PhraseHit {
                start: m.start(),
                end: m.end(),
                term: m.pattern().as_usize(),
            })
            .filter(|hit| is_whole_word(&normalized, hit.start, hit.end))
            .collect();

        // Leftmost first, longest first at the same offset.
        hits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut covered_until = 0;
        let mut accepted = Vec::new();
        for hit in hits {
            if hit.start >= covered_until {
                covered_until = hit.end;
                accepted.push(self.vocabulary.term(hit.term).clone());
            }
        }

        accepted.into_iter().collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Extract skills from optional text; `None` and blank text yield an empty set.
pub fn extract_skills(vocabulary: &Vocabulary, text: Option<&str>) -> SkillSet {
    match text {
        Some(text) => SkillExtractor::new(vocabulary).extract(text),
        None => {
            info!("No text provided for skill extraction.");
            SkillSet::new()
        }
    }
}
