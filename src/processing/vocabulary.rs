//! Controlled skill vocabulary

use crate::error::{Result, SkillMatchError};
use crate::processing::skill_set::{Skill, SkillSet};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical technology and skill terms recognized out of the box.
pub const DEFAULT_SKILL_TERMS: &[&str] = &[
    "python", "django", "machine learning", "javascript", "react",
    "java", "sql", "html", "css", "data analysis", "flask",
    "node.js", "angular", "vue.js", "docker", "kubernetes",
    "aws", "azure", "git", "rest api", "graphql", "mongodb",
    "postgresql", "linux", "bash", "pandas", "numpy", "tensorflow",
    "pytorch", "scikit-learn", "big data", "spark", "hadoop",
];

/// How free text is matched against the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Whole-word phrase scanning; multi-word and punctuated entries match.
    #[default]
    Phrases,
    /// Word-level tokens compared one by one against the vocabulary.
    SingleTokens,
}

/// An immutable set of canonical skill terms plus the matcher built over them.
///
/// Built once (usually from configuration) and shared by reference.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<Skill>,
    lookup: HashSet<String>,
    matcher: AhoCorasick,
    match_mode: MatchMode,
}

impl Vocabulary {
    pub fn new<I, S>(terms: I, match_mode: MatchMode) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skills = Vec::new();
        let mut lookup = HashSet::new();

        for term in terms {
            let skill = Skill::new(term.as_ref()).ok_or_else(|| {
                SkillMatchError::Vocabulary("Vocabulary terms must not be blank".to_string())
            })?;
            if lookup.insert(skill.as_str().to_string()) {
                skills.push(skill);
            }
        }

        if skills.is_empty() {
            return Err(SkillMatchError::Vocabulary("Vocabulary is empty".to_string()));
        }

        let patterns: Vec<&str> = skills.iter().map(Skill::as_str).collect();
        // Terms are lower-cased already; the extractor lower-cases the text.
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| SkillMatchError::Vocabulary(format!("Failed to build matcher: {}", e)))?;

        Ok(Self {
            terms: skills,
            lookup,
            matcher,
            match_mode,
        })
    }

    pub fn with_match_mode(&self, match_mode: MatchMode) -> Self {
        Self {
            match_mode,
            ..self.clone()
        }
    }

    pub fn terms(&self) -> &[Skill] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Exact, already-normalized lookup.
    pub fn contains(&self, token: &str) -> bool {
        self.lookup.contains(token)
    }

    pub fn term(&self, index: usize) -> &Skill {
        &self.terms[index]
    }

    pub(crate) fn matcher(&self) -> &AhoCorasick {
        &self.matcher
    }

    /// Drop every skill that is not a vocabulary term.
    pub fn retain_known(&self, skills: &SkillSet) -> SkillSet {
        skills
            .iter()
            .filter(|skill| self.contains(skill.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILL_TERMS.iter().copied(), MatchMode::default())
            .expect("built-in vocabulary is non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.len(), DEFAULT_SKILL_TERMS.len());
        assert!(vocab.contains("machine learning"));
        assert!(vocab.contains("node.js"));
        assert!(!vocab.contains("giraffe"));
    }

    #[test]
    fn test_terms_are_normalized_and_deduplicated() {
        let vocab = Vocabulary::new(["  Rust ", "rust", "GO"], MatchMode::Phrases).unwrap();
        let terms: Vec<&str> = vocab.terms().iter().map(Skill::as_str).collect();
        assert_eq!(terms, vec!["rust", "go"]);
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let empty: [&str; 0] = [];
        assert!(Vocabulary::new(empty, MatchMode::Phrases).is_err());
        assert!(Vocabulary::new(["python", "   "], MatchMode::Phrases).is_err());
    }

    #[test]
    fn test_retain_known() {
        let vocab = Vocabulary::default();
        let skills = SkillSet::parse_stored("python, cobol, sql");
        assert_eq!(vocab.retain_known(&skills).to_stored(), "python, sql");
    }
}
