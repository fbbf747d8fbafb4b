//! Normalized skills, skill sets and merging

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Separator of the stored skill string, e.g. `"docker, python, sql"`.
pub const STORED_SEPARATOR: &str = ", ";

/// A single skill token: trimmed, lower-cased and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Skill(String);

impl Skill {
    /// Normalize raw text into a skill; blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if normalized.is_empty() {
            None
        } else {
            Some(Skill(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Skill {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Skill::new(&value).ok_or_else(|| "skill must not be blank".to_string())
    }
}

impl From<Skill> for String {
    fn from(skill: Skill) -> Self {
        skill.0
    }
}

/// An ordered, duplicate-free sequence of skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Skill>", into = "Vec<Skill>")]
pub struct SkillSet {
    skills: Vec<Skill>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the stored comma-separated form. Blank items and repeats are dropped.
    pub fn parse_stored(stored: &str) -> Self {
        stored.split(',').filter_map(Skill::new).collect()
    }

    /// Render the stored form. The caller decides whether to sort first.
    pub fn to_stored(&self) -> String {
        self.skills
            .iter()
            .map(Skill::as_str)
            .collect::<Vec<_>>()
            .join(STORED_SEPARATOR)
    }

    /// Space-joined query text used for vectorization.
    pub fn to_query(&self) -> String {
        self.skills
            .iter()
            .map(Skill::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        Skill::new(skill).is_some_and(|s| self.skills.contains(&s))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Skill> {
        self.skills.iter()
    }

    pub fn as_slice(&self) -> &[Skill] {
        &self.skills
    }

    pub fn sorted(&self) -> SkillSet {
        let mut skills = self.skills.clone();
        skills.sort();
        SkillSet { skills }
    }
}

impl FromIterator<Skill> for SkillSet {
    fn from_iter<T: IntoIterator<Item = Skill>>(iter: T) -> Self {
        let mut seen = HashSet::new();
        let skills = iter
            .into_iter()
            .filter(|skill| seen.insert(skill.clone()))
            .collect();
        SkillSet { skills }
    }
}

impl From<Vec<Skill>> for SkillSet {
    fn from(skills: Vec<Skill>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<Skill> {
    fn from(set: SkillSet) -> Self {
        set.skills
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a Skill;
    type IntoIter = std::slice::Iter<'a, Skill>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}

impl fmt::Display for SkillSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_stored())
    }
}

/// Union of the three skill sources, de-duplicated and sorted lexicographically.
pub fn merge(existing: &SkillSet, from_resume: &SkillSet, from_form: &SkillSet) -> SkillSet {
    existing
        .iter()
        .chain(from_resume)
        .chain(from_form)
        .cloned()
        .collect::<SkillSet>()
        .sorted()
}
