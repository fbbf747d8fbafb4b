//! Candidate records: courses and projects

use crate::error::{Result, SkillMatchError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Anything the ranker can score: a stable identity plus descriptive text.
pub trait Candidate {
    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Short description for presentation.
    fn snippet(&self) -> &str;

    fn url(&self) -> Option<&str>;

    /// Text vectorized against the query.
    fn ranking_text(&self) -> Cow<'_, str>;
}

fn require(field: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(SkillMatchError::MissingField(field.to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
}

impl Course {
    /// Build a course; every field is required and must not be blank.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: require("id", id)?,
            title: require("title", title)?,
            description: require("description", description)?,
            author: require("author", author)?,
            url: require("url", url)?,
        })
    }
}

impl Candidate for Course {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn snippet(&self) -> &str {
        &self.description
    }

    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }

    fn ranking_text(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.title, self.description))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub url: Option<String>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        required_skills: impl Into<String>,
        url: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: require("id", id)?,
            title: require("title", title)?,
            description: require("description", description)?,
            required_skills: require("required_skills", required_skills)?,
            url: optional(url),
        })
    }
}

impl Candidate for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn snippet(&self) -> &str {
        &self.description
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn ranking_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.required_skills)
    }
}
