//! Skill matcher library
//!
//! Turns resumes and free-form skill entries into normalized skill sets and
//! ranks course and project catalogs against them with TF-IDF cosine
//! similarity.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use catalog::candidate::{Candidate, Course, Project};
pub use config::Config;
pub use error::{Result, SkillMatchError};
pub use input::text_extractor::{extract_text, Document};
pub use processing::ranker::{rank, RankedResult, RelevanceRanker};
pub use processing::skill_extractor::{extract_skills, SkillExtractor};
pub use processing::skill_set::{merge, Skill, SkillSet};
pub use processing::vocabulary::{MatchMode, Vocabulary};
