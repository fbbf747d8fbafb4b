//! Skill extraction, merging and relevance ranking

pub mod profile;
pub mod ranker;
pub mod skill_extractor;
pub mod skill_set;
pub mod tfidf;
pub mod tokenizer;
pub mod vocabulary;
