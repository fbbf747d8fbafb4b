//! Candidate catalogs: courses and projects supplied to the ranker

pub mod candidate;
pub mod loader;
pub mod store;
