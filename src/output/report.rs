//! Presentation-ready ranking reports

use crate::catalog::candidate::Candidate;
use crate::config::RankingConfig;
use crate::processing::ranker::RankedResult;
use crate::processing::skill_set::SkillSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub query_skills: SkillSet,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub matcher_version: String,
    pub catalog_kind: String,
    pub catalog_source: String,
    pub catalog_size: usize,
    /// Entries dropped by the display limit or similarity floor.
    pub omitted: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub rank: usize,
    pub score: f64,
    pub id: String,
    pub name: String,
    pub snippet: String,
    pub url: Option<String>,
}

impl ReportEntry {
    pub fn from_result<C: Candidate>(result: &RankedResult<'_, C>) -> Self {
        let candidate = result.candidate;
        Self {
            rank: result.rank,
            score: result.score,
            id: candidate.id().to_string(),
            name: candidate.display_name().to_string(),
            snippet: candidate.snippet().to_string(),
            url: candidate.url().map(str::to_string),
        }
    }

    pub fn score_percentage(&self) -> u8 {
        (self.score * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl RankingReport {
    /// Apply the display settings to a full ranking.
    pub fn build<C: Candidate>(
        catalog_kind: &str,
        catalog_source: &str,
        query_skills: &SkillSet,
        results: &[RankedResult<'_, C>],
        settings: &RankingConfig,
    ) -> Self {
        let entries: Vec<ReportEntry> = results
            .iter()
            .filter(|r| r.score >= settings.min_similarity)
            .take(settings.max_results)
            .map(ReportEntry::from_result)
            .collect();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                catalog_kind: catalog_kind.to_string(),
                catalog_source: catalog_source.to_string(),
                catalog_size: results.len(),
                omitted: results.len() - entries.len(),
            },
            query_skills: query_skills.clone(),
            entries,
        }
    }
}
