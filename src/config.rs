//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatchError};
use crate::processing::vocabulary::{MatchMode, Vocabulary, DEFAULT_SKILL_TERMS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub catalog: CatalogConfig,
    pub ranking: RankingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub terms: Vec<String>,
    #[serde(default)]
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub courses_path: Option<PathBuf>,
    pub projects_path: Option<PathBuf>,
    pub refresh_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Display limit; ranking itself always orders the full catalog.
    pub max_results: usize,
    pub min_similarity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: VocabularyConfig {
                terms: DEFAULT_SKILL_TERMS.iter().map(|s| s.to_string()).collect(),
                match_mode: MatchMode::Phrases,
            },
            catalog: CatalogConfig::default(),
            ranking: RankingConfig {
                max_results: 10,
                min_similarity: 0.0,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load `config_path`, writing defaults there on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| SkillMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.terms.iter().all(|t| t.trim().is_empty()) {
            return Err(SkillMatchError::Configuration(
                "vocabulary.terms must contain at least one term".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.ranking.min_similarity) {
            return Err(SkillMatchError::Configuration(format!(
                "ranking.min_similarity must be within [0, 1], got {}",
                self.ranking.min_similarity
            )));
        }

        if self.catalog.refresh_interval_secs == Some(0) {
            return Err(SkillMatchError::Configuration(
                "catalog.refresh_interval_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the immutable vocabulary handed to the skill extractor.
    pub fn build_vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::new(&self.vocabulary.terms, self.vocabulary.match_mode)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.catalog.refresh_interval_secs.map(Duration::from_secs)
    }
}
