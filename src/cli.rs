//! CLI interface for the skill matcher

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-matcher")]
#[command(about = "Extract skills from resumes and rank courses and projects against them")]
#[command(long_about = "Normalize resume and free-form skill text against a controlled vocabulary, merge skill sets, and rank course or project catalogs by TF-IDF cosine similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract skills from a document (PDF, TXT, MD)
    Extract {
        /// Path to the document
        path: PathBuf,

        /// Also print the extracted text
        #[arg(long)]
        show_text: bool,
    },

    /// Merge stored, resume and form-entered skills into one stored string
    Skills {
        /// Previously stored skills, e.g. "docker, python"
        #[arg(short, long)]
        existing: Option<String>,

        /// Resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Free-form skill text as typed into the profile form
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Rank a catalog against a skill set
    Rank {
        /// Which catalog to rank
        #[arg(value_enum)]
        kind: CatalogKind,

        /// Skills to rank against, in stored form
        #[arg(short, long)]
        skills: Option<String>,

        /// Derive skills from a resume instead of (or in addition to) --skills
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Catalog CSV; defaults to the configured path
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Maximum number of entries to display
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Keep running, re-ranking whenever the catalog is refreshed
        #[arg(short, long)]
        watch: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Courses,
    Projects,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
