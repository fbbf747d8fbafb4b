//! Skill matcher: skill extraction and relevance ranking CLI

use anyhow::{bail, Context};
use clap::Parser;
use log::{error, info};
use skill_matcher::catalog::candidate::{Course, Project};
use skill_matcher::catalog::loader::{Catalog, CatalogRecord};
use skill_matcher::catalog::store::CatalogStore;
use skill_matcher::cli::{self, CatalogKind, Cli, Commands, ConfigAction};
use skill_matcher::config::{Config, OutputFormat};
use skill_matcher::input::text_extractor::{extract_text, try_extract_text, Document};
use skill_matcher::output::formatter::{save_report_to_file, ReportGenerator};
use skill_matcher::output::report::RankingReport;
use skill_matcher::processing::profile::{build_profile_skills, ProfileSkillsRequest};
use skill_matcher::processing::ranker::RelevanceRanker;
use skill_matcher::processing::skill_extractor::SkillExtractor;
use skill_matcher::processing::skill_set::{merge, SkillSet};
use skill_matcher::processing::vocabulary::Vocabulary;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path) {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config, config_path: &Path) -> anyhow::Result<()> {
    let vocabulary = config
        .build_vocabulary()
        .context("Failed to build skill vocabulary")?;

    match command {
        Commands::Extract { path, show_text } => {
            check_document(&path)?;

            let text = try_extract_text(&Document::from_path(&path))
                .with_context(|| format!("Could not extract text from {}", path.display()))?;

            if show_text {
                println!("{}\n", text);
            }

            let skills = SkillExtractor::new(&vocabulary).extract(&text);
            println!("{}", skills.sorted().to_stored());
        }

        Commands::Skills { existing, resume, text } => {
            if let Some(path) = &resume {
                check_document(path)?;
            }

            let request = ProfileSkillsRequest {
                existing,
                resume: resume.map(Document::from_path),
                form_text: text,
            };
            let skills = build_profile_skills(&vocabulary, &request)?;

            info!(
                "Resume: [{}] | Form: [{}]",
                skills.from_resume, skills.from_form
            );
            println!("{}", skills.stored());
        }

        Commands::Rank {
            kind,
            skills,
            resume,
            catalog,
            limit,
            output,
            save,
            watch,
        } => {
            let query = query_skills(&vocabulary, skills.as_deref(), resume.as_deref())?;

            let mut config = config;
            if let Some(limit) = limit {
                config.ranking.max_results = limit;
            }
            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };
            let target = RankTarget {
                query: &query,
                config: &config,
                format,
                save: save.as_deref(),
            };

            match kind {
                CatalogKind::Courses => {
                    let path = catalog_path(catalog, config.catalog.courses_path.clone(), "courses_path")?;
                    rank_catalog::<Course>(&path, &target, watch)?;
                }
                CatalogKind::Projects => {
                    let path = catalog_path(catalog, config.catalog.projects_path.clone(), "projects_path")?;
                    rank_catalog::<Project>(&path, &target, watch)?;
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration: {}\n", config_path.display());
                println!("Vocabulary ({} terms, {:?}):", vocabulary.len(), vocabulary.match_mode());
                let terms: Vec<&str> = vocabulary.terms().iter().map(|t| t.as_str()).collect();
                println!("  {}", terms.join(", "));
                println!("\nCatalogs:");
                println!("  Courses: {}", display_path(config.catalog.courses_path.as_deref()));
                println!("  Projects: {}", display_path(config.catalog.projects_path.as_deref()));
                if let Some(interval) = config.refresh_interval() {
                    println!("  Refresh every {}s", interval.as_secs());
                }
                println!("\nRanking:");
                println!("  Max results: {}", config.ranking.max_results);
                println!("  Min similarity: {:.2}", config.ranking.min_similarity);
                println!("\nOutput format: {:?}", config.output.format);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default()
                    .save_to(config_path)
                    .context("Failed to reset configuration")?;
                println!("Configuration reset to defaults at {}", config_path.display());
            }
        },
    }

    Ok(())
}

fn check_document(path: &Path) -> anyhow::Result<()> {
    cli::validate_file_extension(path, DOCUMENT_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

/// Skills given on the command line merged with those found in a resume.
fn query_skills(vocabulary: &Vocabulary, skills: Option<&str>, resume: Option<&Path>) -> anyhow::Result<SkillSet> {
    let given = skills.map(SkillSet::parse_stored).unwrap_or_default();

    let from_resume = match resume {
        Some(path) => {
            check_document(path)?;
            match extract_text(&Document::from_path(path)) {
                Some(text) => SkillExtractor::new(vocabulary).extract(&text),
                None => bail!("No text could be extracted from {}", path.display()),
            }
        }
        None => SkillSet::new(),
    };

    Ok(merge(&given, &from_resume, &SkillSet::new()))
}

fn catalog_path(cli_path: Option<PathBuf>, configured: Option<PathBuf>, key: &str) -> anyhow::Result<PathBuf> {
    cli_path
        .or(configured)
        .with_context(|| format!("No catalog given; pass --catalog or set catalog.{} in the config", key))
}

/// Where and how a ranking is presented.
struct RankTarget<'a> {
    query: &'a SkillSet,
    config: &'a Config,
    format: OutputFormat,
    save: Option<&'a Path>,
}

fn rank_catalog<C: CatalogRecord>(path: &Path, target: &RankTarget<'_>, watch: bool) -> anyhow::Result<()> {
    let store = CatalogStore::<C>::open(path)
        .with_context(|| format!("Failed to load {} catalog from {}", C::KIND, path.display()))?;

    if !watch {
        return emit_report(&store.snapshot(), target);
    }

    let interval = target
        .config
        .refresh_interval()
        .context("--watch needs catalog.refresh_interval_secs in the configuration")?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    runtime.block_on(async {
        let store = Arc::new(store);
        let refresher = store.spawn_refresh(interval);
        let mut ticker = tokio::time::interval(interval);
        let mut shown = None;

        info!(
            "Watching {} (refresh every {}s), press Ctrl-C to stop",
            path.display(),
            interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let snapshot = store.snapshot();
                    if shown != Some(snapshot.loaded_at()) {
                        shown = Some(snapshot.loaded_at());
                        emit_report(&snapshot, target)?;
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        refresher.abort();
        Ok::<(), anyhow::Error>(())
    })
}

fn emit_report<C: CatalogRecord>(catalog: &Catalog<C>, target: &RankTarget<'_>) -> anyhow::Result<()> {
    let results = RelevanceRanker::new().rank(target.query, catalog.items());
    let report = RankingReport::build(
        C::KIND,
        catalog.source_name(),
        target.query,
        &results,
        &target.config.ranking,
    );

    let output = &target.config.output;
    let generator = ReportGenerator::with_options(output.color_output, output.detailed);
    let rendered = generator.generate_report(&report, &target.format)?;

    match target.save {
        Some(path) => {
            save_report_to_file(&rendered, path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}
