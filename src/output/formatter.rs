//! Report formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{RankingReport, ReportEntry};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars).collect();
    // Cut at the last word boundary when there is one.
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", truncated[..cut].trim_end())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            60..=100 => ("STRONG", Color::Green),
            30..=59 => ("GOOD", Color::Yellow),
            1..=29 => ("WEAK", Color::BrightYellow),
            _ => ("NONE", Color::BrightBlack),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_entry(&self, entry: &ReportEntry) -> String {
        let mut output = format!(
            "{:>3}. {} {:>3}% {}\n",
            entry.rank,
            self.colorize(&entry.name, Color::White),
            entry.score_percentage(),
            self.format_score_badge(entry.score_percentage())
        );

        let snippet_len = if self.detailed { 400 } else { 100 };
        output.push_str(&format!("     {}\n", truncate_text(&entry.snippet, snippet_len)));

        if let Some(url) = &entry.url {
            output.push_str(&format!("     {}\n", self.colorize(url, Color::Cyan)));
        }
        if self.detailed {
            output.push_str(&format!(
                "     {}\n",
                self.colorize(&format!("id: {} | score: {:.4}", entry.id, entry.score), Color::BrightBlack)
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!(
            "Ranked {} for: {}",
            report.metadata.catalog_kind,
            if report.query_skills.is_empty() {
                "(no skills)".to_string()
            } else {
                report.query_skills.to_stored()
            }
        )));
        output.push_str(&format!(
            "Generated: {} | Catalog: {} ({} entries)\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.catalog_source,
            report.metadata.catalog_size
        ));

        if report.entries.is_empty() {
            output.push_str(&self.colorize("No matching entries.\n", Color::Yellow));
        }

        for entry in &report.entries {
            output.push_str(&self.format_entry(entry));
            output.push('\n');
        }

        if report.metadata.omitted > 0 {
            output.push_str(&self.colorize(
                &format!("... {} more below the display limit\n", report.metadata.omitted),
                Color::BrightBlack,
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = format!("# Ranked {}\n\n", report.metadata.catalog_kind);

        output.push_str(&format!(
            "**Skills:** {}  \n**Catalog:** {} ({} entries)  \n**Generated:** {}\n\n",
            report.query_skills.to_stored(),
            report.metadata.catalog_source,
            report.metadata.catalog_size,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str("| # | Name | Score | Description |\n|---|------|-------|-------------|\n");
        for entry in &report.entries {
            let name = match &entry.url {
                Some(url) => format!("[{}]({})", Self::escape_cell(&entry.name), url),
                None => Self::escape_cell(&entry.name),
            };
            output.push_str(&format!(
                "| {} | {} | {}% | {} |\n",
                entry.rank,
                name,
                entry.score_percentage(),
                Self::escape_cell(&truncate_text(&entry.snippet, 120))
            ));
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::candidate::Course;
    use crate::config::RankingConfig;
    use crate::processing::ranker::rank;
    use crate::processing::skill_set::SkillSet;

    fn report() -> RankingReport {
        let courses = vec![
            Course::new("1", "Intro to Pottery", "Clay | wheels", "Ann", "https://x.io/1").unwrap(),
            Course::new("2", "Intro to Python", "Python scripting", "Bob", "https://x.io/2").unwrap(),
        ];
        let query = SkillSet::parse_stored("python, sql");
        let results = rank(&query, &courses);
        let settings = RankingConfig {
            max_results: 10,
            min_similarity: 0.0,
        };
        RankingReport::build("courses", "inline", &query, &results, &settings)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, false).format_report(&report()).unwrap();

        assert!(output.contains("Ranked courses for: python, sql"));
        assert!(output.find("Intro to Python").unwrap() < output.find("Intro to Pottery").unwrap());
        assert!(output.contains("https://x.io/2"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_is_parseable() {
        let json = ReportGenerator::new()
            .generate_report(&report(), &OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["entries"][0]["id"], "2");
        assert_eq!(value["query_skills"][1], "sql");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let md = MarkdownFormatter.format_report(&report()).unwrap();

        assert!(md.starts_with("# Ranked courses"));
        assert!(md.contains("[Intro to Python](https://x.io/2)"));
        assert!(md.contains("Clay \\| wheels"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("learn python from scratch", 14), "learn python...");
    }
}
