//! Tabular catalog loading with load-time schema validation

use crate::catalog::candidate::{Candidate, Course, Project};
use crate::error::{Result, SkillMatchError};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A candidate type that can be read from a CSV row.
pub trait CatalogRecord: Candidate + Clone + Send + Sync + 'static {
    const KIND: &'static str;
    const REQUIRED_COLUMNS: &'static [&'static str];

    type Row: DeserializeOwned;

    /// Validate a row. `record` is 1-based and used as the id when none is given.
    fn from_row(row: Self::Row, record: usize) -> Result<Self>;
}

#[derive(Debug, Deserialize)]
pub struct CourseRow {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
    url: Option<String>,
}

impl CatalogRecord for Course {
    const KIND: &'static str = "courses";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["title", "description", "author", "url"];

    type Row = CourseRow;

    fn from_row(row: CourseRow, record: usize) -> Result<Self> {
        Course::new(
            row.id.unwrap_or_else(|| record.to_string()),
            row.title.unwrap_or_default(),
            row.description.unwrap_or_default(),
            row.author.unwrap_or_default(),
            row.url.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectRow {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    required_skills: Option<String>,
    url: Option<String>,
}

impl CatalogRecord for Project {
    const KIND: &'static str = "projects";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["title", "description", "required_skills"];

    type Row = ProjectRow;

    fn from_row(row: ProjectRow, record: usize) -> Result<Self> {
        Project::new(
            row.id.unwrap_or_else(|| record.to_string()),
            row.title.unwrap_or_default(),
            row.description.unwrap_or_default(),
            row.required_skills.unwrap_or_default(),
            row.url,
        )
    }
}

/// An immutable, fully validated snapshot of a catalog source.
#[derive(Debug, Clone)]
pub struct Catalog<C> {
    source_name: String,
    items: Vec<C>,
    loaded_at: DateTime<Utc>,
}

impl<C> Catalog<C> {
    pub fn new(source_name: impl Into<String>, items: Vec<C>) -> Self {
        Self {
            source_name: source_name.into(),
            items,
            loaded_at: Utc::now(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn items(&self) -> &[C] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl<C: Candidate> Catalog<C> {
    pub fn get(&self, id: &str) -> Option<&C> {
        self.items.iter().find(|item| item.id() == id)
    }
}

/// Read and validate every row; the first malformed record aborts the load.
pub fn load_from_reader<C: CatalogRecord, R: Read>(reader: R, source_name: &str) -> Result<Catalog<C>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in C::REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(SkillMatchError::CatalogSchema {
                source_name: source_name.to_string(),
                record: 0,
                reason: format!("missing required column '{}'", column),
            });
        }
    }

    let mut items = Vec::new();
    for (index, row) in csv_reader.deserialize::<C::Row>().enumerate() {
        let record = index + 1;
        let row = row.map_err(|e| SkillMatchError::CatalogSchema {
            source_name: source_name.to_string(),
            record,
            reason: e.to_string(),
        })?;

        let item = C::from_row(row, record).map_err(|e| match e {
            SkillMatchError::MissingField(field) => SkillMatchError::CatalogSchema {
                source_name: source_name.to_string(),
                record,
                reason: format!("missing required field '{}'", field),
            },
            other => other,
        })?;
        items.push(item);
    }

    debug!("Parsed {} {} from {}", items.len(), C::KIND, source_name);
    Ok(Catalog::new(source_name, items))
}

pub fn load_from_path<C: CatalogRecord>(path: &Path) -> Result<Catalog<C>> {
    let file = File::open(path)?;
    let catalog = load_from_reader(file, &path.display().to_string())?;
    info!("Loaded {} {} from {}", catalog.len(), C::KIND, path.display());
    Ok(catalog)
}
