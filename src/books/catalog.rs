use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::record::{BookRecord, ColumnKind, Columns};
use crate::config_manager::catalog::CatalogConfig;

/// Reasons the books file could not be used
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open books file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse books file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Books file is missing required column: {0}")]
    MissingColumn(String),
}

/// A fully loaded books file
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub records: Vec<BookRecord>,
    title_idx: usize,
    author_idx: usize,
    genre_idx: usize,
}

impl LoadedCatalog {
    pub fn title<'a>(&self, record: &'a BookRecord) -> &'a str {
        record.value_at(self.title_idx)
    }

    pub fn author<'a>(&self, record: &'a BookRecord) -> &'a str {
        record.value_at(self.author_idx)
    }

    pub fn genres<'a>(&self, record: &'a BookRecord) -> &'a str {
        record.value_at(self.genre_idx)
    }
}

/// CSV-backed book catalog. The file is read again on every call.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    path: PathBuf,
    title_column: String,
    author_column: String,
    genre_column: String,
    max_results: usize,
}

impl BookCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(&CatalogConfig::default()).with_path(path)
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            path: PathBuf::from(&config.books_file),
            title_column: config.title_column.clone(),
            author_column: config.author_column.clone(),
            genre_column: config.genre_column.clone(),
            max_results: config.max_results,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the books file currently exists
    pub fn is_available(&self) -> bool {
        self.path.is_file()
    }

    /// Read and parse the whole books file
    pub fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        let file = File::open(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = disambiguate_headers(
            reader
                .headers()?
                .iter()
                .map(|h| h.trim_start_matches('\u{feff}').to_string())
                .collect(),
        );

        let title_idx = find_column(&headers, &self.title_column)?;
        let author_idx = find_column(&headers, &self.author_column)?;
        let genre_idx = find_column(&headers, &self.genre_column)?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for row in reader.records() {
            let row = row?;
            rows.push(row.iter().map(|v| v.to_string()).collect());
        }

        let kinds = (0..headers.len())
            .map(|idx| {
                let cells = rows.iter().map(|r| r.get(idx).map(String::as_str).unwrap_or(""));
                ColumnKind::infer(cells)
            })
            .collect();
        let columns = Arc::new(Columns::new(headers, kinds));
        let records: Vec<BookRecord> = rows
            .into_iter()
            .map(|values| BookRecord::new(Arc::clone(&columns), values))
            .collect();

        debug!("Loaded {} books from {}", records.len(), self.path.display());
        Ok(LoadedCatalog {
            records,
            title_idx,
            author_idx,
            genre_idx,
        })
    }

    /// Every row whose genre field contains any of `genres`, case-insensitively,
    /// deduplicated by (title, author). Deterministic: label order, then row order.
    pub fn candidates(&self, genres: &[String]) -> Result<Vec<BookRecord>, CatalogError> {
        let labels: Vec<String> = genres
            .iter()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let catalog = self.load()?;
        let lowered: Vec<String> = catalog
            .records
            .iter()
            .map(|r| catalog.genres(r).to_lowercase())
            .collect();

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut matched = Vec::new();
        for label in &labels {
            for (record, genre_field) in catalog.records.iter().zip(&lowered) {
                if !genre_field.contains(label.as_str()) {
                    continue;
                }
                if seen.insert((catalog.title(record), catalog.author(record))) {
                    matched.push(record.clone());
                }
            }
        }

        Ok(matched)
    }

    /// Up to `max_results` random books matching any of `genres`.
    ///
    /// Never fails: an unreadable books file or no matches yield an empty list.
    pub fn recommend(&self, genres: &[String]) -> Vec<BookRecord> {
        if genres.is_empty() {
            return Vec::new();
        }

        let mut matched = match self.candidates(genres) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Books file read error: {}", e);
                return Vec::new();
            }
        };

        if matched.is_empty() {
            info!("No books found for genres: {:?}", genres);
            return Vec::new();
        }

        matched.shuffle(&mut rand::thread_rng());
        matched.truncate(self.max_results);
        matched
    }
}

/// Repeated header names get a `.N` suffix (`Title`, `Title.1`, ...)
fn disambiguate_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let mut name = header.clone();
        let mut n = 0;
        while seen.contains(&name) {
            n += 1;
            name = format!("{}.{}", header, n);
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

/// Exact header match first, then case-insensitive
fn find_column(headers: &[String], name: &str) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name.trim())))
        .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
}
