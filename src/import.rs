//! CSV Import
//!
//! Reads post snapshots from a CSV export. Columns are located by header
//! name (case-insensitive), so column order does not matter:
//!
//! | header | required | notes |
//! |---|---|---|
//! | `username` or `account` | yes | |
//! | `post_id` | yes | |
//! | `views`, `likes`, `comments`, `shares` | yes | non-negative integers, empty = 0 |
//! | `created_at` | no | RFC 3339, `%Y-%m-%d %H:%M:%S` or `%Y-%m-%d` |
//! | `date` | no | carried through verbatim |
//! | `url` | no | |
//!
//! Rows that fail to parse are counted and reported, never fatal.

use crate::storage::Post;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors that abort an import as a whole
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Result of a CSV import
#[derive(Debug, Default)]
pub struct CsvImportResult {
    pub posts: Vec<Post>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct Columns {
    username: usize,
    post_id: usize,
    views: usize,
    likes: usize,
    comments: usize,
    shares: usize,
    created_at: Option<usize>,
    date: Option<usize>,
    url: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| ImportError::MissingColumn(names[0].to_string()))
        };

        Ok(Self {
            username: require(&["username", "account"])?,
            post_id: require(&["post_id"])?,
            views: require(&["views"])?,
            likes: require(&["likes"])?,
            comments: require(&["comments"])?,
            shares: require(&["shares"])?,
            created_at: find(&["created_at"]),
            date: find(&["date"]),
            url: find(&["url"]),
        })
    }
}

/// CSV importer for post snapshots
pub struct CsvPostImporter {
    /// Cap on the number of row errors kept in the result
    max_errors: usize,
}

impl Default for CsvPostImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvPostImporter {
    pub fn new() -> Self {
        Self { max_errors: 100 }
    }

    /// Set how many row errors are kept in the result
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Import posts from a CSV file
    pub fn import(&self, path: &Path) -> Result<CsvImportResult, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        self.import_from(reader)
    }

    /// Import posts from a CSV string
    pub fn import_str(&self, csv_data: &str) -> Result<CsvImportResult, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());
        self.import_from(reader)
    }

    fn import_from<R: Read>(&self, mut reader: csv::Reader<R>) -> Result<CsvImportResult, ImportError> {
        let columns = Columns::from_headers(reader.headers()?)?;
        let mut result = CsvImportResult::default();
        let mut total_errors = 0usize;

        for (idx, record) in reader.records().enumerate() {
            // Header is line 1
            let line = idx + 2;

            let parsed = record
                .map_err(|e| e.to_string())
                .and_then(|record| parse_row(&record, &columns));

            match parsed {
                Ok(post) => {
                    result.posts.push(post);
                    result.rows_processed += 1;
                }
                Err(e) => {
                    result.rows_failed += 1;
                    total_errors += 1;
                    if result.errors.len() < self.max_errors {
                        result.errors.push(format!("Line {}: {}", line, e));
                    }
                }
            }
        }

        if total_errors > result.errors.len() {
            result.errors.push(format!(
                "... and {} more errors",
                total_errors - result.errors.len()
            ));
        }

        tracing::debug!(
            rows_processed = result.rows_processed,
            rows_failed = result.rows_failed,
            "Parsed CSV post export"
        );

        Ok(result)
    }
}

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<Post, String> {
    let text = |idx: usize| record.get(idx).unwrap_or("").trim();
    let optional = |idx: Option<usize>| {
        idx.map(|i| text(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let username = text(columns.username);
    if username.is_empty() {
        return Err("missing username".to_string());
    }
    let post_id = text(columns.post_id);
    if post_id.is_empty() {
        return Err("missing post_id".to_string());
    }

    let created_at = match optional(columns.created_at) {
        Some(raw) => Some(parse_timestamp(&raw)?),
        None => None,
    };

    Ok(Post {
        id: None,
        username: username.to_string(),
        post_id: post_id.to_string(),
        likes: parse_count(text(columns.likes), "likes")?,
        views: parse_count(text(columns.views), "views")?,
        comments: parse_count(text(columns.comments), "comments")?,
        shares: parse_count(text(columns.shares), "shares")?,
        created_at,
        date: optional(columns.date),
        url: optional(columns.url),
    })
}

fn parse_count(raw: &str, column: &str) -> Result<u64, String> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u64>()
        .map_err(|_| format!("invalid {} count '{}'", column, raw))
}

/// Parse a publish time; date-only values land at noon UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(12, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    Err(format!("could not parse created_at '{}'", raw))
}
