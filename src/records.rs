//! Source rows in, enriched card records out
//!
//! Each row with a `Day` gets its symbol resolved to an icon and each of its
//! readings resolved to verse text. Rows are independent: a provider outage on
//! one row only degrades that row.

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{EnrichError, Result};
use crate::icon::IconResolver;
use crate::verse::VerseResolver;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Columns the source header must contain
pub const REQUIRED_COLUMNS: [&str; 5] = ["Day", "Person", "Theme", "Reading", "Symbol"];

/// Separator between references in the `Reading` column
pub const READING_SEPARATOR: char = ';';

/// Separator between verse texts in `verse_content`
pub const VERSE_SEPARATOR: &str = "\n\n";

/// One row of the source spreadsheet
#[derive(Debug, Clone, Default)]
pub struct SourceRow {
    pub day: String,
    pub person: String,
    pub theme: String,
    pub reading: String,
    pub symbol: String,
}

/// A card ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub day: String,
    pub person: String,
    pub theme: String,
    pub reading: String,
    pub symbol: String,
    pub icon_url: Option<String>,
    pub verse_content: String,
}

/// Read source rows from a CSV file
pub fn read_source_rows<P: AsRef<Path>>(file_path: P) -> Result<Vec<SourceRow>> {
    let file = std::fs::File::open(file_path)?;
    parse_source_rows(file)
}

/// Parse source rows from CSV text with a header row
pub fn parse_source_rows<R: Read>(input: R) -> Result<Vec<SourceRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut columns = [0usize; REQUIRED_COLUMNS.len()];
    for (index, column) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *index = headers
            .iter()
            .position(|h| h == column)
            .ok_or(EnrichError::MissingColumn(column))?;
    }
    let [day, person, theme, reading, symbol] = columns;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable row: {}", e);
                continue;
            }
        };

        // Short rows leave the trailing columns empty
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        rows.push(SourceRow {
            day: cell(day),
            person: cell(person),
            theme: cell(theme),
            reading: cell(reading),
            symbol: cell(symbol),
        });
    }

    Ok(rows)
}

/// Individual references of a `Reading` cell, trimmed, blanks skipped
pub fn split_references(reading: &str) -> Vec<&str> {
    reading
        .split(READING_SEPARATOR)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect()
}

pub struct RecordAssembler {
    icons: IconResolver,
    verses: VerseResolver,
    max_concurrent_rows: Option<usize>,
}

impl RecordAssembler {
    pub fn new(icons: IconResolver, verses: VerseResolver) -> Self {
        Self {
            icons,
            verses,
            max_concurrent_rows: None,
        }
    }

    /// Build both resolvers around one shared HTTP client
    pub fn from_config(config: &Config, cache: Arc<dyn CacheStore>) -> Result<Self> {
        let client = config.http_client()?;
        let icons = IconResolver::from_config(config, client.clone(), Arc::clone(&cache));
        let verses = VerseResolver::from_config(config, client, cache);
        Ok(Self::new(icons, verses).with_max_concurrent_rows(config.max_concurrent_rows))
    }

    /// Cap the number of rows resolved at once; `None` runs all rows together
    pub fn with_max_concurrent_rows(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_rows = limit;
        self
    }

    /// Read `file_path` and enrich every valid row
    pub async fn assemble_file<P: AsRef<Path>>(&self, file_path: P) -> Result<Vec<EnrichedRecord>> {
        let rows = read_source_rows(&file_path)?;
        log::info!(
            "Read {} rows from {}",
            rows.len(),
            file_path.as_ref().display()
        );
        Ok(self.assemble(rows).await)
    }

    /// Enrich rows concurrently, keeping source order and dropping rows without a day
    pub async fn assemble(&self, rows: Vec<SourceRow>) -> Vec<EnrichedRecord> {
        let records: Vec<Option<EnrichedRecord>> = match self.max_concurrent_rows {
            Some(limit) => {
                stream::iter(rows)
                    .map(|row| self.enrich_row(row))
                    .buffered(limit.max(1))
                    .collect()
                    .await
            }
            None => join_all(rows.into_iter().map(|row| self.enrich_row(row))).await,
        };

        records.into_iter().flatten().collect()
    }

    /// Enrich one row; `None` when the row has no day
    pub async fn enrich_row(&self, row: SourceRow) -> Option<EnrichedRecord> {
        if row.day.trim().is_empty() {
            log::debug!("Skipping row without day: {:?}", row);
            return None;
        }

        let (icon_url, verse_content) = tokio::join!(
            self.icons.resolve(&row.symbol),
            self.resolve_verses(&row.reading)
        );

        if icon_url.is_none() {
            log::warn!("No icon for day {} ({})", row.day, row.symbol);
        }

        Some(EnrichedRecord {
            day: row.day,
            person: row.person,
            theme: row.theme,
            reading: row.reading,
            symbol: row.symbol,
            icon_url,
            verse_content,
        })
    }

    /// Resolve every reference in a `Reading` cell, in order, joined by a blank line
    async fn resolve_verses(&self, reading: &str) -> String {
        let references = split_references(reading);
        let verses = join_all(references.iter().map(|r| self.verses.resolve(r))).await;

        verses
            .into_iter()
            .map(|v| v.content)
            .collect::<Vec<_>>()
            .join(VERSE_SEPARATOR)
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
