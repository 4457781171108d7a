//! Immutable catalog snapshots and the loaders that build them.
//!
//! A snapshot is parsed once from a tabular source (CSV with a header row,
//! or a JSON array of objects), column names are normalized, and the rows
//! are frozen behind an `Arc`. Cloning a snapshot never copies records, so
//! handing one to each in-flight query is free.

use crate::catalog::error::LoadError;
use crate::catalog::model::{REQUIRED_COLUMNS, VendorRecord, non_blank, normalize_column_name};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Supported on-disk catalog encodings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CatalogFormat {
    Csv,
    Json,
}

impl CatalogFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(CatalogFormat::Csv),
            "json" => Some(CatalogFormat::Json),
            _ => None,
        }
    }
}

/// Read-only view over one load of the vendor catalog.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
    records: Arc<[VendorRecord]>,
    columns: Arc<[String]>,
    skipped_rows: usize,
    source: Option<PathBuf>,
}

impl CatalogSnapshot {
    /// Load a catalog from disk, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let format = CatalogFormat::from_path(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut snapshot = match format {
            CatalogFormat::Csv => Self::from_csv_reader(reader)?,
            CatalogFormat::Json => Self::from_json_reader(reader)?,
        };
        snapshot.source = Some(path.to_path_buf());

        if snapshot.skipped_rows > 0 {
            tracing::warn!(
                path = %path.display(),
                skipped = snapshot.skipped_rows,
                "skipped catalog rows without a rating"
            );
        }
        tracing::info!(
            path = %path.display(),
            records = snapshot.len(),
            "catalog loaded"
        );
        Ok(snapshot)
    }

    /// Parse CSV with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);
        let layout = ColumnLayout::from_headers(csv_reader.headers()?.iter())?;

        let mut builder = SnapshotBuilder::default();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row?;
            let cells: Vec<Option<String>> = row.iter().map(non_blank).collect();
            builder.push(layout.build(cells, idx + 1)?);
        }
        Ok(builder.finish(layout.columns))
    }

    /// Parse a JSON array of row objects.
    ///
    /// Keys are normalized like CSV headers. The column set is the union of
    /// keys across all rows; a key absent from a row reads as a blank cell.
    /// An empty array is an empty catalog.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_reader(reader)?;
        if rows.is_empty() {
            return Ok(Self::from_records(Vec::new()));
        }

        let mut normalized_rows = Vec::with_capacity(rows.len());
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            let mut normalized: BTreeMap<String, Value> = BTreeMap::new();
            for (key, value) in row {
                let name = normalize_column_name(&key);
                if normalized.contains_key(&name) {
                    return Err(LoadError::DuplicateColumn(name));
                }
                if !columns.contains(&name) {
                    columns.push(name.clone());
                }
                normalized.insert(name, value);
            }
            normalized_rows.push(normalized);
        }

        let layout = ColumnLayout::from_headers(columns.iter().map(String::as_str))?;
        let mut builder = SnapshotBuilder::default();
        for (idx, mut row) in normalized_rows.into_iter().enumerate() {
            let row_number = idx + 1;
            let cells = layout
                .columns
                .iter()
                .map(|name| json_cell(row.remove(name), row_number))
                .collect::<Result<Vec<_>, _>>()?;
            builder.push(layout.build(cells, row_number)?);
        }
        Ok(builder.finish(layout.columns))
    }

    /// Build a snapshot from records already in memory.
    ///
    /// Records whose rating is not finite are skipped, the same way unrated
    /// rows are skipped at load time.
    pub fn from_records(records: Vec<VendorRecord>) -> Self {
        let mut builder = SnapshotBuilder::default();
        for record in records {
            if record.rating.is_finite() {
                builder.push(Some(record));
            } else {
                builder.push(None);
            }
        }
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        builder.finish(columns)
    }

    /// All records, in source order.
    pub fn records(&self) -> &[VendorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalized column names in source order, including non-contract columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows dropped at load because they carried no rating.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Path this snapshot was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[derive(Default)]
struct SnapshotBuilder {
    records: Vec<VendorRecord>,
    skipped_rows: usize,
}

impl SnapshotBuilder {
    fn push(&mut self, record: Option<VendorRecord>) {
        match record {
            Some(record) => self.records.push(record),
            None => self.skipped_rows += 1,
        }
    }

    fn finish(self, columns: Vec<String>) -> CatalogSnapshot {
        CatalogSnapshot {
            records: self.records.into(),
            columns: columns.into(),
            skipped_rows: self.skipped_rows,
            source: None,
        }
    }
}

/// Where the contract columns sit within a source row.
struct ColumnLayout {
    columns: Vec<String>,
    product_name: usize,
    main_category: usize,
    parsed_features: usize,
    rating: usize,
}

impl ColumnLayout {
    fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, LoadError> {
        let columns: Vec<String> = headers.into_iter().map(normalize_column_name).collect();

        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(LoadError::DuplicateColumn(column.clone()));
            }
        }

        let positions = REQUIRED_COLUMNS.map(|name| columns.iter().position(|c| c == name));
        let [
            Some(product_name),
            Some(main_category),
            Some(parsed_features),
            Some(rating),
        ] = positions
        else {
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip(positions)
                .filter(|(_, position)| position.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(LoadError::MissingColumns(missing));
        };

        Ok(Self {
            columns,
            product_name,
            main_category,
            parsed_features,
            rating,
        })
    }

    /// Turn one row of cells into a record; `Ok(None)` means the row is unrated.
    ///
    /// `cells` has one entry per column: the CSV reader rejects ragged rows
    /// and the JSON loader fills every column.
    fn build(
        &self,
        mut cells: Vec<Option<String>>,
        row: usize,
    ) -> Result<Option<VendorRecord>, LoadError> {
        let Some(rating) = parse_rating(cells[self.rating].take(), row)? else {
            return Ok(None);
        };

        let product_name = cells[self.product_name].take().unwrap_or_default();
        let main_category = cells[self.main_category].take();
        let parsed_features = cells[self.parsed_features].take();

        let mut extras = BTreeMap::new();
        for (name, cell) in self.columns.iter().zip(cells) {
            if let Some(value) = cell {
                extras.insert(name.clone(), value);
            }
        }

        Ok(Some(VendorRecord {
            product_name,
            main_category,
            parsed_features,
            rating,
            extras,
        }))
    }
}

// Blank and NaN mean "unrated"; anything else must be a finite number.
fn parse_rating(raw: Option<String>, row: usize) -> Result<Option<f64>, LoadError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(LoadError::InvalidRating { row, value: raw }),
    }
}

fn json_cell(value: Option<Value>, row: usize) -> Result<Option<String>, LoadError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(non_blank(&text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(LoadError::InvalidRecord {
            row,
            message: format!("nested value {other} cannot be used as a catalog cell"),
        }),
    }
}
