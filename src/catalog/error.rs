use std::fmt;
use std::path::PathBuf;

/// Failure to turn a catalog source into a snapshot.
///
/// Any of these is fatal at startup; on reload the previously published
/// snapshot keeps serving.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv(csv::Error),
    Json(serde_json::Error),
    UnsupportedFormat(PathBuf),
    MissingColumns(Vec<String>),
    DuplicateColumn(String),
    /// `row` is the 1-based data row, header excluded.
    InvalidRating {
        row: usize,
        value: String,
    },
    InvalidRecord {
        row: usize,
        message: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "unable to read catalog {}: {source}", path.display())
            }
            LoadError::Csv(err) => write!(f, "malformed CSV catalog: {err}"),
            LoadError::Json(err) => write!(f, "malformed JSON catalog: {err}"),
            LoadError::UnsupportedFormat(path) => write!(
                f,
                "unsupported catalog format for {} (expected .csv or .json)",
                path.display()
            ),
            LoadError::MissingColumns(columns) => {
                write!(
                    f,
                    "catalog is missing required columns: {}",
                    columns.join(", ")
                )
            }
            LoadError::DuplicateColumn(column) => {
                write!(
                    f,
                    "catalog column '{column}' appears more than once after normalization"
                )
            }
            LoadError::InvalidRating { row, value } => {
                write!(f, "row {row}: rating '{value}' is not a finite number")
            }
            LoadError::InvalidRecord { row, message } => write!(f, "row {row}: {message}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Csv(err) => Some(err),
            LoadError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}
