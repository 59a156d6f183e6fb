use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load workbook {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("No columns selected: selector row has no present, non-zero cells")]
    EmptySelection,

    #[error("No valid rows left after dropping rows with an empty legend cell")]
    NoValidRows,

    #[error("Reference row missing: block has {found} rows, reference expected at {offset}")]
    MissingReference { offset: usize, found: usize },

    #[error("Invalid sheet layout: {0}")]
    InvalidLayout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Structural problems with the sheet's content, as opposed to IO or parse
    /// failures. These are expected in a batch and only warrant a warning.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AppError::EmptySelection | AppError::NoValidRows | AppError::MissingReference { .. }
        )
    }
}
