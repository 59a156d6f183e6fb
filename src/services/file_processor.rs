use crate::error::AppError;
use crate::models::ChangeTable;
use crate::services::analysis::{change_table, classify, rank, DominanceReport, RankedColumn};
use crate::services::excel::{extract, load_sheet, Extraction, Sheet, SheetLayout};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const WORKBOOK_PATTERNS: &[&str] = &["*.xlsx", "*.xls"];

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub name: String,
    pub changes: ChangeTable,
    pub dominance: DominanceReport,
    /// Tornado order over the raw section values.
    pub ranking: Vec<RankedColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub sheet_name: String,
    pub extraction: Extraction,
    pub sections: Vec<SectionReport>,
}

impl FileReport {
    pub fn section(&self, name: &str) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn log_summary(&self) {
        tracing::info!("Processed file: {}", self.file_name);
        tracing::info!("Project names: {:?}", self.extraction.numeric_columns());
        for section in &self.sections {
            tracing::info!("{}:", section.name);
            for row in &section.changes.rows {
                let cells: Vec<String> = row.values.iter().map(ToString::to_string).collect();
                tracing::info!("  {} | {}", row.legend, cells.join(" | "));
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub results: BTreeMap<PathBuf, FileReport>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn section(&self, path: &Path, name: &str) -> Option<&ChangeTable> {
        self.results
            .get(path)
            .and_then(|file| file.section(name))
            .map(|section| &section.changes)
    }

    /// Writes the report as pretty JSON to `path`, or to stdout when no path is set.
    pub fn write_json(&self, path: Option<&Path>) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)?;
        match path {
            Some(path) => {
                std::fs::write(path, json)?;
                tracing::info!("Report written to {}", path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

pub struct SensitivityProcessor {
    layout: SheetLayout,
}

impl SensitivityProcessor {
    pub fn new(layout: SheetLayout) -> Self {
        Self { layout }
    }

    pub fn process_sheet(&self, sheet: &Sheet, file_name: &str) -> Result<FileReport, AppError> {
        let extraction = extract(sheet, &self.layout)?;

        let sections = extraction
            .sections
            .iter()
            .map(|section| {
                let changes = change_table(section, &extraction.reference);
                let dominance = classify(&changes.column_items());
                let ranking = rank(&section.column_items());
                SectionReport {
                    name: section.name.clone(),
                    changes,
                    dominance,
                    ranking,
                }
            })
            .collect();

        Ok(FileReport {
            file_name: file_name.to_string(),
            sheet_name: sheet.name.clone(),
            extraction,
            sections,
        })
    }

    pub fn process_file(&self, path: &Path) -> Result<FileReport, AppError> {
        tracing::info!("Processing workbook {}", path.display());
        let sheet = load_sheet(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.process_sheet(&sheet, &file_name)
    }

    /// Runs every workbook in `dir`. A failing file is recorded and skipped; only
    /// an unreadable directory pattern fails the batch.
    pub fn process_directory(&self, dir: &Path) -> Result<BatchReport, AppError> {
        let files = discover_workbooks(dir)?;
        if files.is_empty() {
            tracing::warn!("No Excel files found in {}", dir.display());
        } else {
            tracing::info!("Found {} Excel files", files.len());
        }

        let mut results = BTreeMap::new();
        let mut failures = Vec::new();
        for path in files {
            match self.process_file(&path) {
                Ok(report) => {
                    tracing::info!(
                        "Processed {}: {} sections",
                        report.file_name,
                        report.sections.len()
                    );
                    results.insert(path, report);
                }
                Err(e) => {
                    if e.is_structural() {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                    } else {
                        tracing::error!("Error processing {}: {}", path.display(), e);
                    }
                    failures.push(FileFailure {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(BatchReport {
            generated_at: Utc::now(),
            results,
            failures,
        })
    }
}

impl Default for SensitivityProcessor {
    fn default() -> Self {
        Self::new(SheetLayout::default())
    }
}

pub fn discover_workbooks(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();

    for pattern in WORKBOOK_PATTERNS {
        let entries = glob::glob(&format!("{}/{}", base, pattern))
            .map_err(|e| AppError::Config(format!("invalid workbook pattern: {}", e)))?;
        for entry in entries {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => tracing::warn!("Unreadable directory entry: {}", e),
            }
        }
    }

    files.sort();
    Ok(files)
}
