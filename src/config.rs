use crate::error::AppError;
use crate::services::excel::SheetLayout;
use dotenvy::dotenv;
use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub report_path: Option<PathBuf>,
    pub print_results: bool,
    pub layout: SheetLayout,
}

impl Config {
    pub fn new() -> Result<Self, AppError> {
        // Load .env file first
        dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("SENSITIVITY_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let report_path = lookup("SENSITIVITY_REPORT_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let print_results = match lookup("SENSITIVITY_PRINT_RESULTS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("SENSITIVITY_PRINT_RESULTS must be a boolean, got {:?}", raw))
            })?,
            None => false,
        };

        let layout = SheetLayout::default();
        layout.validate()?;

        Ok(Config {
            data_dir,
            report_path,
            print_results,
            layout,
        })
    }
}

pub fn load_config() -> Result<Config, AppError> {
    Config::new()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
