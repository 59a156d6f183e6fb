pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::AppError;
pub use services::file_processor::{BatchReport, FileReport, SectionReport, SensitivityProcessor};
