use anyhow::Result;
use criteria_sensitivity::{config, logging, SensitivityProcessor};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::load_config()?;
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());

    let processor = SensitivityProcessor::new(config.layout.clone());
    let report = processor.process_directory(&data_dir)?;

    if config.print_results {
        for file in report.results.values() {
            file.log_summary();
        }
    }
    tracing::info!(
        "Batch finished: {} processed, {} skipped",
        report.results.len(),
        report.failures.len()
    );

    report.write_json(config.report_path.as_deref())?;

    Ok(())
}
