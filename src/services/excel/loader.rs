use super::types::Sheet;
use crate::error::AppError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Opens any workbook format calamine understands and reads its first worksheet.
pub fn load_sheet(path: &Path) -> Result<Sheet, AppError> {
    tracing::debug!("Opening workbook {}", path.display());
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        tracing::error!("Failed to open workbook {}: {}", path.display(), e);
        AppError::load(path, e)
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| AppError::load(path, "no sheets found in workbook"))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| AppError::load(path, format!("failed to read worksheet {}: {}", sheet_name, e)))?;

    tracing::debug!("Read worksheet {} from {}", sheet_name, path.display());
    Ok(Sheet::from_grid(sheet_name.clone(), absolute_grid(&range)))
}

/// calamine trims a range to its used area; pad it back so row and column
/// positions match the worksheet's own A1 coordinates.
fn absolute_grid(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };

    (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| range.get_value((row, col)).cloned().unwrap_or(Data::Empty))
                .collect()
        })
        .collect()
}
