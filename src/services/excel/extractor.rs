use super::types::{Sheet, SheetLayout, SECTION_ROWS};
use super::utils::{coerce_numeric, display_text, is_missing, is_zero};
use crate::error::AppError;
use crate::models::{ColumnName, ReferenceRow, Section, TableRow, Value};
use serde::Serialize;

/// Structural view of one sensitivity sheet: active columns renamed to their
/// display names, the reference row, and the two-row sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub legend_header: String,
    pub columns: Vec<ColumnName>,
    pub reference: ReferenceRow,
    pub sections: Vec<Section>,
    pub skipped_sections: Vec<String>,
}

impl Extraction {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Display names of the numeric columns, legend excluded.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns.iter().skip(1).map(|c| c.display.clone()).collect()
    }
}

impl SheetLayout {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.block_rows.is_empty() {
            return Err(AppError::InvalidLayout("block row range is empty".to_string()));
        }
        for spec in &self.sections {
            if spec.rows.len() != SECTION_ROWS {
                return Err(AppError::InvalidLayout(format!(
                    "section {} spans {} rows, expected {}",
                    spec.name,
                    spec.rows.len(),
                    SECTION_ROWS
                )));
            }
        }
        Ok(())
    }
}

/// Block row after active-column selection: legend label plus coerced numeric cells.
struct BlockRow {
    legend: String,
    values: Vec<Option<Value>>,
}

pub fn extract(sheet: &Sheet, layout: &SheetLayout) -> Result<Extraction, AppError> {
    layout.validate()?;

    let active: Vec<usize> = (0..sheet.width())
        .filter(|&col| {
            let cell = sheet.cell(layout.selector_row, col);
            !is_missing(cell) && !is_zero(cell)
        })
        .collect();

    if active.is_empty() {
        return Err(AppError::EmptySelection);
    }
    tracing::debug!("Sheet {}: {} active columns", sheet.name, active.len());

    let columns: Vec<ColumnName> = active
        .iter()
        .map(|&col| {
            let key = sheet.headers[col].clone();
            let name_cell = sheet.cell(layout.name_row, col);
            let display = if is_missing(name_cell) {
                key.clone()
            } else {
                display_text(name_cell)
            };
            ColumnName { key, display }
        })
        .collect();

    let legend_col = active[0];
    let numeric_cols = &active[1..];

    let block_end = layout.block_rows.end.min(sheet.height());
    let block: Vec<BlockRow> = std::iter::once(layout.name_row)
        .chain(layout.block_rows.start..block_end)
        .filter(|&row| !is_missing(sheet.cell(row, legend_col)))
        .map(|row| BlockRow {
            legend: display_text(sheet.cell(row, legend_col)),
            values: numeric_cols
                .iter()
                .map(|&col| coerce_numeric(sheet.cell(row, col)))
                .collect(),
        })
        .collect();

    if block.is_empty() {
        return Err(AppError::NoValidRows);
    }

    let reference = block
        .get(layout.reference_offset)
        .map(|row| TableRow {
            legend: row.legend.clone(),
            values: row.values.clone(),
        })
        .ok_or(AppError::MissingReference {
            offset: layout.reference_offset,
            found: block.len(),
        })?;

    let legend_header = columns[0].display.clone();
    let numeric_names: Vec<String> = columns.iter().skip(1).map(|c| c.display.clone()).collect();

    let mut sections = Vec::with_capacity(layout.sections.len());
    let mut skipped_sections = Vec::new();
    for spec in &layout.sections {
        let Some([first, second]) = block.get(spec.rows.clone()) else {
            tracing::warn!(
                "Sheet {}: section {} needs rows {:?} but the block has {} rows, skipping",
                sheet.name,
                spec.name,
                spec.rows,
                block.len()
            );
            skipped_sections.push(spec.name.clone());
            continue;
        };

        let to_row = |row: &BlockRow| TableRow {
            legend: row.legend.clone(),
            values: row.values.clone(),
        };
        sections.push(Section {
            name: spec.name.clone(),
            legend_header: legend_header.clone(),
            columns: numeric_names.clone(),
            rows: [to_row(first), to_row(second)],
        });
    }

    Ok(Extraction {
        legend_header,
        columns,
        reference,
        sections,
        skipped_sections,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::super::types::Sheet;
    use calamine::Data;

    pub fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    /// Header row, the name row at data row 1, and the block from data row 9:
    /// reference row first, then four two-row sections.
    pub fn sensitivity_sheet(selector: Vec<Data>) -> Sheet {
        let width = selector.len();
        let blank = || vec![Data::Empty; width];

        let mut grid = vec![(0..width).map(|i| text(&format!("col{}", i))).collect::<Vec<_>>()];
        grid.push(blank());
        let mut names = vec![text("Criteria")];
        names.extend((1..width).map(|i| text(&format!("C{}", i))));
        grid.push(names);
        for _ in 2..9 {
            grid.push(blank());
        }
        grid.push(selector);
        for (idx, label) in ["FO min", "FO max", "T1 min", "T1 max", "NFO min", "NFO max", "NT1 min", "NT1 max"]
            .iter()
            .enumerate()
        {
            let mut row = vec![text(label)];
            row.extend((1..width).map(|c| Data::Float((idx * 10 + c) as f64)));
            grid.push(row);
        }

        Sheet::from_grid("Sheet1", grid)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{sensitivity_sheet, text};
    use super::*;
    use crate::models::Infinity;
    use crate::services::analysis::{change_table, rank};
    use calamine::Data;

    fn reference_selector() -> Vec<Data> {
        vec![text("Reference"), Data::Float(10.0), Data::Float(0.0), Data::Float(20.0)]
    }

    #[test]
    fn extracts_active_columns_with_display_names() {
        let sheet = sensitivity_sheet(reference_selector());
        let extraction = extract(&sheet, &SheetLayout::default()).unwrap();

        assert_eq!(extraction.legend_header, "Criteria");
        let names: Vec<_> = extraction.columns.iter().map(|c| c.display.as_str()).collect();
        assert_eq!(names, vec!["Criteria", "C1", "C3"]);
        assert_eq!(extraction.columns[1].key, "col1");
        assert_eq!(extraction.numeric_columns(), vec!["C1".to_string(), "C3".to_string()]);
    }

    #[test]
    fn reference_row_is_the_selector_row() {
        let sheet = sensitivity_sheet(reference_selector());
        let extraction = extract(&sheet, &SheetLayout::default()).unwrap();

        assert_eq!(extraction.reference.legend, "Reference");
        assert_eq!(
            extraction.reference.values,
            vec![Some(Value::Finite(10.0)), Some(Value::Finite(20.0))]
        );
    }

    #[test]
    fn sections_take_consecutive_row_pairs() {
        let sheet = sensitivity_sheet(reference_selector());
        let extraction = extract(&sheet, &SheetLayout::default()).unwrap();

        assert_eq!(extraction.sections.len(), 4);
        assert!(extraction.skipped_sections.is_empty());

        let top1 = extraction.section("Criteria Weight - Top:1").unwrap();
        assert_eq!(top1.rows[0].legend, "T1 min");
        assert_eq!(top1.rows[1].legend, "T1 max");
        assert_eq!(top1.rows[0].values, vec![Some(Value::Finite(21.0)), Some(Value::Finite(23.0))]);
        assert_eq!(top1.columns, vec!["C1".to_string(), "C3".to_string()]);
    }

    #[test]
    fn all_zero_selector_is_empty_selection() {
        let sheet = sensitivity_sheet(vec![Data::Float(0.0), Data::Int(0), Data::Empty]);
        let err = extract(&sheet, &SheetLayout::default()).unwrap_err();
        assert!(matches!(err, AppError::EmptySelection));
    }

    #[test]
    fn sheet_shorter_than_selector_row_is_empty_selection() {
        let sheet = Sheet::from_grid("tiny", vec![vec![text("a"), text("b")], vec![Data::Float(1.0), Data::Float(2.0)]]);
        let err = extract(&sheet, &SheetLayout::default()).unwrap_err();
        assert!(matches!(err, AppError::EmptySelection));
    }

    #[test]
    fn rows_with_empty_legend_are_dropped_and_renumbered() {
        let mut sheet = sensitivity_sheet(reference_selector());
        // Blank out the legend of "FO min" (data row 10); every later row shifts up.
        sheet.rows[10][0] = Data::Empty;

        let extraction = extract(&sheet, &SheetLayout::default()).unwrap();
        let full_order = extraction.section("Criteria Weight (Full Order)").unwrap();
        assert_eq!(full_order.rows[0].legend, "FO max");
        assert_eq!(full_order.rows[1].legend, "T1 min");

        assert_eq!(
            extraction.skipped_sections,
            vec!["Criteria Weight Normalised - Top:1".to_string()]
        );
        assert_eq!(extraction.sections.len(), 3);
    }

    #[test]
    fn no_legend_values_is_no_valid_rows() {
        let mut sheet = sensitivity_sheet(reference_selector());
        // Legend column stays active through the selector but carries no labels.
        for row in sheet.rows.iter_mut() {
            row[0] = Data::Empty;
        }
        sheet.rows[9][0] = text("x");
        let layout = SheetLayout {
            block_rows: 10..20,
            ..SheetLayout::default()
        };

        let err = extract(&sheet, &layout).unwrap_err();
        assert!(matches!(err, AppError::NoValidRows));
    }

    #[test]
    fn lone_name_row_is_missing_reference() {
        let mut sheet = sensitivity_sheet(reference_selector());
        for row in sheet.rows.iter_mut().skip(10) {
            row[0] = Data::Empty;
        }
        let layout = SheetLayout {
            block_rows: 10..20,
            ..SheetLayout::default()
        };

        let err = extract(&sheet, &layout).unwrap_err();
        assert!(matches!(err, AppError::MissingReference { offset: 1, found: 1 }));
    }

    #[test]
    fn non_numeric_cells_coerce_to_missing() {
        let mut sheet = sensitivity_sheet(reference_selector());
        sheet.rows[10][1] = text("n/a");
        sheet.rows[11][3] = text("oops");

        let extraction = extract(&sheet, &SheetLayout::default()).unwrap();
        let full_order = extraction.section("Criteria Weight (Full Order)").unwrap();
        assert_eq!(full_order.rows[0].values[0], None);
        assert_eq!(full_order.rows[1].values[1], None);
    }

    #[test]
    fn negative_infinity_text_stays_negative_downstream() {
        let mut sheet = sensitivity_sheet(reference_selector());
        // "FO min" of C1; "FO max" of C1 holds 11.
        sheet.rows[10][1] = text("-inf");

        let extraction = extract(&sheet, &SheetLayout::default()).unwrap();
        let full_order = extraction.section("Criteria Weight (Full Order)").unwrap();
        assert_eq!(full_order.rows[0].values[0], Some(Value::NegativeInfinity));

        let ranked = rank(&full_order.column_items());
        let c1 = ranked.iter().find(|r| r.column == "C1").unwrap();
        assert_eq!(c1.minimum, Value::NegativeInfinity);
        assert_eq!(c1.minimum_infinity, Some(Infinity::Negative));
        assert_eq!(c1.maximum, Value::Finite(11.0));
        assert_eq!(c1.sort_key, 11.0);

        let changes = change_table(full_order, &extraction.reference);
        assert_eq!(changes.rows[0].values[0], Value::NegativeInfinity);
    }

    #[test]
    fn missing_display_name_falls_back_to_column_key() {
        let mut sheet = sensitivity_sheet(reference_selector());
        sheet.rows[1][3] = Data::Empty;

        let extraction = extract(&sheet, &SheetLayout::default()).unwrap();
        assert_eq!(extraction.columns[2].display, "col3");
    }

    #[test]
    fn layout_with_wide_section_is_rejected() {
        let mut layout = SheetLayout::default();
        layout.sections[0].rows = 2..5;

        let sheet = sensitivity_sheet(reference_selector());
        let err = extract(&sheet, &layout).unwrap_err();
        assert!(matches!(err, AppError::InvalidLayout(_)));
    }

    #[test]
    fn extraction_is_idempotent() {
        let sheet = sensitivity_sheet(reference_selector());
        let layout = SheetLayout::default();

        assert_eq!(extract(&sheet, &layout).unwrap(), extract(&sheet, &layout).unwrap());
    }
}
