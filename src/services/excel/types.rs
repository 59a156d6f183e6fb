use calamine::Data;
use serde::Serialize;
use std::ops::Range;

static EMPTY_CELL: Data = Data::Empty;

pub const SECTION_ROWS: usize = 2;

/// First worksheet of a workbook. `headers` holds the column keys read from the
/// worksheet's first row; `rows` holds every row below it, so data row 0 is the
/// second worksheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

impl Sheet {
    /// Builds a sheet from a full grid whose first row is the header row.
    pub fn from_grid(name: impl Into<String>, mut grid: Vec<Vec<Data>>) -> Self {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let header_row = if grid.is_empty() { Vec::new() } else { grid.remove(0) };
        let headers = (0..width)
            .map(|idx| super::utils::header_key(header_row.get(idx), idx))
            .collect();

        Self {
            name: name.into(),
            headers,
            rows: grid,
        }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at a data row and column; anything outside the grid reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Data {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSpec {
    pub name: String,
    pub rows: Range<usize>,
}

/// Fixed row positions of a sensitivity-analysis sheet. `selector_row`,
/// `name_row` and `block_rows` index data rows of the sheet; `reference_offset`
/// and the section ranges index the extracted block after empty legend rows
/// are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetLayout {
    pub selector_row: usize,
    pub name_row: usize,
    pub block_rows: Range<usize>,
    pub reference_offset: usize,
    pub sections: Vec<SectionSpec>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        let section = |name: &str, start: usize| SectionSpec {
            name: name.to_string(),
            rows: start..start + SECTION_ROWS,
        };

        Self {
            selector_row: 9,
            name_row: 1,
            block_rows: 9..20,
            reference_offset: 1,
            sections: vec![
                section("Criteria Weight (Full Order)", 2),
                section("Criteria Weight - Top:1", 4),
                section("Criteria Weight Normalised (Full Order)", 6),
                section("Criteria Weight Normalised - Top:1", 8),
            ],
        }
    }
}
