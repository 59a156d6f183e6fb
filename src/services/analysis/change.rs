use crate::models::{ChangeTable, ReferenceRow, Section, TableRow, Value};

/// Signed percentage deviation of `current` from `reference`. A missing cell or a
/// zero reference has no defined ratio and is reported as positive infinity. An
/// infinite current value stays infinite with the sign of `(cur - ref) / ref`; an
/// infinite reference leaves the ratio undefined.
pub fn percentage_change(current: Option<Value>, reference: Option<Value>) -> Value {
    match (current, reference) {
        (Some(cur), Some(r)) if r.to_f64() != 0.0 => {
            let (cur, r) = (cur.to_f64(), r.to_f64());
            Value::from_f64((cur - r) / r * 100.0)
        }
        _ => Value::PositiveInfinity,
    }
}

pub fn change_table(section: &Section, reference: &ReferenceRow) -> ChangeTable {
    let convert = |row: &TableRow<Option<Value>>| TableRow {
        legend: row.legend.clone(),
        values: row
            .values
            .iter()
            .enumerate()
            .map(|(idx, &cur)| percentage_change(cur, reference.values.get(idx).copied().flatten()))
            .collect(),
    };

    ChangeTable {
        name: section.name.clone(),
        legend_header: section.legend_header.clone(),
        columns: section.columns.clone(),
        rows: [convert(&section.rows[0]), convert(&section.rows[1])],
    }
}
