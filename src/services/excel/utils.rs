use crate::models::Value;
use calamine::Data;

/// Text values read as missing, the same tokens a pandas reader drops to NaN.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn header_key(cell: Option<&Data>, idx: usize) -> String {
    match cell {
        Some(cell) if !is_missing(cell) => display_text(cell),
        _ => format!("Unnamed: {}", idx),
    }
}

pub fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::Float(f) => f.is_nan(),
        Data::String(s) => NA_TOKENS.contains(&s.as_str()),
        _ => false,
    }
}

pub fn is_zero(cell: &Data) -> bool {
    match cell {
        Data::Float(f) => *f == 0.0,
        Data::Int(i) => *i == 0,
        Data::Bool(b) => !b,
        _ => false,
    }
}

/// Lenient numeric coercion. Failures and NaN become a missing cell rather than an
/// error; infinity text (`inf`, `-inf`, `Infinity`) keeps its sign.
pub fn coerce_numeric(cell: &Data) -> Option<Value> {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (!value.is_nan()).then(|| Value::from_f64(value))
}

/// Text form of a cell for names and legend labels. Whole floats drop the
/// trailing `.0` so a numeric label reads the way the sheet shows it.
pub fn display_text(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::String(s) => s.trim().to_string(),
        _ => cell.to_string(),
    }
}
