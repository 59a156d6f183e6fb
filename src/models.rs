use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A numeric cell as the analytics see it. Missing cells and undefined ratios are
/// carried as tagged infinities instead of native float infinity, so the sign of
/// an unbounded value is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Finite(f64),
    PositiveInfinity,
    NegativeInfinity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Infinity {
    Positive,
    Negative,
}

impl Value {
    /// NaN has no defined direction and is read as a missing cell (positive infinity).
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() || value == f64::INFINITY {
            Value::PositiveInfinity
        } else if value == f64::NEG_INFINITY {
            Value::NegativeInfinity
        } else {
            Value::Finite(value)
        }
    }

    pub fn finite(self) -> Option<f64> {
        match self {
            Value::Finite(v) => Some(v),
            _ => None,
        }
    }

    /// Native float form, for arithmetic that should carry the infinity sign.
    pub fn to_f64(self) -> f64 {
        match self {
            Value::Finite(v) => v,
            Value::PositiveInfinity => f64::INFINITY,
            Value::NegativeInfinity => f64::NEG_INFINITY,
        }
    }

    pub fn infinity(self) -> Option<Infinity> {
        match self {
            Value::Finite(_) => None,
            Value::PositiveInfinity => Some(Infinity::Positive),
            Value::NegativeInfinity => Some(Infinity::Negative),
        }
    }

    /// Absolute value of a finite cell; infinities have no magnitude here.
    pub fn magnitude(self) -> Option<f64> {
        self.finite().map(f64::abs)
    }

    /// Signed bounds of a pair, ordered `-inf < finite < +inf`.
    pub fn bounds(a: Value, b: Value) -> (Value, Value) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn rank(self) -> u8 {
        match self {
            Value::NegativeInfinity => 0,
            Value::Finite(_) => 1,
            Value::PositiveInfinity => 2,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Finite(a), Value::Finite(b)) => a.partial_cmp(b),
            _ => Some(self.rank().cmp(&other.rank())),
        }
    }
}

/// A missing raw cell reads as positive infinity.
impl From<Option<Value>> for Value {
    fn from(cell: Option<Value>) -> Self {
        cell.unwrap_or(Value::PositiveInfinity)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Finite(v) => write!(f, "{}", v),
            Value::PositiveInfinity => write!(f, "inf"),
            Value::NegativeInfinity => write!(f, "-inf"),
        }
    }
}

/// Sheet column key and the display name taken from the name row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnName {
    pub key: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow<T> {
    pub legend: String,
    pub values: Vec<T>,
}

pub type ReferenceRow = TableRow<Option<Value>>;

/// Two-row table for one weighting scenario. `columns` names the numeric columns;
/// the legend column travels separately in each row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionTable<T> {
    pub name: String,
    pub legend_header: String,
    pub columns: Vec<String>,
    pub rows: [TableRow<T>; 2],
}

/// Raw section cells after numeric coercion. `None` is a missing cell; infinity
/// text in the sheet arrives as a signed `Value`.
pub type Section = SectionTable<Option<Value>>;

/// Section transformed into percentage deviations from the reference row.
pub type ChangeTable = SectionTable<Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnItem {
    pub column: String,
    pub first: Value,
    pub second: Value,
}

impl<T> SectionTable<T>
where
    T: Copy + Into<Value>,
{
    /// One item per numeric column, pairing the values of the two rows.
    pub fn column_items(&self) -> Vec<ColumnItem> {
        let [first, second] = &self.rows;
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| ColumnItem {
                column: column.clone(),
                first: first.values.get(idx).copied().map_or(Value::PositiveInfinity, Into::into),
                second: second.values.get(idx).copied().map_or(Value::PositiveInfinity, Into::into),
            })
            .collect()
    }
}
