use crate::models::{ColumnItem, Infinity, Value};
use serde::Serialize;
use std::cmp::Ordering;

/// Ranking bands. Every finite column sorts before any column touching infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeCategory {
    Finite,
    OneInfinite,
    BothInfinite,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedColumn {
    pub column: String,
    pub minimum: Value,
    pub maximum: Value,
    pub category: MagnitudeCategory,
    pub sort_key: f64,
    pub minimum_infinity: Option<Infinity>,
    pub maximum_infinity: Option<Infinity>,
}

impl RankedColumn {
    fn from_item(item: &ColumnItem) -> Self {
        let (minimum, maximum) = Value::bounds(item.first, item.second);

        // An infinite bound adds nothing to the key; only the finite side is measured.
        let (category, sort_key) = match (minimum.magnitude(), maximum.magnitude()) {
            (Some(lo), Some(hi)) => (MagnitudeCategory::Finite, lo.max(hi)),
            (Some(m), None) | (None, Some(m)) => (MagnitudeCategory::OneInfinite, m),
            (None, None) => (MagnitudeCategory::BothInfinite, 0.0),
        };

        Self {
            column: item.column.clone(),
            minimum,
            maximum,
            category,
            sort_key,
            minimum_infinity: minimum.infinity(),
            maximum_infinity: maximum.infinity(),
        }
    }

    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.sort_key.total_cmp(&other.sort_key))
    }
}

/// Orders columns for a tornado layout: by category, then by magnitude key,
/// ascending. Ties keep their input order.
pub fn rank(items: &[ColumnItem]) -> Vec<RankedColumn> {
    let mut ranked: Vec<RankedColumn> = items.iter().map(RankedColumn::from_item).collect();
    ranked.sort_by(RankedColumn::rank_cmp);
    ranked
}
