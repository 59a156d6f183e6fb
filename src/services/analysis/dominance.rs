use crate::models::{ColumnItem, Value};
use serde::Serialize;

/// Magnitude bounds of a column: smaller absolute deviation on `x`, larger on `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Both coordinates are minimized.
    pub fn dominates(&self, other: &Point) -> bool {
        self.x <= other.x && self.y <= other.y && (self.x < other.x || self.y < other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedColumn {
    pub column: String,
    pub point: Point,
}

/// Which of the column's two values is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfiniteSide {
    Val1,
    Val2,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfiniteColumn {
    pub column: String,
    pub side: InfiniteSide,
    pub first: Value,
    pub second: Value,
    /// The finite value of the pair, if any, for placing the column on a chart edge.
    pub companion: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DominanceReport {
    pub non_dominated: Vec<ClassifiedColumn>,
    pub dominated: Vec<ClassifiedColumn>,
    pub infinite: Vec<InfiniteColumn>,
    /// Columns whose two magnitudes are both zero.
    pub degenerate: Vec<String>,
}

impl DominanceReport {
    /// True only when no column was classified at all, degenerate ones included.
    pub fn is_empty(&self) -> bool {
        self.non_dominated.is_empty()
            && self.dominated.is_empty()
            && self.infinite.is_empty()
            && self.degenerate.is_empty()
    }
}

pub fn is_dominated(point: &Point, points: &[Point]) -> bool {
    points.iter().any(|other| other.dominates(point))
}

pub fn classify(items: &[ColumnItem]) -> DominanceReport {
    let mut report = DominanceReport::default();
    let mut finite = Vec::new();

    for item in items {
        let (v1, v2) = match (item.first.finite(), item.second.finite()) {
            (Some(v1), Some(v2)) => (v1, v2),
            (first, second) => {
                let side = match (first, second) {
                    (None, None) => InfiniteSide::Both,
                    (None, Some(_)) => InfiniteSide::Val1,
                    _ => InfiniteSide::Val2,
                };
                report.infinite.push(InfiniteColumn {
                    column: item.column.clone(),
                    side,
                    first: item.first,
                    second: item.second,
                    companion: first.or(second),
                });
                continue;
            }
        };

        let (a, b) = (v1.abs(), v2.abs());
        let point = Point {
            x: a.min(b),
            y: a.max(b),
        };
        if point.x == 0.0 && point.y == 0.0 {
            report.degenerate.push(item.column.clone());
            continue;
        }
        finite.push(ClassifiedColumn {
            column: item.column.clone(),
            point,
        });
    }

    let points: Vec<Point> = finite.iter().map(|c| c.point).collect();
    for column in finite {
        if is_dominated(&column.point, &points) {
            report.dominated.push(column);
        } else {
            report.non_dominated.push(column);
        }
    }

    tracing::debug!(
        "Dominance: {} non-dominated, {} dominated, {} infinite, {} degenerate",
        report.non_dominated.len(),
        report.dominated.len(),
        report.infinite.len(),
        report.degenerate.len()
    );
    report
}
