// SocialGaze - core/aggregate.rs
//
// Stateless aggregation over a loaded dataset.
// Every function re-scans the full dataset; results are never cached.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::matcher::{Conditions, Matcher};
use crate::core::model::{Dataset, Series, SeriesPoint};

/// How a series category selects its records.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// One field tested with one matcher.
    Field { key: String, matcher: Matcher },

    /// Several fields, all of which must match.
    All(Conditions),
}

impl Criterion {
    pub fn field(key: &str, matcher: Matcher) -> Self {
        Criterion::Field {
            key: key.to_string(),
            matcher,
        }
    }
}

/// A named category of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub criterion: Criterion,
}

impl Category {
    pub fn new(name: impl Into<String>, criterion: Criterion) -> Self {
        Self {
            name: name.into(),
            criterion,
        }
    }
}

/// Count records whose `key` field matches `matcher`.
pub fn count_by_field(dataset: &Dataset, key: &str, matcher: &Matcher) -> usize {
    dataset
        .iter()
        .filter(|record| matcher.matches(record.get(key)))
        .count()
}

/// Count records satisfying every condition. Empty conditions count the
/// whole dataset.
pub fn count_by_conditions(dataset: &Dataset, conditions: &Conditions) -> usize {
    if conditions.is_empty() {
        return dataset.len();
    }
    dataset
        .iter()
        .filter(|record| conditions.matches(record))
        .count()
}

/// Evaluate each category in order, producing one series point per category.
pub fn build_series(dataset: &Dataset, categories: &[Category]) -> Series {
    let points = categories
        .iter()
        .map(|category| {
            let count = match &category.criterion {
                Criterion::Field { key, matcher } => count_by_field(dataset, key, matcher),
                Criterion::All(conditions) => count_by_conditions(dataset, conditions),
            };
            SeriesPoint {
                name: category.name.clone(),
                value: to_signed(count),
            }
        })
        .collect();
    Series::new(points)
}

/// `total - count`, unclamped. Inconsistent inputs yield a negative result.
pub fn complement(total: usize, count: usize) -> i64 {
    let result = to_signed(total) - to_signed(count);
    if result < 0 {
        tracing::debug!(total, count, result, "Complement is negative");
    }
    result
}

/// Record counts are bounded by memory, far below `i64::MAX`.
pub(crate) fn to_signed(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
