//! Matrix-wide figures used by the table and card views.

use serde::Serialize;

use super::OverlapMatrix;

/// Aggregate figures over all ordered pairs with a positive count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapSummary {
    /// Sum of counts over ordered pairs (each unordered pair counted twice).
    pub total_overlaps: u64,
    /// Largest count in the matrix; the colour-scale denominator.
    pub max_overlap: u32,
    /// Number of ordered pairs with a positive count.
    pub total_pairs: usize,
    pub avg_overlap: f64,
}

impl OverlapSummary {
    pub fn from_matrix(matrix: &OverlapMatrix) -> Self {
        let mut summary = Self::default();

        for (_, row) in matrix.rows() {
            for &count in row.values().filter(|&&count| count > 0) {
                summary.total_overlaps += u64::from(count);
                summary.max_overlap = summary.max_overlap.max(count);
                summary.total_pairs += 1;
            }
        }

        if summary.total_pairs > 0 {
            summary.avg_overlap = summary.total_overlaps as f64 / summary.total_pairs as f64;
        }
        summary
    }
}

/// Colour intensity of a cell: `count / max`, clamped to `[0, 1]`.
pub fn intensity(count: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(count) / f64::from(max)).min(1.0)
}

/// Order employee ids for display by the first number in the id (0 when
/// there is none), then by the id itself.
pub fn display_order<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut ids: Vec<&str> = ids.into_iter().collect();
    ids.sort_by(|a, b| numeric_part(a).cmp(&numeric_part(b)).then_with(|| a.cmp(b)));
    ids
}

fn numeric_part(id: &str) -> u64 {
    id.chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c.to_digit(10).unwrap_or(0)))
        })
}
