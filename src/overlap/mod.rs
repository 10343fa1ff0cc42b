//! Overlap computation.
//!
//! Counts, for every pair of employees, the days on which they worked
//! together under a [`RuleVersion`]:
//!
//! - **Same shift**: both hold the identical code on the day.
//! - **Cross shift**: they hold two different codes the rule version declares
//!   adjacent. Every employee on one side pairs with every employee on the
//!   other.
//!
//! Rest and off-site codes are dropped before grouping, so they never pair.
//! The computation reads no clock and iterates only ordered maps; identical
//! input always yields identical output.

mod summary;

pub use summary::{display_order, intensity, OverlapSummary};

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::rules::RuleVersion;
use crate::schedule::{EmployeeId, ShiftCode, ShiftTable};

/// One contributing day-event in the detail log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapEntry {
    pub day: u32,
    /// The shift code for same-shift pairs, or `"<own>-<other>"` for
    /// cross-shift pairs, written from the row owner's side.
    pub shift_pair_label: String,
}

/// Symmetric pair counts: `employee -> other employee -> days together`.
///
/// Every employee in the schedule has a row; a pair with no shared day has no
/// entry, which reads as zero. There is never a self entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OverlapMatrix {
    counts: BTreeMap<EmployeeId, BTreeMap<EmployeeId, u32>>,
}

impl OverlapMatrix {
    pub fn count(&self, a: &str, b: &str) -> u32 {
        self.counts
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0)
    }

    pub fn row(&self, employee: &str) -> Option<&BTreeMap<EmployeeId, u32>> {
        self.counts.get(employee)
    }

    pub fn employees(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &BTreeMap<EmployeeId, u32>)> {
        self.counts.iter().map(|(id, row)| (id.as_str(), row))
    }

    /// True when no pair has a positive count.
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(BTreeMap::is_empty)
    }

    pub fn summary(&self) -> OverlapSummary {
        OverlapSummary::from_matrix(self)
    }

    fn add_row(&mut self, employee: &str) {
        self.counts.entry(employee.to_string()).or_default();
    }

    fn bump(&mut self, a: &str, b: &str) {
        *self
            .counts
            .entry(a.to_string())
            .or_default()
            .entry(b.to_string())
            .or_insert(0) += 1;
    }
}

/// Per-pair chronological log of the day-events behind each count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OverlapDetailLog {
    entries: BTreeMap<EmployeeId, BTreeMap<EmployeeId, Vec<OverlapEntry>>>,
}

impl OverlapDetailLog {
    pub fn entries(&self, a: &str, b: &str) -> &[OverlapEntry] {
        self.entries
            .get(a)
            .and_then(|row| row.get(b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn row(&self, employee: &str) -> Option<&BTreeMap<EmployeeId, Vec<OverlapEntry>>> {
        self.entries.get(employee)
    }

    fn add_row(&mut self, employee: &str) {
        self.entries.entry(employee.to_string()).or_default();
    }

    fn push(&mut self, a: &str, b: &str, day: u32, label: &str) {
        self.entries
            .entry(a.to_string())
            .or_default()
            .entry(b.to_string())
            .or_default()
            .push(OverlapEntry {
                day,
                shift_pair_label: label.to_string(),
            });
    }
}

/// Matrix and detail log for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlapResult {
    pub matrix: OverlapMatrix,
    pub detail: OverlapDetailLog,
}

impl OverlapResult {
    fn record(&mut self, a: &str, b: &str, day: u32, label_ab: &str, label_ba: &str) {
        self.matrix.bump(a, b);
        self.matrix.bump(b, a);
        self.detail.push(a, b, day, label_ab);
        self.detail.push(b, a, day, label_ba);
    }
}

/// Compute the overlap matrix and detail log for one month.
pub fn compute_overlap(
    schedule: &ShiftTable,
    rule_version: RuleVersion,
    days_in_month: u32,
) -> OverlapResult {
    let mut result = OverlapResult::default();
    for employee in schedule.employee_ids() {
        result.matrix.add_row(employee);
        result.detail.add_row(employee);
    }

    for day in 1..=days_in_month {
        let groups = day_groups(schedule, day);
        if groups.is_empty() {
            continue;
        }

        for (code, employees) in &groups {
            let label = code.as_str();
            for (i, a) in employees.iter().enumerate() {
                for b in &employees[i + 1..] {
                    result.record(a, b, day, label, label);
                }
            }
        }

        pair_adjacent(&mut result, &groups, day, rule_version.adjacency());
    }

    result
}

/// Cross-shift pass for one day. Each unordered pair in `adjacency` applies
/// at most once, whatever its order or repetition in the list.
fn pair_adjacent(
    result: &mut OverlapResult,
    groups: &BTreeMap<&ShiftCode, Vec<&str>>,
    day: u32,
    adjacency: &[(ShiftCode, ShiftCode)],
) {
    let mut applied = BTreeSet::new();
    for (x, y) in adjacency {
        let key = if x <= y { (x, y) } else { (y, x) };
        if x == y || !applied.insert(key) {
            continue;
        }
        let (Some(xs), Some(ys)) = (groups.get(x), groups.get(y)) else {
            continue;
        };

        let forward = format!("{x}-{y}");
        let backward = format!("{y}-{x}");
        for a in xs {
            for b in ys {
                result.record(a, b, day, &forward, &backward);
            }
        }
    }
}

/// Employees grouped by the shift they hold on `day`, excluded codes dropped.
fn day_groups(schedule: &ShiftTable, day: u32) -> BTreeMap<&ShiftCode, Vec<&str>> {
    let mut groups: BTreeMap<&ShiftCode, Vec<&str>> = BTreeMap::new();
    for (employee, row) in schedule.rows() {
        match row.get(&day) {
            Some(code) if !code.is_excluded() => groups.entry(code).or_default().push(employee),
            _ => {}
        }
    }
    groups
}
