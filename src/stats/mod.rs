//! Per-employee schedule statistics shown next to the overlap views.
//!
//! All functions are pure over an already-parsed [`ShiftTable`] and only
//! look at days `1..=days_in_month`.

use serde::Serialize;

use crate::overlap::display_order;
use crate::schedule::{NameTable, ShiftCode, ShiftTable};

/// Runs of at least this many worked days are high risk.
pub const HIGH_RISK_RUN: u32 = 6;
/// Runs of at least this many worked days are medium risk.
pub const MEDIUM_RISK_RUN: u32 = 4;

/// How many days an employee held one particular shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftCountEntry {
    pub employee_id: String,
    pub name: String,
    pub count: u32,
}

/// Fatigue risk from consecutive worked days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_run(days: u32) -> Self {
        if days >= HIGH_RISK_RUN {
            Self::High
        } else if days >= MEDIUM_RISK_RUN {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsecutiveWorkEntry {
    pub employee_id: String,
    pub name: String,
    pub max_consecutive: u32,
    pub risk_level: RiskLevel,
}

/// Shift mix for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDistribution {
    pub employee_id: String,
    pub name: String,
    pub early: u32,
    pub mid: u32,
    pub noon: u32,
    pub evening: u32,
    pub rest: u32,
    pub special: u32,
    /// Either off-site code.
    pub remote: u32,
    /// Unrecognised tags.
    pub other: u32,
    /// Days with any assignment.
    pub total: u32,
}

/// Days each employee held `code`, highest first. Zero counts are omitted.
pub fn shift_counts(
    schedule: &ShiftTable,
    names: &NameTable,
    code: &ShiftCode,
    days_in_month: u32,
) -> Vec<ShiftCountEntry> {
    let mut entries: Vec<ShiftCountEntry> = schedule
        .rows()
        .filter_map(|(employee, row)| {
            let count = (1..=days_in_month)
                .filter(|day| row.get(day) == Some(code))
                .count() as u32;
            (count > 0).then(|| ShiftCountEntry {
                employee_id: employee.to_string(),
                name: names.display_name(employee).to_string(),
                count,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    entries
}

/// Longest run of consecutive worked days per employee, longest first.
///
/// Any assigned code except rest counts as worked. Employees who never
/// worked are omitted.
pub fn consecutive_work(
    schedule: &ShiftTable,
    names: &NameTable,
    days_in_month: u32,
) -> Vec<ConsecutiveWorkEntry> {
    let mut entries: Vec<ConsecutiveWorkEntry> = schedule
        .rows()
        .filter_map(|(employee, row)| {
            let mut longest = 0;
            let mut current = 0;
            for day in 1..=days_in_month {
                if row.get(&day).is_some_and(ShiftCode::is_workday) {
                    current += 1;
                    longest = longest.max(current);
                } else {
                    current = 0;
                }
            }

            (longest > 0).then(|| ConsecutiveWorkEntry {
                employee_id: employee.to_string(),
                name: names.display_name(employee).to_string(),
                max_consecutive: longest,
                risk_level: RiskLevel::from_run(longest),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.max_consecutive
            .cmp(&a.max_consecutive)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    entries
}

/// Shift mix per employee in display order. Employees with no assigned day
/// are omitted.
pub fn shift_distribution(
    schedule: &ShiftTable,
    names: &NameTable,
    days_in_month: u32,
) -> Vec<ShiftDistribution> {
    display_order(schedule.employee_ids())
        .into_iter()
        .filter_map(|employee| {
            let mut dist = ShiftDistribution {
                employee_id: employee.to_string(),
                name: names.display_name(employee).to_string(),
                ..Default::default()
            };

            for day in 1..=days_in_month {
                let Some(code) = schedule.shift(employee, day) else {
                    continue;
                };
                dist.total += 1;
                match code {
                    ShiftCode::Early => dist.early += 1,
                    ShiftCode::Mid => dist.mid += 1,
                    ShiftCode::Noon => dist.noon += 1,
                    ShiftCode::Evening => dist.evening += 1,
                    ShiftCode::Rest => dist.rest += 1,
                    ShiftCode::Special => dist.special += 1,
                    ShiftCode::RemoteSiteA | ShiftCode::RemoteSiteB => dist.remote += 1,
                    ShiftCode::Other(_) => dist.other += 1,
                }
            }

            (dist.total > 0).then_some(dist)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> NameTable {
        [("E1", "Alice"), ("E2", "Bob")].into_iter().collect()
    }

    fn run(
        schedule: ShiftTable,
        employee: &str,
        days: std::ops::RangeInclusive<u32>,
        code: ShiftCode,
    ) -> ShiftTable {
        days.fold(schedule, |table, day| {
            table.with_shift(employee, day, code.clone())
        })
    }

    #[test]
    fn test_shift_counts() {
        let schedule = ShiftTable::new()
            .with_shift("E1", 1, ShiftCode::Early)
            .with_shift("E1", 2, ShiftCode::Early)
            .with_shift("E2", 1, ShiftCode::Early)
            .with_shift("E3", 1, ShiftCode::Mid)
            .with_shift("E3", 2, ShiftCode::Early)
            .with_shift("E3", 3, ShiftCode::Early);

        let counts = shift_counts(&schedule, &names(), &ShiftCode::Early, 30);

        let summary: Vec<(&str, &str, u32)> = counts
            .iter()
            .map(|e| (e.employee_id.as_str(), e.name.as_str(), e.count))
            .collect();
        assert_eq!(
            summary,
            vec![("E1", "Alice", 2), ("E3", "E3", 2), ("E2", "Bob", 1)]
        );
    }

    #[test]
    fn test_consecutive_work_and_risk() {
        let schedule = run(ShiftTable::new(), "E1", 1..=6, ShiftCode::Early);
        let schedule = run(schedule, "E2", 1..=3, ShiftCode::Mid)
            .with_shift("E2", 4, ShiftCode::Rest)
            .with_shift("E2", 5, ShiftCode::RemoteSiteA)
            .with_shift("E2", 6, ShiftCode::Mid)
            .with_shift("E2", 7, ShiftCode::Mid)
            .with_shift("E2", 8, ShiftCode::Special)
            .with_shift("E3", 1, ShiftCode::Rest);

        let stats = consecutive_work(&schedule, &names(), 30);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].employee_id, "E1");
        assert_eq!(stats[0].max_consecutive, 6);
        assert_eq!(stats[0].risk_level, RiskLevel::High);
        assert_eq!(stats[1].employee_id, "E2");
        assert_eq!(stats[1].max_consecutive, 4);
        assert_eq!(stats[1].risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(RiskLevel::from_run(3), RiskLevel::Low);
        assert_eq!(RiskLevel::from_run(4), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_run(5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_run(6), RiskLevel::High);
    }

    #[test]
    fn test_shift_distribution() {
        let mut schedule = ShiftTable::new()
            .with_shift("E10", 1, ShiftCode::Early)
            .with_shift("E2", 1, ShiftCode::Noon)
            .with_shift("E2", 2, ShiftCode::Rest)
            .with_shift("E2", 3, ShiftCode::RemoteSiteB)
            .with_shift("E2", 4, ShiftCode::Other("training".to_string()))
            .with_shift("E2", 40, ShiftCode::Early);
        schedule.add_employee("E5");

        let dist = shift_distribution(&schedule, &names(), 30);

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].employee_id, "E2");
        assert_eq!(dist[0].name, "Bob");
        assert_eq!(
            (dist[0].noon, dist[0].rest, dist[0].remote, dist[0].other, dist[0].total),
            (1, 1, 1, 1, 4)
        );
        assert_eq!(dist[1].employee_id, "E10");
        assert_eq!(dist[1].early, 1);
    }
}
