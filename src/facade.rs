//! Query facade for dashboard views.
//!
//! The single entry point the matrix table, card view and per-employee
//! ranking modal call. It resolves the target month and rule version, builds
//! the cache fingerprint, and computes on a miss.
//!
//! Nothing here fails: a schedule or name table that is not an object yields
//! empty results, an unparseable month key falls back to the current month,
//! and every skipped input is reported in [`OverlapStats::warnings`].
//!
//! # Example
//!
//! ```ignore
//! use shift_overlap::facade::OverlapAnalytics;
//!
//! let analytics = OverlapAnalytics::default();
//! let stats = analytics.overlap_stats(&schedule_json, &names_json, Some("2025-10"));
//! for entry in stats.ranking("E1") {
//!     println!("{} {}", entry.name, entry.count);
//! }
//! ```

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{Fingerprint, OverlapCache};
use crate::config::{AnalyticsConfig, ConfigError};
use crate::overlap::{compute_overlap, OverlapDetailLog, OverlapMatrix, OverlapResult};
use crate::rules::{RuleSelector, RuleVersion};
use crate::schedule::{InputWarning, NameTable, ShiftCode, ShiftTable, YearMonth};
use crate::stats::{self, ConsecutiveWorkEntry, ShiftCountEntry, ShiftDistribution};

/// One row of a per-employee ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub employee_id: String,
    pub name: String,
    pub count: u32,
}

/// Figures shown above a ranking list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub total: u64,
    pub average: f64,
    pub max: u32,
}

impl RankingSummary {
    pub fn from_ranking(ranking: &[RankingEntry]) -> Self {
        let total: u64 = ranking.iter().map(|e| u64::from(e.count)).sum();
        let max = ranking.iter().map(|e| e.count).max().unwrap_or(0);
        let average = if ranking.is_empty() {
            0.0
        } else {
            total as f64 / ranking.len() as f64
        };
        Self {
            total,
            average,
            max,
        }
    }
}

/// Partners of `employee_id` with a positive count, most frequent first,
/// ties broken by employee id ascending.
pub fn ranking(employee_id: &str, matrix: &OverlapMatrix, names: &NameTable) -> Vec<RankingEntry> {
    let Some(row) = matrix.row(employee_id) else {
        return Vec::new();
    };

    let mut entries: Vec<RankingEntry> = row
        .iter()
        .filter(|&(other, &count)| count > 0 && other.as_str() != employee_id)
        .map(|(other, &count)| RankingEntry {
            employee_id: other.clone(),
            name: names.display_name(other).to_string(),
            count,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    entries
}

/// Result of [`OverlapAnalytics::overlap_stats`].
#[derive(Debug, Clone)]
pub struct OverlapStats {
    pub month: YearMonth,
    pub rule_version: RuleVersion,
    pub result: Arc<OverlapResult>,
    pub names: NameTable,
    pub warnings: Vec<InputWarning>,
}

impl OverlapStats {
    pub fn matrix(&self) -> &OverlapMatrix {
        &self.result.matrix
    }

    pub fn detail(&self) -> &OverlapDetailLog {
        &self.result.detail
    }

    pub fn ranking(&self, employee_id: &str) -> Vec<RankingEntry> {
        ranking(employee_id, self.matrix(), &self.names)
    }
}

/// Parsed inputs for one request.
struct Inputs {
    month: YearMonth,
    month_key: String,
    schedule: ShiftTable,
    names: NameTable,
    warnings: Vec<InputWarning>,
    valid: bool,
}

/// Overlap analytics with an owned cache and rule selector.
#[derive(Debug, Default)]
pub struct OverlapAnalytics {
    cache: OverlapCache,
    selector: RuleSelector,
}

impl OverlapAnalytics {
    pub fn new(cache: OverlapCache, selector: RuleSelector) -> Self {
        Self { cache, selector }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            OverlapCache::from_config(&config.cache),
            RuleSelector::new(config.rules.cutover_month()?),
        ))
    }

    pub fn cache(&self) -> &OverlapCache {
        &self.cache
    }

    pub fn selector(&self) -> &RuleSelector {
        &self.selector
    }

    /// Overlap matrix and detail log for a month of raw schedule data.
    ///
    /// `target_month` is a `YYYY-MM` key with an optional `_<store>` suffix;
    /// `None` means the current month.
    pub fn overlap_stats(
        &self,
        schedule: &Value,
        names: &Value,
        target_month: Option<&str>,
    ) -> OverlapStats {
        let inputs = parse_inputs(schedule, names, target_month);

        if !inputs.valid {
            return OverlapStats {
                month: inputs.month,
                rule_version: self.selector.select(inputs.month),
                result: Arc::new(OverlapResult::default()),
                names: inputs.names,
                warnings: inputs.warnings,
            };
        }

        let (rule_version, result) = self.overlap_for(
            &inputs.schedule,
            &inputs.names,
            inputs.month,
            &inputs.month_key,
        );
        OverlapStats {
            month: inputs.month,
            rule_version,
            result,
            names: inputs.names,
            warnings: inputs.warnings,
        }
    }

    /// Cached overlap for already-parsed tables, with the rule version it
    /// was computed under.
    ///
    /// `month_key` is the caller's cache discriminator, normally the month
    /// key as given including any store suffix.
    pub fn overlap_for(
        &self,
        schedule: &ShiftTable,
        names: &NameTable,
        month: YearMonth,
        month_key: &str,
    ) -> (RuleVersion, Arc<OverlapResult>) {
        let rule_version = self.selector.select(month);
        let days_in_month = month.days_in_month();
        let fingerprint = Fingerprint::compute(month_key, rule_version, schedule, names);

        debug!(
            month = %month,
            rule_version = %rule_version,
            employees = schedule.len(),
            "Resolving overlap stats"
        );
        let result = self.cache.get_or_compute(&fingerprint, || {
            compute_overlap(schedule, rule_version, days_in_month)
        });
        (rule_version, result)
    }

    /// Per-employee day counts for one shift code.
    pub fn shift_counts(
        &self,
        schedule: &Value,
        names: &Value,
        code: &ShiftCode,
        target_month: Option<&str>,
    ) -> Vec<ShiftCountEntry> {
        let inputs = parse_inputs(schedule, names, target_month);
        if !inputs.valid {
            return Vec::new();
        }
        let days_in_month = inputs.month.days_in_month();
        stats::shift_counts(&inputs.schedule, &inputs.names, code, days_in_month)
    }

    /// Longest consecutive-workday run and risk level per employee.
    pub fn consecutive_work(
        &self,
        schedule: &Value,
        names: &Value,
        target_month: Option<&str>,
    ) -> Vec<ConsecutiveWorkEntry> {
        let inputs = parse_inputs(schedule, names, target_month);
        if !inputs.valid {
            return Vec::new();
        }
        let days_in_month = inputs.month.days_in_month();
        stats::consecutive_work(&inputs.schedule, &inputs.names, days_in_month)
    }

    /// Shift mix per employee.
    pub fn shift_distribution(
        &self,
        schedule: &Value,
        names: &Value,
        target_month: Option<&str>,
    ) -> Vec<ShiftDistribution> {
        let inputs = parse_inputs(schedule, names, target_month);
        if !inputs.valid {
            return Vec::new();
        }
        let days_in_month = inputs.month.days_in_month();
        stats::shift_distribution(&inputs.schedule, &inputs.names, days_in_month)
    }
}

/// Process-wide analytics instance, created with defaults on first use.
pub fn global() -> &'static OverlapAnalytics {
    static GLOBAL: OnceLock<OverlapAnalytics> = OnceLock::new();
    GLOBAL.get_or_init(OverlapAnalytics::default)
}

fn resolve_month(
    target_month: Option<&str>,
    warnings: &mut Vec<InputWarning>,
) -> (YearMonth, String) {
    let Some(key) = target_month else {
        let month = YearMonth::current();
        return (month, month.to_string());
    };

    match YearMonth::parse_key(key) {
        Ok(month) => (month, key.to_string()),
        Err(e) => {
            let fallback = YearMonth::current();
            warn!(key = %key, error = %e, fallback = %fallback, "Unresolvable month key");
            warnings.push(InputWarning::InvalidMonthKey {
                key: key.to_string(),
                fallback,
            });
            (fallback, fallback.to_string())
        }
    }
}

fn parse_inputs(schedule: &Value, names: &Value, target_month: Option<&str>) -> Inputs {
    let mut warnings = Vec::new();
    let (month, month_key) = resolve_month(target_month, &mut warnings);

    let (schedule, schedule_warnings) = ShiftTable::from_json(schedule, month.days_in_month());
    let (names, name_warnings) = NameTable::from_json(names);

    let valid = !schedule_warnings.contains(&InputWarning::ScheduleNotObject)
        && !name_warnings.contains(&InputWarning::NamesNotObject);
    warnings.extend(schedule_warnings);
    warnings.extend(name_warnings);

    if !warnings.is_empty() {
        debug!(count = warnings.len(), valid, "Schedule input had warnings");
    }

    Inputs {
        month,
        month_key,
        schedule,
        names,
        warnings,
        valid,
    }
}
