//! Rule version selection.
//!
//! What counts as "worked together" changed in October 2025. Statistics for
//! a month are always computed with the rules that applied in that month, so
//! the version is a function of the target month, never of today's date.

use std::fmt;

use serde::Serialize;

use crate::schedule::{ShiftCode, YearMonth};

/// First month computed with [`RuleVersion::Current`].
pub const DEFAULT_CUTOVER: YearMonth = YearMonth {
    year: 2025,
    month: 10,
};

const LEGACY_ADJACENCY: &[(ShiftCode, ShiftCode)] = &[
    (ShiftCode::Early, ShiftCode::Mid),
    (ShiftCode::Mid, ShiftCode::Evening),
];

const CURRENT_ADJACENCY: &[(ShiftCode, ShiftCode)] = &[
    (ShiftCode::Early, ShiftCode::Mid),
    (ShiftCode::Early, ShiftCode::Noon),
    (ShiftCode::Mid, ShiftCode::Noon),
    (ShiftCode::Noon, ShiftCode::Evening),
];

/// Versioned definition of which different shifts overlap.
///
/// Same-shift pairing applies under every version; the versions differ only
/// in their cross-shift adjacency pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleVersion {
    Legacy,
    Current,
}

impl RuleVersion {
    /// Cross-shift pairs that count as working together.
    pub fn adjacency(&self) -> &'static [(ShiftCode, ShiftCode)] {
        match self {
            Self::Legacy => LEGACY_ADJACENCY,
            Self::Current => CURRENT_ADJACENCY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for RuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a target month to its rule version around a configurable cutover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSelector {
    cutover: YearMonth,
}

impl RuleSelector {
    pub fn new(cutover: YearMonth) -> Self {
        Self { cutover }
    }

    pub fn cutover(&self) -> YearMonth {
        self.cutover
    }

    pub fn select(&self, month: YearMonth) -> RuleVersion {
        if month >= self.cutover {
            RuleVersion::Current
        } else {
            RuleVersion::Legacy
        }
    }
}

impl Default for RuleSelector {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOVER)
    }
}

/// Select the rule version for a month using [`DEFAULT_CUTOVER`].
pub fn select_rule_version(month: YearMonth) -> RuleVersion {
    RuleSelector::default().select(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_cutover_boundary() {
        assert_eq!(select_rule_version(ym(2025, 9)), RuleVersion::Legacy);
        assert_eq!(select_rule_version(ym(2025, 10)), RuleVersion::Current);
        assert_eq!(select_rule_version(ym(2025, 12)), RuleVersion::Current);
    }

    #[test]
    fn test_later_years_use_current() {
        assert_eq!(select_rule_version(ym(2026, 1)), RuleVersion::Current);
        assert_eq!(select_rule_version(ym(2030, 5)), RuleVersion::Current);
    }

    #[test]
    fn test_earlier_years_use_legacy() {
        assert_eq!(select_rule_version(ym(2024, 11)), RuleVersion::Legacy);
        assert_eq!(select_rule_version(ym(2025, 1)), RuleVersion::Legacy);
    }

    #[test]
    fn test_custom_cutover() {
        let selector = RuleSelector::new(ym(2026, 4));
        assert_eq!(selector.select(ym(2026, 3)), RuleVersion::Legacy);
        assert_eq!(selector.select(ym(2026, 4)), RuleVersion::Current);
    }

    #[test]
    fn test_legacy_adjacency() {
        let pairs = RuleVersion::Legacy.adjacency();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&(ShiftCode::Early, ShiftCode::Mid)));
        assert!(pairs.contains(&(ShiftCode::Mid, ShiftCode::Evening)));
    }

    #[test]
    fn test_current_adjacency() {
        let pairs = RuleVersion::Current.adjacency();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&(ShiftCode::Mid, ShiftCode::Noon)));
        assert!(pairs.contains(&(ShiftCode::Noon, ShiftCode::Evening)));
        assert!(!pairs.contains(&(ShiftCode::Mid, ShiftCode::Evening)));
    }

    #[test]
    fn test_excluded_codes_never_adjacent() {
        for version in [RuleVersion::Legacy, RuleVersion::Current] {
            for (x, y) in version.adjacency() {
                assert!(!x.is_excluded() && !y.is_excluded());
            }
        }
    }
}
