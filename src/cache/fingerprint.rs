//! Cache keys derived from everything that can change a computed result.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::rules::RuleVersion;
use crate::schedule::{NameTable, ShiftTable};

/// SHA-256 (hex) over the month key, rule version, employee set, shift rows
/// and name table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn compute(
        month_key: &str,
        rule_version: RuleVersion,
        schedule: &ShiftTable,
        names: &NameTable,
    ) -> Self {
        let mut hasher = Sha256::new();
        feed(&mut hasher, month_key);
        feed(&mut hasher, rule_version.as_str());

        hasher.update((schedule.len() as u64).to_le_bytes());
        for employee in schedule.employee_ids() {
            feed(&mut hasher, employee);
        }

        for (employee, row) in schedule.rows() {
            feed(&mut hasher, employee);
            hasher.update((row.len() as u64).to_le_bytes());
            for (day, code) in row {
                hasher.update(day.to_le_bytes());
                feed(&mut hasher, code.as_str());
            }
        }

        hasher.update((names.len() as u64).to_le_bytes());
        for (employee, name) in names.iter() {
            feed(&mut hasher, employee);
            feed(&mut hasher, name);
        }

        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length-prefixed so adjacent fields cannot run together.
fn feed(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ShiftCode;

    fn schedule() -> ShiftTable {
        ShiftTable::new()
            .with_shift("E1", 1, ShiftCode::Early)
            .with_shift("E2", 1, ShiftCode::Mid)
    }

    fn names() -> NameTable {
        [("E1", "Alice"), ("E2", "Bob")].into_iter().collect()
    }

    #[test]
    fn test_same_inputs_same_fingerprint() {
        let a = Fingerprint::compute("2025-10", RuleVersion::Current, &schedule(), &names());
        let b = Fingerprint::compute("2025-10", RuleVersion::Current, &schedule(), &names());
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_month_key_changes_fingerprint() {
        let a = Fingerprint::compute("2025-10", RuleVersion::Current, &schedule(), &names());
        let b = Fingerprint::compute("2025-10_north", RuleVersion::Current, &schedule(), &names());
        assert_ne!(a, b);
    }

    #[test]
    fn test_name_change_changes_fingerprint() {
        let mut renamed = names();
        renamed.insert("E2", "Robert");

        let a = Fingerprint::compute("2025-10", RuleVersion::Current, &schedule(), &names());
        let b = Fingerprint::compute("2025-10", RuleVersion::Current, &schedule(), &renamed);
        assert_ne!(a, b);
    }

    #[test]
    fn test_shift_change_changes_fingerprint() {
        let edited = schedule().with_shift("E2", 1, ShiftCode::Noon);

        let a = Fingerprint::compute("2025-10", RuleVersion::Current, &schedule(), &names());
        let b = Fingerprint::compute("2025-10", RuleVersion::Current, &edited, &names());
        assert_ne!(a, b);
    }

    #[test]
    fn test_rule_version_changes_fingerprint() {
        let a = Fingerprint::compute("2025-10", RuleVersion::Current, &schedule(), &names());
        let b = Fingerprint::compute("2025-10", RuleVersion::Legacy, &schedule(), &names());
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        let ab: NameTable = [("E1", "ab")].into_iter().collect();
        let a_b: NameTable = [("E1a", "b")].into_iter().collect();

        let x = Fingerprint::compute("2025-10", RuleVersion::Current, &ShiftTable::new(), &ab);
        let y = Fingerprint::compute("2025-10", RuleVersion::Current, &ShiftTable::new(), &a_b);
        assert_ne!(x, y);
    }
}
