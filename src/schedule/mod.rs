//! Schedule input model.
//!
//! The data-loading layer hands over two JSON documents: the shift table
//! (`employee -> day -> tag`) and the name table (`employee -> display name`).
//! This module turns them into typed [`ShiftTable`] / [`NameTable`] values.
//! Malformed entries are skipped and reported as [`InputWarning`]s; parsing
//! itself never fails.

mod code;
mod month;

pub use code::ShiftCode;
pub use month::{MonthKeyError, YearMonth};

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Reserved shift-table key carrying the last-updated timestamp.
pub const LAST_UPDATED_KEY: &str = "_lastUpdated";

/// Employee identifier as used by the document store.
pub type EmployeeId = String;

/// Non-fatal problems found while reading input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputWarning {
    #[error("Schedule is not an object")]
    ScheduleNotObject,

    #[error("Name table is not an object")]
    NamesNotObject,

    #[error("Row for employee '{employee}' is not an object")]
    InvalidRow { employee: String },

    #[error("Employee '{employee}' has invalid day key '{key}'")]
    InvalidDay { employee: String, key: String },

    #[error("Employee '{employee}' has a non-string shift on day {day}")]
    InvalidShift { employee: String, day: u32 },

    #[error("Name for employee '{employee}' is not a string")]
    InvalidName { employee: String },

    #[error("Unresolvable month key '{key}', using {fallback}")]
    InvalidMonthKey { key: String, fallback: YearMonth },
}

/// One month of shift assignments.
///
/// Rows are keyed by employee id and ordered, so every iteration over the
/// table is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShiftTable {
    rows: BTreeMap<EmployeeId, BTreeMap<u32, ShiftCode>>,
}

impl ShiftTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the document-store shape.
    ///
    /// Day keys must be canonical decimals (`"7"`, not `"07"` or `"+7"`) within
    /// `1..=days_in_month`; anything else is skipped. Employees whose row
    /// is unusable are still listed, with no shifts.
    pub fn from_json(value: &Value, days_in_month: u32) -> (Self, Vec<InputWarning>) {
        let mut table = Self::new();
        let mut warnings = Vec::new();

        let Some(employees) = value.as_object() else {
            warnings.push(InputWarning::ScheduleNotObject);
            return (table, warnings);
        };

        for (employee, row) in employees {
            if employee == LAST_UPDATED_KEY {
                continue;
            }
            table.add_employee(employee.as_str());

            let Some(days) = row.as_object() else {
                if !row.is_null() {
                    warnings.push(InputWarning::InvalidRow {
                        employee: employee.clone(),
                    });
                }
                continue;
            };

            for (key, shift) in days {
                let day = match parse_day(key, days_in_month) {
                    Some(day) => day,
                    None => {
                        debug!(employee = %employee, key = %key, "Skipping invalid day key");
                        warnings.push(InputWarning::InvalidDay {
                            employee: employee.clone(),
                            key: key.clone(),
                        });
                        continue;
                    }
                };

                match shift {
                    Value::String(tag) => {
                        if let Some(code) = ShiftCode::parse(tag) {
                            table.insert(employee.as_str(), day, code);
                        }
                    }
                    Value::Null => {}
                    _ => {
                        debug!(employee = %employee, day, "Skipping non-string shift");
                        warnings.push(InputWarning::InvalidShift {
                            employee: employee.clone(),
                            day,
                        });
                    }
                }
            }
        }

        (table, warnings)
    }

    /// List an employee even if they hold no shifts.
    pub fn add_employee(&mut self, employee: impl Into<EmployeeId>) {
        self.rows.entry(employee.into()).or_default();
    }

    pub fn insert(&mut self, employee: impl Into<EmployeeId>, day: u32, code: ShiftCode) {
        self.rows.entry(employee.into()).or_default().insert(day, code);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_shift(
        mut self,
        employee: impl Into<EmployeeId>,
        day: u32,
        code: ShiftCode,
    ) -> Self {
        self.insert(employee, day, code);
        self
    }

    pub fn shift(&self, employee: &str, day: u32) -> Option<&ShiftCode> {
        self.rows.get(employee)?.get(&day)
    }

    /// Employee ids in ascending order.
    pub fn employee_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &BTreeMap<u32, ShiftCode>)> {
        self.rows.iter().map(|(id, row)| (id.as_str(), row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A day key as the document store writes it: the plain decimal day number.
fn parse_day(key: &str, days_in_month: u32) -> Option<u32> {
    let day = key.parse::<u32>().ok()?;
    (day.to_string() == key && (1..=days_in_month).contains(&day)).then_some(day)
}

/// Employee id to display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameTable {
    names: BTreeMap<EmployeeId, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(value: &Value) -> (Self, Vec<InputWarning>) {
        let mut table = Self::new();
        let mut warnings = Vec::new();

        let Some(entries) = value.as_object() else {
            warnings.push(InputWarning::NamesNotObject);
            return (table, warnings);
        };

        for (employee, name) in entries {
            match name.as_str() {
                Some(name) => table.insert(employee.as_str(), name),
                None => warnings.push(InputWarning::InvalidName {
                    employee: employee.clone(),
                }),
            }
        }

        (table, warnings)
    }

    pub fn insert(&mut self, employee: impl Into<EmployeeId>, name: impl Into<String>) {
        self.names.insert(employee.into(), name.into());
    }

    /// Display name for an employee, falling back to the id itself.
    pub fn display_name<'a>(&'a self, employee: &'a str) -> &'a str {
        self.names.get(employee).map(String::as_str).unwrap_or(employee)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<EmployeeId>, V: Into<String>> FromIterator<(K, V)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (employee, name) in iter {
            table.insert(employee, name);
        }
        table
    }
}

#[cfg(test)]
mod tests;
