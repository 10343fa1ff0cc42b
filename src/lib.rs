//! Shift Overlap Analytics
//!
//! Derives "who worked together with whom" statistics from a month of shift
//! assignments. Which shift combinations count as working together depends
//! on the month (see [`rules`]); results are memoized per input fingerprint
//! (see [`cache`]). Dashboard views go through [`facade::OverlapAnalytics`].

pub mod cache;
pub mod config;
pub mod facade;
pub mod overlap;
pub mod rules;
pub mod schedule;
pub mod stats;
pub mod utils;

pub use facade::{OverlapAnalytics, OverlapStats, RankingEntry};
pub use overlap::{compute_overlap, OverlapResult};
pub use rules::{select_rule_version, RuleVersion};
pub use schedule::{NameTable, ShiftCode, ShiftTable, YearMonth};
