//! Shift codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// Which work period (or off-site/rest status) an employee holds on a day.
///
/// The canonical tags are the English names below. The aliases accepted by
/// [`ShiftCode::parse`] are the ones produced by the spreadsheet import.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShiftCode {
    Early,
    Mid,
    Noon,
    Evening,
    Rest,
    Special,
    RemoteSiteA,
    RemoteSiteB,
    /// Unrecognised tag, kept verbatim. Pairs only with the same tag.
    Other(String),
}

impl ShiftCode {
    /// Parse a raw tag. Returns `None` for an empty (absent) tag.
    pub fn parse(tag: &str) -> Option<Self> {
        let code = match tag.trim() {
            "" => return None,
            "early" | "早" | "早班" | "K" | "KK" => Self::Early,
            "mid" | "中" | "中班" | "L" => Self::Mid,
            "noon" | "午" => Self::Noon,
            "evening" | "晚" | "晚班" | "Y" | "YY" => Self::Evening,
            "rest" | "休" | "月休" | "R" => Self::Rest,
            "special" | "特" | "SS" => Self::Special,
            "remote-site-A" => Self::RemoteSiteA,
            "remote-site-B" => Self::RemoteSiteB,
            other => Self::Other(other.to_string()),
        };
        Some(code)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Noon => "noon",
            Self::Evening => "evening",
            Self::Rest => "rest",
            Self::Special => "special",
            Self::RemoteSiteA => "remote-site-A",
            Self::RemoteSiteB => "remote-site-B",
            Self::Other(tag) => tag,
        }
    }

    /// Codes that never count as working together: rest and both off-site codes.
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Rest | Self::RemoteSiteA | Self::RemoteSiteB)
    }

    /// Whether this code counts as a worked day (anything but rest).
    pub fn is_workday(&self) -> bool {
        !matches!(self, Self::Rest)
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShiftCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
