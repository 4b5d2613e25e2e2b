//! Domain types shared between the client and its consumers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// Profile of the authenticated user.
///
/// The client passes this through unchanged; fields beyond the ones named
/// here are preserved in `extra` so the server can evolve its shape without
/// breaking consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Option<JsonValue>,
}

/// A single roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee identifier assigned by the organization (not the database).
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Attendance outcome for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("Present"),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

/// Error returned when parsing an unrecognized attendance status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attendance status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AttendanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One recorded attendance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Aggregate statistics for the dashboard page.
///
/// Every field defaults to zero so a partial server payload still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_employees: u64,
    pub total_attendance: u64,
    pub present_count: u64,
    pub absent_count: u64,
    pub today: TodayStats,
}

/// Today's attendance breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodayStats {
    pub marked: u64,
    pub present: u64,
    pub absent: u64,
    pub pending: u64,
}
