//! Rollcall core domain types
//!
//! Shared data model for the Rollcall HR client: employees, attendance
//! records, dashboard statistics, and the authenticated user profile. These
//! types are pure data carriers; all transport concerns live in
//! `rollcall-http`.

pub mod types;

pub use types::{
    AttendanceRecord, AttendanceStatus, DashboardStats, Employee, TodayStats, UnknownStatus,
    UserProfile,
};
