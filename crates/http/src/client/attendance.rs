//! Attendance API client methods

use super::config::RequestConfig;
use super::{ApiClient, ClientError};
use crate::types::{AttendanceDateFilter, MarkAttendanceRequest};
use rollcall_core::AttendanceRecord;

impl ApiClient {
    /// Record attendance for one employee on one day
    pub async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<(), ClientError> {
        let config = RequestConfig::post("/attendance/mark").json(request)?;
        self.execute_envelope::<serde_json::Value>(config, "Failed to mark attendance")
            .await?;
        Ok(())
    }

    /// Fetch all attendance records
    pub async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, ClientError> {
        let envelope = self
            .execute_envelope::<Vec<AttendanceRecord>>(
                RequestConfig::get("/attendance"),
                "Failed to fetch attendance records",
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fetch today's record for one employee, if any
    pub async fn today_attendance(
        &self,
        employee_id: &str,
    ) -> Result<Option<AttendanceRecord>, ClientError> {
        let envelope = self
            .execute_envelope::<AttendanceRecord>(
                RequestConfig::get(format!("/attendance/{employee_id}/today")),
                "Failed to fetch today's attendance",
            )
            .await?;
        Ok(envelope.data)
    }

    /// Fetch every record for one employee
    pub async fn attendance_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let envelope = self
            .execute_envelope::<Vec<AttendanceRecord>>(
                RequestConfig::get(format!("/attendance/{employee_id}")),
                "Failed to fetch employee attendance",
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fetch records in a date range, optionally narrowed to one employee
    pub async fn attendance_by_date(
        &self,
        filter: &AttendanceDateFilter,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let mut config = RequestConfig::get("/attendance/filter/by-date")
            .param("startDate", filter.start_date.to_string())
            .param("endDate", filter.end_date.to_string());
        if let Some(employee_id) = &filter.employee_id {
            config = config.param("employeeId", employee_id);
        }

        let envelope = self
            .execute_envelope::<Vec<AttendanceRecord>>(
                config,
                "Failed to fetch attendance records by date",
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Delete one attendance record
    pub async fn delete_attendance(&self, id: &str) -> Result<(), ClientError> {
        self.execute_envelope::<serde_json::Value>(
            RequestConfig::delete(format!("/attendance/{id}")),
            "Failed to delete attendance record",
        )
        .await?;
        Ok(())
    }
}
