//! Dashboard statistics API client methods

use super::config::RequestConfig;
use super::{ApiClient, ClientError};
use rollcall_core::DashboardStats;

impl ApiClient {
    /// Fetch aggregate roster and attendance statistics.
    ///
    /// A success envelope with no payload renders as an all-zero dashboard
    /// rather than an error.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        let envelope = self
            .execute_envelope::<DashboardStats>(
                RequestConfig::get("/employee/dashboard"),
                "Failed to fetch dashboard stats",
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }
}
