//! Employee roster API client methods

use super::config::RequestConfig;
use super::{ApiClient, ClientError};
use rollcall_core::Employee;

impl ApiClient {
    /// Fetch the full roster
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        let envelope = self
            .execute_envelope::<Vec<Employee>>(
                RequestConfig::get("/employee/all"),
                "Failed to fetch employees",
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Add a new employee to the roster
    pub async fn add_employee(&self, employee: &Employee) -> Result<(), ClientError> {
        let config = RequestConfig::post("/employee/add").json(employee)?;
        self.execute_envelope::<serde_json::Value>(config, "Failed to add employee")
            .await?;
        Ok(())
    }

    /// Remove an employee from the roster
    pub async fn delete_employee(&self, id: &str) -> Result<(), ClientError> {
        self.execute_envelope::<serde_json::Value>(
            RequestConfig::delete(format!("/employee/{id}")),
            "Failed to delete employee",
        )
        .await?;
        Ok(())
    }
}
